//! Output sinks for emitted records.

mod tsv;

pub use tsv::TsvSink;
