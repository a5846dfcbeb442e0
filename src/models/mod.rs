//! Data models for the crawl engine.

mod filter;
mod record;
mod vocabulary;

pub use filter::{FilterCriteria, Query};
pub use record::{DetailBlocks, DetailFields, ItemStub, Record, ABSENT};
pub use vocabulary::Vocabulary;
