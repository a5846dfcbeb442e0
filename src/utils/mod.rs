//! Utility modules.

pub mod text;

pub use text::{alphabetic_only, collapse_whitespace, log_label};
