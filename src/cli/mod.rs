//! Command-line interface.

mod commands;
mod icons;

pub use commands::{is_verbose, log_file_arg, run};
