//! filmcrawl: filtered catalog search crawler that writes one TSV row per title.

pub mod config;
pub mod crawl;
pub mod error;
pub mod models;
pub mod output;
pub mod scrapers;
pub mod utils;

pub use config::{Settings, SiteUrls};
pub use crawl::{run, CrawlSummary};
pub use error::{CrawlError, Result};
