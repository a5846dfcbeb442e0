//! Fetching and parsing of search, listing and detail documents.

mod blocks;
mod count;
mod detail;
mod filter;
mod http_client;
mod listing;
#[cfg(test)]
pub(crate) mod testing;
mod vocabulary;

pub use blocks::normalize_blocks;
pub use count::{parse_result_count, resolve_result_count};
pub use detail::{DetailExtractor, DetailLayout, TitleDetailsLayout, DEFAULT_TITLE_TYPE};
pub use filter::build_query;
pub use http_client::{HttpClient, USER_AGENT};
pub use listing::{parse_listing_page, ListingCrawler, ListingPage};
pub use vocabulary::{load_vocabulary, parse_search_form};

use async_trait::async_trait;
use scraper::Selector;

use crate::error::{CrawlError, Result};

/// Capability to fetch a document as markup.
///
/// The engine never talks to the network directly; tests substitute
/// canned documents through this seam.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, query: &[(&str, String)]) -> Result<String>;
}

/// Render query pairs the way they appear in a log line or a mock route key.
pub fn query_string(query: &[(&str, String)]) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Compile a CSS selector, reporting failures as a parse error.
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| CrawlError::Parse(format!("Failed to parse selector {}: {:?}", css, e)))
}
