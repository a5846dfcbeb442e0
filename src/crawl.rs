//! Crawl engine: count, paginate, enrich and emit.

use std::io::Write;

use tracing::{info, warn};

use crate::config::SiteUrls;
use crate::error::Result;
use crate::models::{Query, Record, Vocabulary};
use crate::output::TsvSink;
use crate::scrapers::{resolve_result_count, DetailExtractor, Fetcher, ListingCrawler};
use crate::utils::log_label;

/// Outcome of one crawl run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Match count reported by the search service.
    pub resolved: usize,
    /// Number of records the crawl aimed for after clamping.
    pub target: usize,
    /// Records actually written.
    pub written: usize,
}

impl CrawlSummary {
    /// Pagination ran out before the target was reached.
    pub fn is_short(&self) -> bool {
        self.written < self.target
    }
}

/// Crawl target: the resolved count clamped to `cap`.
pub fn crawl_target(resolved: usize, cap: usize) -> usize {
    resolved.min(cap)
}

/// Run one sequential crawl and stream every record to `sink`.
///
/// The header is already in `sink`; a zero result count leaves it as the
/// only line. Any transport or structural failure aborts the run, leaving
/// already written records in place.
pub async fn run<F, W>(
    fetcher: &F,
    site: &SiteUrls,
    vocab: &Vocabulary,
    query: Query,
    cap: usize,
    sink: &mut TsvSink<W>,
) -> Result<CrawlSummary>
where
    F: Fetcher + ?Sized,
    W: Write,
{
    let resolved = resolve_result_count(fetcher, site, &query).await?;
    let target = crawl_target(resolved, cap);
    info!("Found {} matching titles, crawling {}", resolved, target);

    let mut summary = CrawlSummary {
        resolved,
        target,
        written: 0,
    };
    if target == 0 {
        info!("Nothing to crawl");
        return Ok(summary);
    }

    let extractor = DetailExtractor::new(fetcher, vocab);
    let mut listing = ListingCrawler::new(fetcher, site, query, target);

    while let Some(stub) = listing.next_stub().await? {
        let details = extractor.extract(&stub).await?;
        let record = Record::assemble(stub, details);
        sink.write_record(&record)?;
        summary.written += 1;

        info!(
            "{} {} ({})",
            log_label(&record.index),
            log_label(&record.name),
            log_label(&record.link)
        );
    }

    if summary.is_short() {
        warn!(
            "Listing ended after {} of {} titles",
            summary.written, summary.target
        );
    }
    info!("Parsed {} titles", summary.written);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_target_clamps() {
        assert_eq!(crawl_target(237, 1000), 237);
        assert_eq!(crawl_target(52_000, 1000), 1000);
        assert_eq!(crawl_target(0, 1000), 0);
    }

    #[test]
    fn test_short_summary() {
        let summary = CrawlSummary {
            resolved: 10,
            target: 10,
            written: 7,
        };
        assert!(summary.is_short());
    }
}
