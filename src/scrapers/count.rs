//! Result-count resolver.

use scraper::Html;
use tracing::debug;

use super::{selector, Fetcher};
use crate::config::SiteUrls;
use crate::error::{CrawlError, Result};
use crate::models::Query;
use crate::utils::collapse_whitespace;

/// Issue one listing request and read the total number of matches.
pub async fn resolve_result_count<F: Fetcher + ?Sized>(
    fetcher: &F,
    site: &SiteUrls,
    query: &Query,
) -> Result<usize> {
    let html = fetcher.fetch(&site.search, &query.params()).await?;
    let count = parse_result_count(&html)?;
    debug!("Search reports {} matching titles", count);
    Ok(count)
}

/// Parse the human-readable count description, e.g. `"1-50 of 1,234 titles."`.
///
/// The last integer token wins. A "no results" description yields zero.
pub fn parse_result_count(html: &str) -> Result<usize> {
    let document = Html::parse_document(html);
    let desc_sel = selector("div.desc")?;
    let description = document
        .select(&desc_sel)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .ok_or_else(|| CrawlError::Parse("listing page has no result count".to_string()))?;

    if description.to_lowercase().contains("no results") {
        return Ok(0);
    }

    description
        .split_whitespace()
        .rev()
        .find_map(|token| {
            token
                .trim_matches(|c: char| !c.is_ascii_alphanumeric())
                .replace(',', "")
                .parse::<usize>()
                .ok()
        })
        .ok_or_else(|| {
            CrawlError::Parse(format!(
                "no result count in description '{}'",
                description
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::testing::MockFetcher;

    fn page(desc: &str) -> String {
        format!(
            r#"<html><body><div class="desc"><span>{}</span></div></body></html>"#,
            desc
        )
    }

    #[test]
    fn test_parse_range_description() {
        assert_eq!(parse_result_count(&page("1-50 of 237 titles.")).unwrap(), 237);
    }

    #[test]
    fn test_parse_thousands_separator() {
        assert_eq!(
            parse_result_count(&page("1-50 of 1,234,567 titles.")).unwrap(),
            1_234_567
        );
    }

    #[test]
    fn test_parse_short_description() {
        assert_eq!(parse_result_count(&page("12 titles.")).unwrap(), 12);
    }

    #[test]
    fn test_parse_no_results() {
        assert_eq!(parse_result_count(&page("No results.")).unwrap(), 0);
    }

    #[test]
    fn test_missing_description_is_parse_error() {
        let err = parse_result_count("<html><body></body></html>").unwrap_err();
        assert!(matches!(err, CrawlError::Parse(_)));
    }

    #[test]
    fn test_description_without_number_is_parse_error() {
        let err = parse_result_count(&page("Showing titles")).unwrap_err();
        assert!(matches!(err, CrawlError::Parse(_)));
    }

    #[tokio::test]
    async fn test_resolve_sends_query() {
        let site = SiteUrls::new("https://example.com/", "search/title", "title/").unwrap();
        let query = Query {
            genres: Some("comedy".to_string()),
            ..Default::default()
        };
        let fetcher = MockFetcher::new().route(
            &site.search,
            &[("genres", "comedy"), ("start", "1")],
            page("1-50 of 237 titles."),
        );

        assert_eq!(resolve_result_count(&fetcher, &site, &query).await.unwrap(), 237);
        assert_eq!(fetcher.calls().len(), 1);
    }
}
