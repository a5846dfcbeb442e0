//! Pagination crawler over listing pages.
//!
//! The crawler is a finite, non-restartable, lazy sequence of stubs: a page
//! is fetched only when the consumer asks for a stub and the buffer of the
//! previous page is empty.

use std::collections::VecDeque;

use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use super::{selector, Fetcher};
use crate::config::SiteUrls;
use crate::error::Result;
use crate::models::{ItemStub, Query, ABSENT};
use crate::utils::collapse_whitespace;

/// Stubs parsed from one listing page, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPage {
    pub stubs: Vec<ItemStub>,
    /// Whether the page carries a "next page" link.
    pub has_next_page: bool,
}

/// Parse a listing page into stubs.
///
/// Containers without a title link are skipped; a missing genre or rating
/// leaves the field empty rather than failing the page.
pub fn parse_listing_page(html: &str, site: &SiteUrls) -> Result<ListingPage> {
    let document = Html::parse_document(html);
    let container_sel = selector("div.lister-item-content")?;
    let next_sel = selector("a.lister-page-next.next-page")?;

    let mut stubs = Vec::new();
    for container in document.select(&container_sel) {
        match parse_container(container, site)? {
            Some(stub) => stubs.push(stub),
            None => warn!("Skipping listing entry without a title link"),
        }
    }

    Ok(ListingPage {
        stubs,
        has_next_page: document.select(&next_sel).next().is_some(),
    })
}

fn parse_container(container: ElementRef<'_>, site: &SiteUrls) -> Result<Option<ItemStub>> {
    let index_sel = selector("span.lister-item-index")?;
    let title_sel = selector("h3.lister-item-header a")?;
    let genre_sel = selector("span.genre")?;
    let rating_sel = selector(r#"div.ratings-bar div[name="ir"]"#)?;

    let Some(title) = container.select(&title_sel).next() else {
        return Ok(None);
    };
    let Some(title_id) = title.value().attr("href").and_then(title_id_from_href) else {
        return Ok(None);
    };

    let index = container
        .select(&index_sel)
        .next()
        .map(text_of)
        .unwrap_or_else(|| ABSENT.to_string());
    let genre = container
        .select(&genre_sel)
        .next()
        .map(text_of)
        .filter(|g| !g.is_empty());
    let rating = container
        .select(&rating_sel)
        .next()
        .and_then(|el| el.value().attr("data-value"))
        .map(|v| v.trim().to_string())
        .filter(|r| !r.is_empty());

    Ok(Some(ItemStub {
        index,
        name: text_of(title),
        link: site.title_url(title_id),
        genre,
        rating,
    }))
}

fn text_of(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Title id is the second-to-last path segment: `/title/tt0111161/?ref=x`.
fn title_id_from_href(href: &str) -> Option<&str> {
    let segments: Vec<&str> = href.split('/').collect();
    segments
        .len()
        .checked_sub(2)
        .map(|i| segments[i])
        .filter(|id| !id.is_empty())
}

/// Lazily walks listing pages until `target` stubs were produced or the
/// site stops offering a next page.
///
/// After a page is used up, the offset advances by the number of stubs that
/// page yielded, and another page is requested only if the exhausted page
/// had a next-page link. Running out of pages before `target` is a normal
/// end of sequence.
pub struct ListingCrawler<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    site: &'a SiteUrls,
    query: Query,
    target: usize,
    parsed: usize,
    buffer: VecDeque<ItemStub>,
    yielded_on_page: u32,
    page_has_next: bool,
    fetched_any: bool,
    finished: bool,
}

impl<'a, F: Fetcher + ?Sized> ListingCrawler<'a, F> {
    pub fn new(fetcher: &'a F, site: &'a SiteUrls, query: Query, target: usize) -> Self {
        Self {
            fetcher,
            site,
            query,
            target,
            parsed: 0,
            buffer: VecDeque::new(),
            yielded_on_page: 0,
            page_has_next: false,
            fetched_any: false,
            finished: target == 0,
        }
    }

    /// Stubs produced so far.
    pub fn parsed(&self) -> usize {
        self.parsed
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Whether another stub may still be produced.
    ///
    /// `true` can still be followed by `None` from [`next_stub`](Self::next_stub)
    /// when the next page turns out to be empty.
    pub fn has_next(&self) -> bool {
        !self.finished
            && self.parsed < self.target
            && (!self.buffer.is_empty() || !self.fetched_any || self.page_has_next)
    }

    /// Produce the next stub, fetching a listing page if the buffer is empty.
    pub async fn next_stub(&mut self) -> Result<Option<ItemStub>> {
        loop {
            if self.finished || self.parsed >= self.target {
                self.finished = true;
                return Ok(None);
            }

            if let Some(stub) = self.buffer.pop_front() {
                self.parsed += 1;
                self.yielded_on_page += 1;
                return Ok(Some(stub));
            }

            if self.fetched_any {
                if !self.page_has_next {
                    debug!(
                        "No next page after {} of {} titles",
                        self.parsed, self.target
                    );
                    self.finished = true;
                    return Ok(None);
                }
                if self.yielded_on_page == 0 {
                    warn!(
                        "Listing page at offset {} had no titles; stopping at {} of {}",
                        self.query.offset, self.parsed, self.target
                    );
                    self.finished = true;
                    return Ok(None);
                }
                self.query.advance(self.yielded_on_page);
            }

            self.fetch_page().await?;
        }
    }

    async fn fetch_page(&mut self) -> Result<()> {
        debug!("Fetching listing page at offset {}", self.query.offset);
        let html = self
            .fetcher
            .fetch(&self.site.search, &self.query.params())
            .await?;
        let page = parse_listing_page(&html, self.site)?;

        self.fetched_any = true;
        self.yielded_on_page = 0;
        self.page_has_next = page.has_next_page;
        self.buffer = page.stubs.into();
        Ok(())
    }
}
