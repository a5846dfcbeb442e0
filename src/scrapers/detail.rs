//! Detail extractor: type, cast and labelled blocks of one title.
//!
//! Site-specific markup knowledge lives behind [`DetailLayout`] so a change
//! in the upstream page shape only touches one implementation.

use scraper::{ElementRef, Html};
use tracing::debug;

use super::{normalize_blocks, selector, Fetcher};
use crate::error::Result;
use crate::models::{DetailBlocks, DetailFields, ItemStub, Vocabulary};
use crate::utils::{alphabetic_only, collapse_whitespace};

/// Type reported when the release-date element carries no known type words.
pub const DEFAULT_TITLE_TYPE: &str = "Feature Film";

/// Markup heuristics for a detail document.
///
/// Each method returns `None` (or an empty field) when its element is
/// absent; only a broken selector is an error.
pub trait DetailLayout: Send + Sync {
    fn title_type(&self, doc: &Html, vocab: &Vocabulary) -> Result<Option<String>>;
    fn stars(&self, doc: &Html) -> Result<Option<String>>;
    fn blocks(&self, doc: &Html) -> Result<DetailBlocks>;
}

/// Layout of title pages with a `#titleDetails` container and
/// `credit_summary_item` rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleDetailsLayout;

impl DetailLayout for TitleDetailsLayout {
    fn title_type(&self, doc: &Html, vocab: &Vocabulary) -> Result<Option<String>> {
        let release_sel = selector(r#"a[title="See more release dates"]"#)?;
        let Some(release) = doc.select(&release_sel).next() else {
            return Ok(None);
        };

        let text = alphabetic_only(&release.text().collect::<String>());
        let words: Vec<&str> = text
            .split_whitespace()
            .filter(|word| vocab.is_title_type_word(word))
            .collect();

        if words.is_empty() {
            Ok(Some(DEFAULT_TITLE_TYPE.to_string()))
        } else {
            Ok(Some(words.join(" ")))
        }
    }

    fn stars(&self, doc: &Html) -> Result<Option<String>> {
        let row_sel = selector("div.credit_summary_item")?;
        let row = doc
            .select(&row_sel)
            .find(|row| row.text().any(|t| t.contains("Stars")));
        Ok(row.map(cast_text).filter(|cast| !cast.is_empty()))
    }

    fn blocks(&self, doc: &Html) -> Result<DetailBlocks> {
        let container_sel = selector("div#titleDetails")?;
        match doc.select(&container_sel).next() {
            Some(container) => normalize_blocks(&container.html()),
            None => {
                debug!("Detail document has no details container");
                Ok(DetailBlocks::default())
            }
        }
    }
}

/// Text of the nodes between a row's heading and its trailing "see more"
/// affordance.
fn cast_text(row: ElementRef<'_>) -> String {
    let mut text = String::new();
    let mut after_heading = false;

    for node in row.children() {
        match ElementRef::wrap(node) {
            Some(el) if !after_heading => {
                after_heading = el.value().name() == "h4";
            }
            Some(el) if is_trailer(el) => break,
            Some(el) => text.extend(el.text()),
            None if after_heading => {
                if let Some(t) = node.value().as_text() {
                    text.push_str(t);
                }
            }
            None => {}
        }
    }

    collapse_whitespace(&text)
}

fn is_trailer(el: ElementRef<'_>) -> bool {
    let value = el.value();
    match value.name() {
        "span" => value.classes().any(|c| c == "ghost"),
        "a" => {
            value.attr("href").is_some_and(|h| h.contains("fullcredits"))
                || el
                    .text()
                    .collect::<String>()
                    .trim()
                    .to_lowercase()
                    .starts_with("see ")
        }
        _ => false,
    }
}

/// Fetches one detail document per stub and applies a [`DetailLayout`].
pub struct DetailExtractor<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    vocab: &'a Vocabulary,
    layout: Box<dyn DetailLayout + 'a>,
}

impl<'a, F: Fetcher + ?Sized> DetailExtractor<'a, F> {
    pub fn new(fetcher: &'a F, vocab: &'a Vocabulary) -> Self {
        Self::with_layout(fetcher, vocab, TitleDetailsLayout)
    }

    pub fn with_layout(
        fetcher: &'a F,
        vocab: &'a Vocabulary,
        layout: impl DetailLayout + 'a,
    ) -> Self {
        Self {
            fetcher,
            vocab,
            layout: Box::new(layout),
        }
    }

    /// Fetch the stub's detail document and extract its fields.
    pub async fn extract(&self, stub: &ItemStub) -> Result<DetailFields> {
        let html = self.fetcher.fetch(&stub.link, &[]).await?;
        self.parse(&html)
    }

    /// Extract fields from an already fetched detail document.
    pub fn parse(&self, html: &str) -> Result<DetailFields> {
        let doc = Html::parse_document(html);
        Ok(DetailFields {
            title_type: self.layout.title_type(&doc, self.vocab)?,
            stars: self.layout.stars(&doc)?,
            blocks: self.layout.blocks(&doc)?,
        })
    }
}
