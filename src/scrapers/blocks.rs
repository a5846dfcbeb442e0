//! Block text normalizer for the labelled sections of a detail document.

use regex::Regex;
use scraper::Html;
use tracing::debug;

use super::selector;
use crate::error::{CrawlError, Result};
use crate::models::DetailBlocks;
use crate::utils::collapse_whitespace;

/// Separator between text blocks: a backslash followed by `n`, not a line break.
pub const BLOCK_SEPARATOR: &str = "\\n";

const BOILERPLATE: &str = "See more »";

/// Split a detail container's markup on horizontal rules and read the
/// Details, Box Office and Technical Specs sections.
///
/// Parts with any other heading, or none at all, are ignored.
pub fn normalize_blocks(container_markup: &str) -> Result<DetailBlocks> {
    let rule = Regex::new(r"(?i)<hr\s*/?>")
        .map_err(|e| CrawlError::Parse(format!("Invalid separator pattern: {}", e)))?;
    let heading_sel = selector("h2, h3")?;
    let text_block_sel = selector("div.txt-block")?;

    let mut blocks = DetailBlocks::default();
    for part in rule.split(container_markup) {
        let fragment = Html::parse_fragment(part);
        let Some(heading) = fragment.select(&heading_sel).next() else {
            continue;
        };
        let label = heading.text().collect::<String>();
        let slot = match label.trim() {
            "Details" => &mut blocks.details,
            "Box Office" => &mut blocks.box_office,
            "Technical Specs" => &mut blocks.tech_specs,
            other => {
                debug!("Ignoring detail section '{}'", other);
                continue;
            }
        };

        let text = fragment
            .select(&text_block_sel)
            .map(|block| {
                collapse_whitespace(&block.text().collect::<String>()).replace(BOILERPLATE, "")
            })
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR);
        if !text.is_empty() {
            *slot = Some(text);
        }
    }
    Ok(blocks)
}
