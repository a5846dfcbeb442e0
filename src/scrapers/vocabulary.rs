//! Vocabulary loader: reads the closed filter sets from the search form.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use scraper::{ElementRef, Html};
use tracing::info;

use super::{selector, Fetcher};
use crate::config::SiteUrls;
use crate::error::{CrawlError, Result};
use crate::models::Vocabulary;
use crate::utils::{alphabetic_only, collapse_whitespace};

/// Fetch the search form once and extract the vocabulary.
///
/// Failure here is fatal to the run: no filter can be validated without it.
pub async fn load_vocabulary<F: Fetcher + ?Sized>(
    fetcher: &F,
    site: &SiteUrls,
) -> Result<Vocabulary> {
    let html = fetcher.fetch(&site.search, &[]).await?;
    let vocab = parse_search_form(&html)?;
    info!(
        "Loaded vocabulary: {} title types, {} genres, {} countries",
        vocab.title_types.len(),
        vocab.genres.len(),
        vocab.countries.len()
    );
    Ok(vocab)
}

/// Extract the vocabulary from search form markup.
pub fn parse_search_form(html: &str) -> Result<Vocabulary> {
    let document = Html::parse_document(html);

    let label_sel = selector("label[for]")?;
    let labels: HashMap<&str, String> = document
        .select(&label_sel)
        .filter_map(|label| {
            let target = label.value().attr("for")?;
            Some((target, collapse_whitespace(&element_text(label))))
        })
        .collect();

    let type_sel = selector(r#"input[name="title_type"]"#)?;
    let mut title_types = BTreeSet::new();
    let mut title_type_words = BTreeSet::new();
    for input in document.select(&type_sel) {
        let Some(value) = input.value().attr("value") else {
            continue;
        };
        title_types.insert(value.to_lowercase());
        if let Some(label) = input_label(&input, &labels) {
            title_type_words.extend(alphabetic_only(&label).split_whitespace().map(String::from));
        }
    }

    let genre_sel = selector(r#"input[name="genres"]"#)?;
    let genres: BTreeSet<String> = document
        .select(&genre_sel)
        .filter_map(|input| input.value().attr("value"))
        .map(str::to_lowercase)
        .collect();

    let country_sel = selector("select.countries option")?;
    let countries: BTreeMap<String, String> = document
        .select(&country_sel)
        .filter_map(|option| {
            let code = option.value().attr("value")?.trim();
            let name = collapse_whitespace(&element_text(option));
            (!code.is_empty() && !name.is_empty()).then(|| (name, code.to_string()))
        })
        .collect();

    if title_types.is_empty() && genres.is_empty() {
        return Err(CrawlError::Parse(
            "search form has no title_type or genres inputs".to_string(),
        ));
    }

    Ok(Vocabulary::new(
        title_types,
        title_type_words,
        genres,
        countries,
    ))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Label text for a form input: a `label[for=id]` first, then a wrapping label.
fn input_label(input: &ElementRef<'_>, labels: &HashMap<&str, String>) -> Option<String> {
    if let Some(label) = input.value().id().and_then(|id| labels.get(id)) {
        return Some(label.clone());
    }
    input
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "label")
        .map(|label| collapse_whitespace(&element_text(label)))
}
