//! Closed filter vocabulary discovered from the search form.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Valid filter values, loaded once per process and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Vocabulary {
    /// Title-type codes accepted by the `title_type` parameter.
    pub title_types: BTreeSet<String>,
    /// Words appearing in title-type labels ("Feature", "Film", "TV", ...).
    pub title_type_words: BTreeSet<String>,
    /// Genre codes accepted by the `genres` parameter.
    pub genres: BTreeSet<String>,
    /// Country display name to code.
    pub countries: BTreeMap<String, String>,
    #[serde(skip)]
    country_names: BTreeMap<String, String>,
}

impl Vocabulary {
    pub fn new(
        title_types: BTreeSet<String>,
        title_type_words: BTreeSet<String>,
        genres: BTreeSet<String>,
        countries: BTreeMap<String, String>,
    ) -> Self {
        let country_names = countries
            .iter()
            .map(|(name, code)| (code.clone(), name.clone()))
            .collect();
        Self {
            title_types,
            title_type_words,
            genres,
            countries,
            country_names,
        }
    }

    /// Resolve a country given either its display name or its code.
    pub fn country_code(&self, input: &str) -> Option<&str> {
        if let Some(code) = self.countries.get(input) {
            return Some(code);
        }
        self.country_names
            .get_key_value(input)
            .map(|(code, _)| code.as_str())
    }

    /// Display name for a country code.
    pub fn country_name(&self, code: &str) -> Option<&str> {
        self.country_names.get(code).map(String::as_str)
    }

    pub fn is_title_type_word(&self, word: &str) -> bool {
        self.title_type_words.contains(word)
    }
}
