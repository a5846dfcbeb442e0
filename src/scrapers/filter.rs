//! Filter validator/builder: turns user criteria into a canonical query.
//!
//! Validation is purely local against the loaded vocabulary; no request is
//! made here.

use std::collections::BTreeSet;

use crate::error::{CrawlError, Result};
use crate::models::{FilterCriteria, Query, Vocabulary};

const DATE_SEPARATOR: char = '-';
const DEFAULT_MIN_RATING: &str = "1.0";
const DEFAULT_MAX_RATING: &str = "10.0";

/// Validate `criteria` against `vocab` and build the initial query.
pub fn build_query(criteria: &FilterCriteria, vocab: &Vocabulary) -> Result<Query> {
    let mut query = Query::default();

    if !criteria.title_types.is_empty() {
        let codes = closed_set(&criteria.title_types, &vocab.title_types, "title type")?;
        query.title_type = Some(codes.join(","));
    }

    if criteria.release_date_from.is_some() || criteria.release_date_to.is_some() {
        let from = date_bound(criteria.release_date_from.as_deref())?;
        let to = date_bound(criteria.release_date_to.as_deref())?;
        query.release_date = Some(format!("{},{}", from, to));
    }

    if !criteria.genres.is_empty() {
        let codes = closed_set(&criteria.genres, &vocab.genres, "genre")?;
        query.genres = Some(codes.join(","));
    }

    if criteria.min_user_rating.is_some() || criteria.max_user_rating.is_some() {
        let min = rating_bound(criteria.min_user_rating.as_deref(), DEFAULT_MIN_RATING)?;
        let max = rating_bound(criteria.max_user_rating.as_deref(), DEFAULT_MAX_RATING)?;
        query.user_rating = Some(format!("{},{}", min, max));
    }

    if let Some(country) = &criteria.country {
        let code = vocab.country_code(country.trim()).ok_or_else(|| {
            let names: Vec<&str> = vocab.countries.keys().map(String::as_str).collect();
            let codes: BTreeSet<&str> = vocab.countries.values().map(String::as_str).collect();
            CrawlError::InvalidFilter(format!(
                "unknown country '{}'; valid names: {}; valid codes: {}",
                country,
                names.join(", "),
                codes.into_iter().collect::<Vec<_>>().join(", ")
            ))
        })?;
        query.countries = Some(code.to_string());
    }

    Ok(query)
}

/// Lowercase every token and require membership in `valid`.
fn closed_set(tokens: &[String], valid: &BTreeSet<String>, what: &str) -> Result<Vec<String>> {
    tokens
        .iter()
        .map(|token| {
            let code = token.trim().to_lowercase();
            if valid.contains(&code) {
                Ok(code)
            } else {
                Err(CrawlError::InvalidFilter(format!(
                    "'{}' isn't one of available {}s: {}",
                    token,
                    what,
                    valid.iter().cloned().collect::<Vec<_>>().join(", ")
                )))
            }
        })
        .collect()
}

/// True for `YYYY-MM-DD` shaped input (digits and separators only).
fn is_date_well_formed(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes[4] == DATE_SEPARATOR as u8
        && bytes[7] == DATE_SEPARATOR as u8
        && [&bytes[..4], &bytes[5..7], &bytes[8..]]
            .iter()
            .all(|segment| segment.iter().all(u8::is_ascii_digit))
}

/// An absent bound renders as an empty string (open range).
fn date_bound(date: Option<&str>) -> Result<&str> {
    match date {
        None => Ok(""),
        Some(d) if is_date_well_formed(d) => Ok(d),
        Some(d) => Err(CrawlError::InvalidFilter(format!(
            "release date '{}' must be in YYYY-MM-DD format",
            d
        ))),
    }
}

/// Validate a rating bound in [0, 10] and render it.
///
/// Values are rendered with one decimal place; input written as a whole
/// number (no decimal point) renders without one.
fn rating_bound(raw: Option<&str>, default: &str) -> Result<String> {
    let Some(raw) = raw else {
        return Ok(default.to_string());
    };
    let text = raw.trim();
    let value: f64 = text
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite() && (0.0..=10.0).contains(v))
        .ok_or_else(|| {
            CrawlError::InvalidFilter(format!(
                "user rating '{}' must be a number from 0 to 10",
                raw
            ))
        })?;

    if !text.contains('.') && value.fract() == 0.0 {
        Ok(format!("{:.0}", value))
    } else {
        Ok(format!("{:.1}", value))
    }
}
