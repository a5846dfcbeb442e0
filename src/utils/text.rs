//! Text cleanup helpers shared by the listing and detail parsers.

use std::borrow::Cow;

/// Placeholder used in log lines whose label cannot be rendered cleanly.
pub const UNREADABLE_LABEL: &str = "<unreadable title>";

/// Collapse every whitespace run (including newlines and NBSP) into a single
/// space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace every non-alphabetic character with a space.
pub fn alphabetic_only(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphabetic() { c } else { ' ' })
        .collect()
}

/// Make a label safe for a single log line.
///
/// Labels carrying control characters or decoding replacement characters
/// degrade to [`UNREADABLE_LABEL`].
pub fn log_label(s: &str) -> Cow<'_, str> {
    if s.chars().any(|c| c.is_control() || c == '\u{FFFD}') {
        Cow::Borrowed(UNREADABLE_LABEL)
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a\n\t b  "), "a b");
        assert_eq!(collapse_whitespace("a\u{a0}b"), "a b");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_alphabetic_only() {
        assert_eq!(alphabetic_only("TV Series (2011-2019)").trim(), "TV Series");
        assert_eq!(alphabetic_only("Mini-Series"), "Mini Series");
    }

    #[test]
    fn test_log_label() {
        assert_eq!(log_label("Inception"), "Inception");
        assert_eq!(log_label("bad\u{FFFD}name"), UNREADABLE_LABEL);
        assert_eq!(log_label("tab\tname"), UNREADABLE_LABEL);
    }
}
