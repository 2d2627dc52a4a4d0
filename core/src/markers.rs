//! Debug-signal keyword matching.

/// Keywords that flag a task as having involved debugging.
pub const DEFAULT_MARKERS: [&str; 10] = [
    "debug",
    "fix",
    "error",
    "failed",
    "retry",
    "ralph",
    "blocked",
    "workaround",
    "bug",
    "issue",
];

/// Returns `true` if the lowercased `text` contains any of `markers`.
///
/// Matching is plain substring search, so `"prefix"` matches `"fix"`.
/// Markers are expected to already be lowercase.
#[must_use]
pub fn contains_marker<S: AsRef<str>>(text: &str, markers: &[S]) -> bool {
    if text.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    markers
        .iter()
        .map(AsRef::as_ref)
        .any(|marker| lower.contains(marker))
}

/// Parses a comma-separated marker list, trimming and lowercasing each entry.
#[must_use]
pub fn parse_markers(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// The default markers as owned strings.
#[must_use]
pub fn default_markers() -> Vec<String> {
    DEFAULT_MARKERS.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_match() {
        assert!(contains_marker("Had to Debug this", &["debug"]));
        assert!(contains_marker("RETRY after timeout", &DEFAULT_MARKERS));
    }

    #[test]
    fn test_empty_text() {
        assert!(!contains_marker("", &["debug"]));
    }

    #[test]
    fn test_substring_not_word_boundary() {
        assert!(contains_marker("added a prefix option", &["fix"]));
        assert!(!contains_marker("smooth sailing", &DEFAULT_MARKERS));
    }

    #[test]
    fn test_parse_markers() {
        assert_eq!(
            parse_markers(" Debug, ,OOPS,panic "),
            vec!["debug".to_string(), "oops".to_string(), "panic".to_string()]
        );
        assert!(parse_markers(",,").is_empty());
    }
}
