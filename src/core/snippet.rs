//! Contextual snippet extraction around the first content match.

use super::predicate::Predicate;

/// Characters of context kept on each side of the match position.
const CONTEXT_RADIUS: usize = 75;
/// Length of the leading-content fallback when no position is found.
const FALLBACK_CHARS: usize = 150;

/// Returns a bounded excerpt of `content` around the first match of
/// `predicate`, trimmed of surrounding whitespace.
///
/// The window is `[span.start - 75, span.end + 75]` clamped to the content
/// and to UTF-8 character boundaries. When the predicate cannot locate a
/// position (any-mode with a non-leading token, or a degraded pattern) the
/// leading 150 characters are returned instead. This path is deliberately
/// lossy: a snippet miss must never fail the overall match.
pub fn extract(content: &str, predicate: &Predicate) -> String {
    let span = match predicate.first_match(content) {
        Some(span) => span,
        None => return leading(content),
    };

    // Token positions come from a case-folded copy whose length can differ
    // from the original, so clamp before slicing.
    let anchor_start = span.start.min(content.len());
    let anchor_end = span.end.min(content.len());

    let start = floor_char_boundary(content, anchor_start.saturating_sub(CONTEXT_RADIUS));
    let end = ceil_char_boundary(content, anchor_end.saturating_add(CONTEXT_RADIUS));

    match content.get(start..end) {
        Some(window) => window.trim().to_string(),
        None => leading(content),
    }
}

fn leading(content: &str) -> String {
    content
        .chars()
        .take(FALLBACK_CHARS)
        .collect::<String>()
        .trim()
        .to_string()
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    i = i.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    if i >= s.len() {
        return s.len();
    }
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SearchParameters;

    fn token_predicate(pattern: &str) -> Predicate {
        Predicate::new(&SearchParameters::new(".", pattern))
    }

    fn regex_predicate(pattern: &str) -> Predicate {
        let mut params = SearchParameters::new(".", pattern);
        params.use_regex = true;
        Predicate::new(&params)
    }

    #[test]
    fn short_content_returns_whole_trimmed_window() {
        let p = token_predicate("results");
        assert_eq!(extract("  Q4 results  ", &p), "Q4 results");
    }

    #[test]
    fn window_is_bounded_around_the_match() {
        let padding = "x".repeat(200);
        let content = format!("{padding} needle {padding}");
        let p = token_predicate("needle");
        let snippet = extract(&content, &p);
        assert!(snippet.contains("needle"));
        // 75 chars each side plus the anchor itself.
        assert!(snippet.len() <= 2 * 75 + "needle".len() + 1);
    }

    #[test]
    fn regex_window_extends_past_match_end() {
        let tail = "y".repeat(200);
        let content = format!("prefix needle {tail}");
        let p = regex_predicate("needle");
        let snippet = extract(&content, &p);
        assert!(snippet.starts_with("prefix needle"));
        assert!(snippet.len() > "prefix needle".len());
    }

    #[test]
    fn missing_first_token_falls_back_to_leading_content() {
        let mut params = SearchParameters::new(".", "zebra apple");
        params.match_any = true;
        let p = Predicate::new(&params);
        let content = format!("apple pie {}", "z".repeat(300));
        let snippet = extract(&content, &p);
        assert!(snippet.starts_with("apple pie"));
        assert_eq!(snippet.chars().count(), 150);
    }

    #[test]
    fn multibyte_content_never_splits_characters() {
        let content = "é".repeat(120) + "needle" + &"ü".repeat(120);
        let p = token_predicate("needle");
        let snippet = extract(&content, &p);
        assert!(snippet.contains("needle"));
    }

    #[test]
    fn degraded_pattern_uses_fallback() {
        let p = regex_predicate("broken_(");
        let snippet = extract("some short content", &p);
        assert_eq!(snippet, "some short content");
    }
}
