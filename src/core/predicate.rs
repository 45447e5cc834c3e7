//! Pattern evaluation against filenames and extracted content.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use super::SearchParameters;

/// A compiled search predicate: one pattern plus its mode knobs.
///
/// Compiled once per search and reused for every file, so an invalid regex is
/// diagnosed exactly once instead of once per scanned file. A degraded
/// predicate evaluates to `false` for every haystack rather than aborting the
/// walk; the caller surfaces [`Predicate::pattern_error`] to the user.
pub struct Predicate {
    matcher: Matcher,
    case_sensitive: bool,
    match_any: bool,
    error: Option<String>,
}

enum Matcher {
    Regex(Regex),
    /// Whitespace-split tokens, already lowered when case-insensitive.
    Tokens(Vec<String>),
    /// Invalid regex pattern; never matches.
    Degraded,
}

impl Predicate {
    pub fn new(params: &SearchParameters) -> Self {
        let mut error = None;
        let matcher = if params.use_regex {
            match RegexBuilder::new(&params.pattern)
                .case_insensitive(!params.case_sensitive)
                .build()
            {
                Ok(re) => Matcher::Regex(re),
                Err(e) => {
                    tracing::warn!("Invalid regex pattern {:?}: {e}", params.pattern);
                    error = Some(e.to_string());
                    Matcher::Degraded
                }
            }
        } else {
            let tokens = params
                .pattern
                .split_whitespace()
                .map(|t| {
                    if params.case_sensitive {
                        t.to_string()
                    } else {
                        t.to_lowercase()
                    }
                })
                .collect();
            Matcher::Tokens(tokens)
        };

        Self {
            matcher,
            case_sensitive: params.case_sensitive,
            match_any: params.match_any,
            error,
        }
    }

    /// Diagnostic for a pattern that failed to compile, if any.
    pub fn pattern_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Evaluates the predicate against `haystack`.
    ///
    /// An empty haystack never matches, and neither does an all-whitespace
    /// pattern; blank input must not behave like match-all.
    pub fn matches(&self, haystack: &str) -> bool {
        if haystack.is_empty() {
            return false;
        }
        match &self.matcher {
            Matcher::Regex(re) => re.is_match(haystack),
            Matcher::Tokens(tokens) => {
                if tokens.is_empty() {
                    return false;
                }
                let lowered;
                let hay = if self.case_sensitive {
                    haystack
                } else {
                    lowered = haystack.to_lowercase();
                    lowered.as_str()
                };
                if self.match_any {
                    tokens.iter().any(|t| hay.contains(t.as_str()))
                } else {
                    tokens.iter().all(|t| hay.contains(t.as_str()))
                }
            }
            Matcher::Degraded => false,
        }
    }

    /// Locates the span the snippet window is anchored on.
    ///
    /// Regex mode returns the full span of the first match. Token mode
    /// returns an empty range at the first occurrence of the *first* token,
    /// which in any-mode can miss when a later token was the one that
    /// matched; the snippet extractor falls back to the leading content in
    /// that case. Offsets are byte positions into `content`; positions found
    /// in the case-folded copy are mapped back, so folds that change a
    /// character's length (e.g. 'İ') do not shift the window.
    pub fn first_match(&self, content: &str) -> Option<Range<usize>> {
        match &self.matcher {
            Matcher::Regex(re) => re.find(content).map(|m| m.range()),
            Matcher::Tokens(tokens) => {
                let first = tokens.first()?;
                let pos = if self.case_sensitive {
                    content.find(first.as_str())?
                } else {
                    let folded_pos = content.to_lowercase().find(first.as_str())?;
                    unfold_offset(content, folded_pos)
                };
                Some(pos..pos)
            }
            Matcher::Degraded => None,
        }
    }
}

/// Maps a byte offset in the lowercase form of `content` back to the offset
/// of the corresponding character in `content` itself. Lowercasing is not
/// length-preserving, so offsets found in the folded copy cannot be used on
/// the original directly. An offset landing inside one character's multi-char
/// fold resolves to the following character.
fn unfold_offset(content: &str, folded_pos: usize) -> usize {
    let mut folded = 0;
    for (idx, ch) in content.char_indices() {
        if folded >= folded_pos {
            return idx;
        }
        folded += ch.to_lowercase().map(char::len_utf8).sum::<usize>();
    }
    content.len()
}
