pub mod engine;
pub mod error;
pub mod extractor;
pub mod predicate;
pub mod results;
pub mod snippet;

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Parameters for a single search invocation.
///
/// Captured once when the search starts and immutable afterwards; the engine
/// never reads live external state mid-walk, so toggling options in a caller
/// cannot corrupt a run that is already in flight.
#[derive(Debug, Clone)]
pub struct SearchParameters {
    /// Root directory of the walk. Must exist and be a directory when the
    /// search starts.
    pub root: PathBuf,
    /// Non-empty pattern; a regex when `use_regex` is set, otherwise a
    /// whitespace-separated token list.
    pub pattern: String,
    /// Optional set of lowercase, dot-less extensions. `None` or empty means
    /// no filter.
    pub extensions: Option<HashSet<String>>,
    /// Token mode only: any token suffices instead of all tokens.
    pub match_any: bool,
    /// Governs filename and content comparisons, and token lowering.
    pub case_sensitive: bool,
    /// Match extracted file content instead of filenames.
    pub search_content: bool,
    /// Interpret `pattern` as a regular expression.
    pub use_regex: bool,
}

impl SearchParameters {
    pub fn new(root: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            pattern: pattern.into(),
            extensions: None,
            match_any: false,
            case_sensitive: false,
            search_content: false,
            use_regex: false,
        }
    }
}

/// One matched file. Emitted at most once per path per search; owned by the
/// caller once emitted.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    /// Base filename.
    pub name: String,
    /// Full path, the unique key of the record.
    pub path: PathBuf,
    /// Byte length at time of stat.
    pub size: u64,
    /// Modification time at time of stat.
    pub modified: DateTime<Local>,
    /// Lowercase extension without the leading dot; empty when absent.
    pub extension: String,
    /// Bounded excerpt around the first content match; empty when content
    /// search is disabled or no positional match was found.
    pub snippet: String,
}

/// Events emitted by the engine while a search runs.
#[derive(Debug, Clone, Serialize)]
pub enum SearchEvent {
    /// Sent once per enumerated file, match or not, with a strictly
    /// increasing `scanned` count ending at `total` on a completed run.
    Progress { scanned: usize, total: usize },
    Match(MatchRecord),
    /// Sent at most once, always last, and never after a cancelled run.
    Complete { matched: usize },
}

/// Summary returned by [`SearchEngine::run`] after the walk stops.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Files visited, including ones rejected by the extension filter.
    pub scanned: usize,
    /// Records emitted.
    pub matched: usize,
    /// True when the run stopped on the cancel flag (or a dropped receiver)
    /// instead of exhausting the file list.
    pub cancelled: bool,
    /// Diagnostic for an invalid regex pattern, reported once per search.
    /// The run still finishes, with zero matches.
    pub pattern_error: Option<String>,
}

pub use engine::SearchEngine;
pub use error::SearchError;
pub use extractor::{ExtractedText, ExtractorRegistry, TextExtractor};
pub use predicate::Predicate;
pub use results::{ResultSet, SortKey};
