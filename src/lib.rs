// Declare all modules as public so they can be used by the binary and tests.
pub mod cli;
pub mod core;
pub mod export;
pub mod utils;

pub use crate::core::{
    ExtractedText, ExtractorRegistry, MatchRecord, Predicate, ResultSet, SearchEngine,
    SearchError, SearchEvent, SearchOutcome, SearchParameters, SortKey, TextExtractor,
};
