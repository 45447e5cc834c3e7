//! Command-line argument definitions.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::core::{SearchParameters, SortKey};

#[derive(Parser, Debug)]
#[command(name = "file-search", version, about = "Search for files by keywords and optional extensions, by name or by extracted content.", long_about = None)]
pub struct Cli {
    /// Keywords to search for (joined into one pattern; a regex with --regex)
    #[arg(required = true, value_name = "KEYWORD")]
    pub keywords: Vec<String>,

    /// Directory to search in (default: current)
    #[arg(short = 'd', long, default_value = ".")]
    pub directory: PathBuf,

    /// Filter by file extension(s), e.g. pdf docx pptx. Case-insensitive.
    #[arg(short = 'e', long = "ext", num_args = 1.., value_name = "EXT")]
    pub extensions: Option<Vec<String>>,

    /// Match files that contain any keyword (default: all)
    #[arg(long)]
    pub match_any: bool,

    /// Perform case-sensitive search
    #[arg(long)]
    pub case_sensitive: bool,

    /// Search in extracted file content instead of filenames
    #[arg(long)]
    pub content: bool,

    /// Treat the pattern as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Sort results
    #[arg(long, value_enum, default_value_t = SortOrder::Name)]
    pub sort: SortOrder,

    /// Write the results to a CSV file
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Print results as JSON instead of the plain listing
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Name,
    Date,
    Size,
    None,
}

impl From<SortOrder> for SortKey {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Name => SortKey::Name,
            SortOrder::Date => SortKey::Date,
            SortOrder::Size => SortKey::Size,
            SortOrder::None => SortKey::None,
        }
    }
}

impl Cli {
    /// Builds the immutable per-invocation parameter set from the parsed
    /// arguments.
    pub fn to_parameters(&self) -> SearchParameters {
        let extensions = self.extensions.as_ref().map(|exts| {
            exts.iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect::<HashSet<_>>()
        });

        SearchParameters {
            root: self.directory.clone(),
            pattern: self.keywords.join(" "),
            extensions,
            match_any: self.match_any,
            case_sensitive: self.case_sensitive,
            search_content: self.content,
            use_regex: self.regex,
        }
    }
}
