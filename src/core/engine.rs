//! The traversal-and-matching orchestrator.

use std::path::Path;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::mpsc::UnboundedSender;
use walkdir::WalkDir;

use super::error::SearchError;
use super::extractor::ExtractorRegistry;
use super::predicate::Predicate;
use super::snippet;
use super::{MatchRecord, SearchEvent, SearchOutcome, SearchParameters};

/// Walks a directory tree and streams match results.
///
/// One engine instance runs at most one search at a time; a second `run`
/// while one is active is rejected with [`SearchError::Busy`] so two walks
/// can never interleave their event streams. The walk itself is sequential,
/// one file at a time in enumeration order, which is what guarantees the
/// ordering of the emitted events.
pub struct SearchEngine {
    registry: Arc<ExtractorRegistry>,
    busy: AtomicBool,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::with_registry(ExtractorRegistry::with_defaults())
    }

    /// An engine with a caller-supplied extraction capability set.
    pub fn with_registry(registry: ExtractorRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            busy: AtomicBool::new(false),
        }
    }

    /// Runs one search, emitting [`SearchEvent`]s on `events` as the walk
    /// progresses.
    ///
    /// Fails fast with a configuration error before any traversal or event
    /// when the root is not a directory or the pattern is empty. Per-file
    /// errors mid-walk never surface: entries that vanish or turn unreadable
    /// between enumeration and stat are skipped silently.
    ///
    /// The cancel flag is checked once per file; a cancelled run stops
    /// without emitting `Complete` and reports `cancelled` in the outcome.
    /// Dropping the receiver has the same effect.
    pub async fn run(
        &self,
        params: SearchParameters,
        events: UnboundedSender<SearchEvent>,
        cancel: Arc<AtomicBool>,
    ) -> Result<SearchOutcome, SearchError> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(SearchError::Busy);
        }
        let result = self.run_inner(params, events, cancel).await;
        self.busy.store(false, Ordering::SeqCst);
        result
    }

    async fn run_inner(
        &self,
        params: SearchParameters,
        events: UnboundedSender<SearchEvent>,
        cancel: Arc<AtomicBool>,
    ) -> Result<SearchOutcome, SearchError> {
        if !params.root.is_dir() {
            return Err(SearchError::NotADirectory(params.root.clone()));
        }
        if params.pattern.trim().is_empty() {
            return Err(SearchError::EmptyPattern);
        }

        let registry = Arc::clone(&self.registry);
        let handle =
            tokio::task::spawn_blocking(move || run_walk(&params, &registry, &events, &cancel));
        Ok(handle.await?)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The blocking walk. Enumerates the full file list up front (the total is
/// needed for percentage progress), then matches one file at a time.
fn run_walk(
    params: &SearchParameters,
    registry: &ExtractorRegistry,
    events: &UnboundedSender<SearchEvent>,
    cancel: &AtomicBool,
) -> SearchOutcome {
    let predicate = Predicate::new(params);
    let mut outcome = SearchOutcome {
        pattern_error: predicate.pattern_error().map(str::to_owned),
        ..SearchOutcome::default()
    };

    // Symlinks are followed; walkdir reports traversal loops and unreadable
    // entries as errors, which are skipped like any transient failure.
    let files: Vec<PathBuf> = WalkDir::new(&params.root)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();

    let total = files.len();
    tracing::info!("Enumerated {total} files under {}", params.root.display());

    for path in files {
        if cancel.load(Ordering::Relaxed) {
            tracing::info!("Search cancelled after {} files", outcome.scanned);
            outcome.cancelled = true;
            return outcome;
        }

        outcome.scanned += 1;
        if events
            .send(SearchEvent::Progress {
                scanned: outcome.scanned,
                total,
            })
            .is_err()
        {
            // Receiver gone; nobody is listening anymore.
            outcome.cancelled = true;
            return outcome;
        }

        let extension = extension_of(&path);
        if let Some(filter) = &params.extensions {
            if !filter.is_empty() && !filter.contains(&extension) {
                continue;
            }
        }

        let matched = if params.search_content {
            match_content(&path, registry, &predicate)
        } else {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            predicate.matches(name).then(String::new)
        };

        let snippet = match matched {
            Some(snippet) => snippet,
            None => continue,
        };

        // Stat after matching; a file that vanished in between is skipped
        // rather than reported as a partial record.
        let metadata = match std::fs::metadata(&path) {
            Ok(md) => md,
            Err(e) => {
                tracing::debug!("Skipping {}: {e}", path.display());
                continue;
            }
        };
        let modified = match metadata.modified() {
            Ok(time) => DateTime::<Local>::from(time),
            Err(e) => {
                tracing::debug!("Skipping {}: {e}", path.display());
                continue;
            }
        };

        let record = MatchRecord {
            name: path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string(),
            path,
            size: metadata.len(),
            modified,
            extension,
            snippet,
        };

        outcome.matched += 1;
        if events.send(SearchEvent::Match(record)).is_err() {
            outcome.cancelled = true;
            return outcome;
        }
    }

    let _ = events.send(SearchEvent::Complete {
        matched: outcome.matched,
    });
    tracing::info!(
        "Search complete: {} of {} files matched",
        outcome.matched,
        outcome.scanned
    );
    outcome
}

/// Content-mode match test. The name predicate plays no part here: emission
/// depends solely on the extracted content. Sentinels (missing decoder,
/// decode failure) count as no usable content and never match.
fn match_content(
    path: &Path,
    registry: &ExtractorRegistry,
    predicate: &Predicate,
) -> Option<String> {
    let extracted = registry.extract(path);
    let content = extracted.as_text()?;
    if !predicate.matches(content) {
        return None;
    }
    Some(snippet::extract(content, predicate))
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}
