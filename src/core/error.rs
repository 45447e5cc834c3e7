//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// Only configuration problems surface here; per-file errors during a walk
/// (stat races, unreadable entries, decode failures) are absorbed by the
/// engine and never abort a run.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The search root does not exist or is not a directory.
    #[error("Path is not a valid directory: {0}")]
    NotADirectory(PathBuf),

    /// The pattern was empty or all whitespace.
    #[error("Search pattern must not be empty")]
    EmptyPattern,

    /// A search is already running on this engine instance. Cancel it first
    /// or use a separate engine.
    #[error("A search is already running on this engine")]
    Busy,

    /// Represents an error that occurred when a Tokio task was joined.
    /// This is often due to a task panicking or being cancelled.
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}
