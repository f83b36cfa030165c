use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by a [`MovieRepository`](super::MovieRepository).
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The message doubles as the title shown on screen after a failed search.
    #[error("Movie not found: {title}")]
    NotFound { title: String },

    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to lock '{path}': {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid built-in catalog: {0}")]
    BuiltinCatalog(#[source] serde_json::Error),
}
