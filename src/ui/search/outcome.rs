//! Results fed to [`MovieSearchReducer`](super::MovieSearchReducer).

use crate::movies::MovieSearchResult;

/// Loading / Content / Error wrapper for a background operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Lce<T> {
    Loading,
    Content(T),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// History read after the screen became active.
    ScreenLoad { history: Vec<MovieSearchResult> },

    Search(Lce<MovieSearchResult>),

    /// Updated history after an append.
    AddToHistory(Lce<Vec<MovieSearchResult>>),

    RestoreFromHistory { entry: MovieSearchResult },
}
