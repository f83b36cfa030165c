//! Intents for the movie search screen.

use crate::movies::MovieSearchResult;
use crate::ui::mvi::Intent;

/// Everything the screen can ask of the view-model.
#[derive(Debug, Clone, PartialEq)]
pub enum MovieSearchIntent {
    /// The screen became active.
    ScreenLoaded,

    /// Search button activated; carries the search box contents at that moment.
    SearchRequested { query: String },

    /// Poster activated; carries the movie currently shown on the poster.
    AddToHistoryRequested { movie: MovieSearchResult },

    /// History entry activated; carries the entry itself.
    RestoreFromHistoryRequested { entry: MovieSearchResult },
}

impl Intent for MovieSearchIntent {}
