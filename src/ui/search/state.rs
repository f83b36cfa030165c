//! View state for the movie search screen.

use crate::movies::MovieSearchResult;
use crate::ui::mvi::UiState;

/// Snapshot of everything the screen displays.
///
/// Replaced wholesale on every reduction; the screen only reads it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovieSearchViewState {
    /// When set, overwrites the search box. `None` leaves the box alone.
    pub search_box_text: Option<String>,
    pub movie_title: String,
    pub rating: String,
    /// Blank means no poster.
    pub poster_url: String,
    /// Movie behind the poster, handed back on add-to-history.
    pub searched_movie: Option<MovieSearchResult>,
    /// History entries, oldest first.
    pub history: Vec<MovieSearchResult>,
}

impl UiState for MovieSearchViewState {}

impl MovieSearchViewState {
    pub fn has_poster(&self) -> bool {
        !self.poster_url.trim().is_empty()
    }
}
