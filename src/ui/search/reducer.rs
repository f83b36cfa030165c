//! Reducer for the movie search screen.

use crate::ui::mvi::Reducer;

use super::effect::MovieSearchEffect;
use super::outcome::{Lce, SearchOutcome};
use super::state::MovieSearchViewState;

/// Title shown while a search is in flight.
pub const SEARCHING_TITLE: &str = "Searching Movie...";

/// Pure state transitions. Repository calls, logging and channel plumbing
/// live in the view-model around the dispatch call.
pub struct MovieSearchReducer;

impl Reducer for MovieSearchReducer {
    type State = MovieSearchViewState;
    type Input = SearchOutcome;
    type Effect = MovieSearchEffect;

    fn reduce(state: Self::State, input: Self::Input) -> (Self::State, Option<Self::Effect>) {
        match input {
            SearchOutcome::ScreenLoad { history } => (
                MovieSearchViewState {
                    search_box_text: None,
                    history,
                    ..state
                },
                None,
            ),

            SearchOutcome::Search(Lce::Loading) => (
                MovieSearchViewState {
                    search_box_text: None,
                    movie_title: SEARCHING_TITLE.to_string(),
                    rating: String::new(),
                    poster_url: String::new(),
                    searched_movie: None,
                    ..state
                },
                None,
            ),

            SearchOutcome::Search(Lce::Content(movie)) => (
                MovieSearchViewState {
                    search_box_text: None,
                    movie_title: movie.title.clone(),
                    rating: movie.rating_summary(),
                    poster_url: movie.poster_url.clone(),
                    searched_movie: Some(movie),
                    ..state
                },
                None,
            ),

            SearchOutcome::Search(Lce::Error(message)) => (
                MovieSearchViewState {
                    search_box_text: None,
                    movie_title: message,
                    rating: String::new(),
                    poster_url: String::new(),
                    searched_movie: None,
                    ..state
                },
                None,
            ),

            SearchOutcome::AddToHistory(Lce::Content(history)) => (
                MovieSearchViewState {
                    search_box_text: None,
                    history,
                    ..state
                },
                Some(MovieSearchEffect::AddedToHistory),
            ),

            SearchOutcome::AddToHistory(Lce::Loading | Lce::Error(_)) => (
                MovieSearchViewState {
                    search_box_text: None,
                    ..state
                },
                None,
            ),

            SearchOutcome::RestoreFromHistory { entry } => (
                MovieSearchViewState {
                    search_box_text: Some(entry.searched_title.clone()),
                    movie_title: entry.title.clone(),
                    rating: entry.rating_summary(),
                    poster_url: entry.poster_url.clone(),
                    searched_movie: Some(entry),
                    ..state
                },
                None,
            ),
        }
    }
}
