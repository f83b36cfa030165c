//! View-model flows against real and scripted repositories.

mod common;

use common::*;
use moviesearch::movies::{
    CatalogRepository, HistoryStore, MovieRepository, MovieSearchResult, RepositoryError,
};
use moviesearch::ui::search::{
    IntentSink, MovieSearchEffect, MovieSearchIntent, MovieSearchViewModel, MovieSearchViewState,
    SEARCHING_TITLE,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::watch;

fn catalog() -> Arc<dyn MovieRepository> {
    Arc::new(
        CatalogRepository::builtin(HistoryStore::in_memory(5)).expect("built-in catalog loads"),
    )
}

async fn wait_state(
    rx: &mut watch::Receiver<MovieSearchViewState>,
    wanted: impl FnMut(&MovieSearchViewState) -> bool,
) -> MovieSearchViewState {
    tokio::time::timeout(WAIT, rx.wait_for(wanted))
        .await
        .expect("timed out waiting for view state")
        .expect("view-model stopped")
        .clone()
}

fn search(query: &str) -> MovieSearchIntent {
    MovieSearchIntent::SearchRequested {
        query: query.to_string(),
    }
}

/// Answers after a per-title delay so searches can overlap.
struct ScriptedRepository;

impl MovieRepository for ScriptedRepository {
    fn search_movie(&self, title: &str) -> Result<MovieSearchResult, RepositoryError> {
        if title == "slow" {
            std::thread::sleep(Duration::from_millis(300));
            return Ok(movie("tt-slow", "Slow Movie"));
        }
        Ok(movie("tt-fast", "Fast Movie"))
    }

    fn history(&self) -> Result<Vec<MovieSearchResult>, RepositoryError> {
        Ok(Vec::new())
    }

    fn add_to_history(
        &self,
        movie: MovieSearchResult,
    ) -> Result<Vec<MovieSearchResult>, RepositoryError> {
        Ok(vec![movie])
    }
}

#[tokio::test]
async fn screen_loaded_publishes_stored_history() {
    let repository = catalog();
    let inception = repository.search_movie("Inception").expect("in catalog");
    repository
        .add_to_history(inception.clone())
        .expect("in-memory append");

    let vm = MovieSearchViewModel::spawn(repository);
    let mut state = vm.view_state();
    vm.process_input(MovieSearchIntent::ScreenLoaded)
        .expect("view-model running");

    let loaded = wait_state(&mut state, |s| !s.history.is_empty()).await;
    assert_eq!(loaded.history, vec![inception]);
    assert_eq!(loaded.search_box_text, None);
}

#[tokio::test]
async fn search_finds_catalog_movie() {
    let vm = MovieSearchViewModel::spawn(catalog());
    let mut state = vm.view_state();
    vm.process_input(search("  inception ")).expect("running");

    let found = wait_state(&mut state, |s| s.movie_title == "Inception").await;
    assert_eq!(found.rating, "8.8/10 (Internet Movie Database)");
    assert!(found.has_poster());
    let movie = found.searched_movie.expect("movie attached");
    assert_eq!(movie.id, "tt1375666");
    assert_eq!(movie.searched_title, "inception");
}

#[tokio::test]
async fn search_shows_loading_until_result_arrives() {
    let vm = MovieSearchViewModel::spawn(Arc::new(ScriptedRepository));
    let mut state = vm.view_state();
    vm.process_input(search("slow")).expect("running");

    let loading = wait_state(&mut state, |s| s.movie_title == SEARCHING_TITLE).await;
    assert!(loading.rating.is_empty());
    assert!(!loading.has_poster());
    assert!(loading.searched_movie.is_none());

    let found = wait_state(&mut state, |s| s.movie_title == "Slow Movie").await;
    assert_eq!(found.rating, "8.0/10 (Internet Movie Database)");
}

#[tokio::test]
async fn unknown_title_shows_error_as_title() {
    let vm = MovieSearchViewModel::spawn(catalog());
    let mut state = vm.view_state();
    vm.process_input(search("No Such Film")).expect("running");

    let failed = wait_state(&mut state, |s| s.movie_title.starts_with("Movie not found")).await;
    assert_eq!(failed.movie_title, "Movie not found: No Such Film");
    assert!(failed.searched_movie.is_none());
    assert!(!failed.has_poster());
}

#[tokio::test]
async fn blank_search_is_ignored() {
    let vm = MovieSearchViewModel::spawn(catalog());
    let mut state = vm.view_state();
    state.borrow_and_update();

    vm.process_input(search("   ")).expect("running");
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(!state.has_changed().expect("view-model running"));
}

#[tokio::test]
async fn add_to_history_updates_state_and_emits_effect() {
    let vm = MovieSearchViewModel::spawn(catalog());
    let mut state = vm.view_state();
    let mut effects = vm.view_effects();
    let alien = movie("tt0078748", "Alien");

    vm.process_input(MovieSearchIntent::AddToHistoryRequested {
        movie: alien.clone(),
    })
    .expect("running");

    let effect = tokio::time::timeout(WAIT, effects.recv())
        .await
        .expect("effect in time")
        .expect("effect channel open");
    assert_eq!(effect, MovieSearchEffect::AddedToHistory);
    let updated = wait_state(&mut state, |s| s.history.len() == 1).await;
    assert_eq!(updated.history[0], alien);

    // Same id again: list unchanged, effect still fires.
    vm.process_input(MovieSearchIntent::AddToHistoryRequested { movie: alien })
        .expect("running");
    let effect = tokio::time::timeout(WAIT, effects.recv())
        .await
        .expect("effect in time")
        .expect("effect channel open");
    assert_eq!(effect, MovieSearchEffect::AddedToHistory);
    assert_eq!(state.borrow().history.len(), 1);
}

#[tokio::test]
async fn effects_are_not_replayed_to_late_subscribers() {
    let vm = MovieSearchViewModel::spawn(catalog());
    let mut early = vm.view_effects();
    vm.process_input(MovieSearchIntent::AddToHistoryRequested {
        movie: movie("tt0078748", "Alien"),
    })
    .expect("running");
    tokio::time::timeout(WAIT, early.recv())
        .await
        .expect("effect in time")
        .expect("effect channel open");

    let mut late = vm.view_effects();
    assert!(matches!(late.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn restore_puts_searched_title_back_in_the_box() {
    let vm = MovieSearchViewModel::spawn(catalog());
    let mut state = vm.view_state();
    let mut entry = movie("tt0078748", "Alien");
    entry.searched_title = "alie".to_string();

    vm.process_input(MovieSearchIntent::RestoreFromHistoryRequested { entry })
        .expect("running");

    let restored = wait_state(&mut state, |s| s.search_box_text.is_some()).await;
    assert_eq!(restored.search_box_text.as_deref(), Some("alie"));
}

#[tokio::test]
async fn newer_search_discards_older_result() {
    let vm = MovieSearchViewModel::spawn(Arc::new(ScriptedRepository));
    let mut state = vm.view_state();

    vm.process_input(search("slow")).expect("running");
    vm.process_input(search("fast")).expect("running");

    wait_state(&mut state, |s| s.movie_title == "Fast Movie").await;
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(state.borrow().movie_title, "Fast Movie");
    assert_eq!(
        state.borrow().searched_movie.as_ref().map(|m| m.id.as_str()),
        Some("tt-fast")
    );
}

#[tokio::test]
async fn restore_cancels_in_flight_search() {
    let vm = MovieSearchViewModel::spawn(Arc::new(ScriptedRepository));
    let mut state = vm.view_state();

    vm.process_input(search("slow")).expect("running");
    wait_state(&mut state, |s| s.movie_title == SEARCHING_TITLE).await;
    vm.process_input(MovieSearchIntent::RestoreFromHistoryRequested {
        entry: movie("tt0078748", "Alien"),
    })
    .expect("running");

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_ne!(state.borrow().movie_title, "Slow Movie");
    assert_eq!(state.borrow().search_box_text.as_deref(), Some("alien"));
}

#[tokio::test]
async fn dropping_view_model_closes_streams() {
    let vm = MovieSearchViewModel::spawn(catalog());
    let mut state = vm.view_state();
    let input = vm.input();
    drop(vm);

    let closed = tokio::time::timeout(WAIT, state.changed())
        .await
        .expect("state stream should close");
    assert!(closed.is_err());

    let mut result = Ok(());
    for _ in 0..20 {
        result = input.process_input(MovieSearchIntent::ScreenLoaded);
        if result.is_err() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(result.is_err());
}
