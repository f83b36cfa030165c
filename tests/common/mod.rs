//! Shared test utilities: sample movies, a recording intent sink and a
//! screen harness fed from hand-held channels.

#![allow(dead_code, unused_imports)]

use moviesearch::config::UiConfig;
use moviesearch::movies::{MovieSearchResult, Rating};
use moviesearch::ui::screen::{MovieSearchScreen, ScreenEvent};
use moviesearch::ui::search::{
    IntentSink, MovieSearchEffect, MovieSearchIntent, MovieSearchViewState, ScreenBindings,
    ViewModelError,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

pub const WAIT: Duration = Duration::from_secs(2);

pub fn movie(id: &str, title: &str) -> MovieSearchResult {
    MovieSearchResult {
        id: id.to_string(),
        title: title.to_string(),
        searched_title: title.to_lowercase(),
        ratings: vec![Rating {
            source: "Internet Movie Database".to_string(),
            value: "8.0/10".to_string(),
        }],
        poster_url: format!("https://posters.example/{id}.jpg"),
    }
}

pub fn inception() -> MovieSearchResult {
    MovieSearchResult {
        id: "tt1375666".to_string(),
        title: "Inception".to_string(),
        searched_title: "Inception".to_string(),
        ratings: vec![Rating {
            source: "Internet Movie Database".to_string(),
            value: "8.8/10".to_string(),
        }],
        poster_url: "https://posters.example/inception.jpg".to_string(),
    }
}

/// View state as the reducer produces it for a successful search.
pub fn found(movie: &MovieSearchResult, history: Vec<MovieSearchResult>) -> MovieSearchViewState {
    MovieSearchViewState {
        search_box_text: None,
        movie_title: movie.title.clone(),
        rating: movie.rating_summary(),
        poster_url: movie.poster_url.clone(),
        searched_movie: Some(movie.clone()),
        history,
    }
}

/// Records every intent it receives, optionally failing every call.
#[derive(Default)]
pub struct RecordingSink {
    received: Mutex<Vec<MovieSearchIntent>>,
    fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            received: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn received(&self) -> Vec<MovieSearchIntent> {
        self.received.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.received.lock().len()
    }

    /// Wait until at least `count` intents arrived; panics after [`WAIT`].
    pub async fn wait_for(&self, count: usize) -> Vec<MovieSearchIntent> {
        let deadline = tokio::time::Instant::now() + WAIT;
        while self.len() < count {
            if tokio::time::Instant::now() >= deadline {
                panic!(
                    "expected {count} intents, got {:?}",
                    self.received.lock().clone()
                );
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.received()
    }

    /// Give the forwarder a chance to deliver anything still queued.
    pub async fn settle(&self) -> Vec<MovieSearchIntent> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.received()
    }
}

impl IntentSink for RecordingSink {
    fn process_input(&self, intent: MovieSearchIntent) -> Result<(), ViewModelError> {
        self.received.lock().push(intent);
        if self.fail {
            return Err(ViewModelError::Closed);
        }
        Ok(())
    }
}

/// A screen bound to channels the test controls directly.
pub struct ScreenHarness {
    pub screen: MovieSearchScreen,
    pub sink: Arc<RecordingSink>,
    pub state_tx: watch::Sender<MovieSearchViewState>,
    pub effect_tx: broadcast::Sender<MovieSearchEffect>,
}

impl ScreenHarness {
    pub fn new() -> Self {
        Self::with_sink(Arc::new(RecordingSink::default()))
    }

    pub fn with_sink(sink: Arc<RecordingSink>) -> Self {
        let (state_tx, view_state) = watch::channel(MovieSearchViewState::default());
        let (effect_tx, view_effects) = broadcast::channel(8);
        let bindings = ScreenBindings {
            input: sink.clone(),
            view_state,
            view_effects,
        };
        let screen = MovieSearchScreen::new(bindings, &UiConfig::default());
        Self {
            screen,
            sink,
            state_tx,
            effect_tx,
        }
    }

    /// Publish `state` and wait until the screen has rendered it.
    pub async fn push_state(&mut self, state: MovieSearchViewState) {
        self.state_tx.send_replace(state);
        self.next_matching(|event| matches!(event, ScreenEvent::ViewState(_)))
            .await;
    }

    /// Send `effect` and wait until the screen has shown it.
    pub async fn push_effect(&mut self, effect: MovieSearchEffect) {
        self.effect_tx
            .send(effect)
            .expect("screen should be subscribed to effects");
        self.next_matching(|event| matches!(event, ScreenEvent::Effect(_)))
            .await;
    }

    /// Apply events until one matching `wanted` has been applied.
    pub async fn next_matching(&mut self, wanted: impl Fn(&ScreenEvent) -> bool) {
        loop {
            let event = tokio::time::timeout(WAIT, self.screen.next_event())
                .await
                .expect("timed out waiting for a screen event");
            let done = wanted(&event);
            self.screen.apply(event);
            if done {
                return;
            }
        }
    }

    /// Apply whatever arrives within a short window; returns how many events.
    pub async fn drain(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) =
            tokio::time::timeout(Duration::from_millis(50), self.screen.next_event()).await
        {
            self.screen.apply(event);
            count += 1;
        }
        count
    }
}
