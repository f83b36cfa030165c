//! Screen controller for movie search.
//!
//! Binds the screen lifecycle to the view-model:
//! - while active (`on_resume` .. `on_pause`) user activations become
//!   intents on one merged stream, see [`IntentSubscription`]
//! - for the whole life of the screen, view states are rendered into
//!   [`ScreenWidgets`] and view effects are shown once
//!
//! Everything here runs on the UI loop; background work (poster decoding,
//! repository calls) only reaches the widgets through [`ScreenEvent`]s.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, watch};

use crate::config::UiConfig;
use crate::movies::MovieSearchResult;
use crate::ui::history_strip::HistoryStrip;
use crate::ui::intent_bus::IntentSubscription;
use crate::ui::poster::{PosterEvent, PosterLoader, PosterView};
use crate::ui::search::{
    IntentSink, MovieSearchEffect, MovieSearchIntent, MovieSearchViewState, ScreenBindings,
};

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const POSTER_PULSE_TICKS: u8 = 2;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Focus {
    #[default]
    SearchBox,
    SearchButton,
    Poster,
    History,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::SearchBox => Focus::SearchButton,
            Focus::SearchButton => Focus::Poster,
            Focus::Poster => Focus::History,
            Focus::History => Focus::SearchBox,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::SearchBox => Focus::History,
            Focus::SearchButton => Focus::SearchBox,
            Focus::Poster => Focus::SearchButton,
            Focus::History => Focus::Poster,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: &'static str,
    expires_at: Instant,
}

/// On-screen widget values, as last written by [`MovieSearchScreen::render`].
#[derive(Debug, Default)]
pub struct ScreenWidgets {
    pub search_text: String,
    pub title: String,
    pub rating: String,
    pub poster: PosterView,
    pub history: HistoryStrip,
}

/// Something delivered to the UI loop from outside it.
#[derive(Debug)]
pub enum ScreenEvent {
    ViewState(MovieSearchViewState),
    ViewStateClosed,
    Effect(MovieSearchEffect),
    EffectsLagged(u64),
    EffectsClosed,
    Poster(PosterEvent),
}

pub struct MovieSearchScreen {
    sink: Arc<dyn IntentSink>,
    intents: Option<IntentSubscription>,
    view_state: Option<watch::Receiver<MovieSearchViewState>>,
    view_effects: Option<broadcast::Receiver<MovieSearchEffect>>,
    posters: PosterLoader,
    poster_events: mpsc::UnboundedReceiver<PosterEvent>,
    poster_generation: u64,
    /// Movie behind the poster; `None` keeps the poster non-interactive.
    poster_movie: Option<MovieSearchResult>,
    widgets: ScreenWidgets,
    focus: Focus,
    toast: Option<Toast>,
    toast_duration: Duration,
    poster_pulse: u8,
    spinner_frame: usize,
    should_quit: bool,
}

impl MovieSearchScreen {
    /// Create the screen and subscribe to both view-model streams.
    ///
    /// The latest view state is rendered immediately. Must be called from
    /// within a tokio runtime.
    pub fn new(bindings: ScreenBindings, config: &UiConfig) -> Self {
        let ScreenBindings {
            input,
            mut view_state,
            view_effects,
        } = bindings;
        let initial = view_state.borrow_and_update().clone();
        let (posters, poster_events) = PosterLoader::new();

        let mut screen = Self {
            sink: input,
            intents: None,
            view_state: Some(view_state),
            view_effects: Some(view_effects),
            posters,
            poster_events,
            poster_generation: 0,
            poster_movie: None,
            widgets: ScreenWidgets::default(),
            focus: Focus::default(),
            toast: None,
            toast_duration: config.toast_duration(),
            poster_pulse: 0,
            spinner_frame: 0,
            should_quit: false,
        };
        screen.render(&initial);
        screen
    }

    pub fn widgets(&self) -> &ScreenWidgets {
        &self.widgets
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn is_active(&self) -> bool {
        self.intents.is_some()
    }

    pub fn is_subscribed(&self) -> bool {
        self.view_state.is_some() || self.view_effects.is_some()
    }

    pub fn poster_movie(&self) -> Option<&MovieSearchResult> {
        self.poster_movie.as_ref()
    }

    pub fn poster_is_interactive(&self) -> bool {
        self.poster_movie.is_some()
    }

    pub fn poster_pulse_active(&self) -> bool {
        self.poster_pulse > 0
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    // -- Lifecycle ------------------------------------------------------------

    /// Screen became active: open a fresh intent stream led by `ScreenLoaded`.
    pub fn on_resume(&mut self) {
        if self.intents.is_some() {
            return;
        }
        tracing::debug!("screen resumed");
        self.intents = Some(IntentSubscription::start(Arc::clone(&self.sink)));
    }

    /// Screen became inactive: stop forwarding intents.
    pub fn on_pause(&mut self) {
        if let Some(intents) = self.intents.take() {
            tracing::debug!("screen paused");
            intents.cancel();
        }
    }

    /// Screen is going away: stop forwarding and release both subscriptions.
    pub fn on_destroy(&mut self) {
        self.on_pause();
        self.view_state = None;
        self.view_effects = None;
    }

    // -- Intent sources -------------------------------------------------------

    fn emit(&self, intent: MovieSearchIntent) {
        match &self.intents {
            Some(intents) => intents.emit(intent),
            None => tracing::debug!(?intent, "screen inactive; intent dropped"),
        }
    }

    pub fn on_search_clicked(&mut self) {
        self.emit(MovieSearchIntent::SearchRequested {
            query: self.widgets.search_text.clone(),
        });
    }

    pub fn on_poster_clicked(&mut self) {
        let Some(movie) = self.poster_movie.clone() else {
            tracing::trace!("poster has no movie; ignoring activation");
            return;
        };
        self.poster_pulse = POSTER_PULSE_TICKS;
        self.emit(MovieSearchIntent::AddToHistoryRequested { movie });
    }

    /// Enter on the history strip.
    pub fn on_history_activated(&mut self) {
        if let Some(intent) = self.widgets.history.activate_selected() {
            self.emit(intent);
        }
    }

    /// Click inside the history strip drawn at `area`.
    pub fn on_history_clicked(&mut self, area: ratatui::layout::Rect, col: u16, row: u16) {
        self.focus = Focus::History;
        if let Some(intent) = self.widgets.history.activate_at(area, col, row) {
            self.emit(intent);
        }
    }

    pub fn history_select_next(&mut self) {
        self.widgets.history.select_next();
    }

    pub fn history_select_previous(&mut self) {
        self.widgets.history.select_previous();
    }

    // -- Search box editing ---------------------------------------------------

    pub fn set_search_text(&mut self, text: &str) {
        self.widgets.search_text = text.to_string();
    }

    pub fn insert_char(&mut self, ch: char) {
        self.widgets.search_text.push(ch);
    }

    pub fn delete_char(&mut self) {
        self.widgets.search_text.pop();
    }

    pub fn on_paste(&mut self, text: &str) {
        if self.focus != Focus::SearchBox {
            return;
        }
        self.widgets
            .search_text
            .extend(text.chars().filter(|ch| !ch.is_control()));
    }

    // -- Rendering ------------------------------------------------------------

    /// Write a view state into the widgets. Safe to repeat with the same state.
    pub fn render(&mut self, state: &MovieSearchViewState) {
        if let Some(text) = &state.search_box_text {
            self.widgets.search_text = text.clone();
        }

        self.widgets.title = state.movie_title.clone();
        self.widgets.rating = state.rating.clone();

        if state.has_poster() {
            if self.widgets.poster.url() != Some(state.poster_url.as_str()) {
                self.poster_generation += 1;
                self.widgets.poster = PosterView::Loading {
                    url: state.poster_url.clone(),
                };
                self.posters
                    .load(state.poster_url.clone(), self.poster_generation);
            }
            self.poster_movie = state.searched_movie.clone();
        } else {
            if self.widgets.poster != PosterView::Empty {
                self.poster_generation += 1;
            }
            self.widgets.poster = PosterView::Empty;
            self.poster_movie = None;
        }

        self.widgets.history.submit_list(state.history.clone());
    }

    /// Show a one-shot effect.
    pub fn trigger(&mut self, effect: MovieSearchEffect) {
        match effect {
            MovieSearchEffect::AddedToHistory => self.show_toast(effect.message()),
        }
    }

    fn show_toast(&mut self, message: &'static str) {
        self.toast = Some(Toast {
            message,
            expires_at: Instant::now() + self.toast_duration,
        });
    }

    fn apply_poster(&mut self, event: PosterEvent) {
        if event.generation != self.poster_generation {
            tracing::trace!(url = %event.url, "discarding stale poster load");
            return;
        }
        self.widgets.poster = match event.result {
            Ok(art) => PosterView::Ready {
                url: event.url,
                art,
            },
            Err(err) => {
                tracing::debug!(url = %event.url, error = %err, "poster unavailable");
                PosterView::Unavailable {
                    url: event.url,
                    reason: err.to_string(),
                }
            }
        };
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| now >= toast.expires_at)
        {
            self.toast = None;
        }
        self.poster_pulse = self.poster_pulse.saturating_sub(1);
        if self.widgets.poster.is_loading() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    // -- Stream delivery ------------------------------------------------------

    /// Wait for the next state, effect or poster completion.
    ///
    /// Cancel-safe, so it can sit in a `tokio::select!` next to terminal input.
    pub async fn next_event(&mut self) -> ScreenEvent {
        tokio::select! {
            state = next_state(&mut self.view_state) => match state {
                Some(state) => ScreenEvent::ViewState(state),
                None => ScreenEvent::ViewStateClosed,
            },
            event = next_effect(&mut self.view_effects) => event,
            Some(event) = self.poster_events.recv() => ScreenEvent::Poster(event),
        }
    }

    pub fn apply(&mut self, event: ScreenEvent) {
        match event {
            ScreenEvent::ViewState(state) => {
                tracing::debug!(?state, "view state");
                self.render(&state);
            }
            ScreenEvent::ViewStateClosed => {
                tracing::warn!("view state stream ended; keeping last rendered state");
                self.view_state = None;
            }
            ScreenEvent::Effect(effect) => self.trigger(effect),
            ScreenEvent::EffectsLagged(skipped) => {
                tracing::warn!(skipped, "view effects lagged; some effects were dropped");
            }
            ScreenEvent::EffectsClosed => {
                tracing::warn!("view effect stream ended");
                self.view_effects = None;
            }
            ScreenEvent::Poster(event) => self.apply_poster(event),
        }
    }

    /// `next_event` followed by `apply`.
    pub async fn handle_next_event(&mut self) {
        let event = self.next_event().await;
        self.apply(event);
    }
}

async fn next_state(
    receiver: &mut Option<watch::Receiver<MovieSearchViewState>>,
) -> Option<MovieSearchViewState> {
    let Some(receiver) = receiver.as_mut() else {
        return std::future::pending().await;
    };
    match receiver.changed().await {
        Ok(()) => Some(receiver.borrow_and_update().clone()),
        Err(_) => None,
    }
}

async fn next_effect(receiver: &mut Option<broadcast::Receiver<MovieSearchEffect>>) -> ScreenEvent {
    let Some(receiver) = receiver.as_mut() else {
        return std::future::pending().await;
    };
    match receiver.recv().await {
        Ok(effect) => ScreenEvent::Effect(effect),
        Err(RecvError::Lagged(skipped)) => ScreenEvent::EffectsLagged(skipped),
        Err(RecvError::Closed) => ScreenEvent::EffectsClosed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_both_ways() {
        let mut focus = Focus::SearchBox;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::SearchBox);
        assert_eq!(Focus::SearchBox.previous(), Focus::History);
        assert_eq!(Focus::History.next(), Focus::SearchBox);
    }
}
