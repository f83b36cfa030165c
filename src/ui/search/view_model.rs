//! View-model for the movie search screen.
//!
//! One task owns the state. It drains the intent channel, runs repository
//! calls on the blocking pool, folds their results through
//! [`MovieSearchReducer`] and publishes:
//! - state on a `watch` channel (new subscribers see the latest value)
//! - effects on a `broadcast` channel (subscribers only see effects sent
//!   after they subscribed, so nothing is replayed)
//!
//! Searches are switch-latest: a newer search or a history restore makes an
//! in-flight search stale and its result is dropped. History reads and
//! appends run one at a time on a dedicated task so their results arrive in
//! request order.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use crate::movies::{MovieRepository, MovieSearchResult};
use crate::ui::mvi::Reducer;

use super::effect::MovieSearchEffect;
use super::intent::MovieSearchIntent;
use super::outcome::{Lce, SearchOutcome};
use super::reducer::MovieSearchReducer;
use super::state::MovieSearchViewState;

const EFFECT_BUFFER: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewModelError {
    #[error("view-model input channel closed")]
    Closed,
}

/// Single input channel of a view-model.
pub trait IntentSink: Send + Sync + 'static {
    fn process_input(&self, intent: MovieSearchIntent) -> Result<(), ViewModelError>;
}

/// Cloneable producer side of the view-model's intent channel.
#[derive(Clone)]
pub struct ViewModelInput {
    sender: mpsc::UnboundedSender<MovieSearchIntent>,
}

impl IntentSink for ViewModelInput {
    fn process_input(&self, intent: MovieSearchIntent) -> Result<(), ViewModelError> {
        self.sender.send(intent).map_err(|_| ViewModelError::Closed)
    }
}

/// What a screen needs to bind to a view-model.
pub struct ScreenBindings {
    pub input: Arc<dyn IntentSink>,
    pub view_state: watch::Receiver<MovieSearchViewState>,
    pub view_effects: broadcast::Receiver<MovieSearchEffect>,
}

pub struct MovieSearchViewModel {
    input: ViewModelInput,
    state: watch::Receiver<MovieSearchViewState>,
    effects: broadcast::Sender<MovieSearchEffect>,
    task: JoinHandle<()>,
    history_task: JoinHandle<()>,
}

impl MovieSearchViewModel {
    /// Start the view-model on the current tokio runtime.
    pub fn spawn(repository: Arc<dyn MovieRepository>) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(MovieSearchViewState::default());
        let (effect_tx, _) = broadcast::channel(EFFECT_BUFFER);
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (history_tx, history_rx) = mpsc::unbounded_channel();

        let history_task = tokio::spawn(run_history_jobs(
            Arc::clone(&repository),
            history_rx,
            completion_tx.clone(),
        ));

        let processor = Processor {
            repository,
            state: MovieSearchViewState::default(),
            state_tx,
            effect_tx: effect_tx.clone(),
            completion_tx,
            history_jobs: history_tx,
            search_generation: 0,
            in_flight: None,
        };
        let task = tokio::spawn(processor.run(input_rx, completion_rx));

        Self {
            input: ViewModelInput { sender: input_tx },
            state: state_rx,
            effects: effect_tx,
            task,
            history_task,
        }
    }

    pub fn process_input(&self, intent: MovieSearchIntent) -> Result<(), ViewModelError> {
        self.input.process_input(intent)
    }

    pub fn input(&self) -> ViewModelInput {
        self.input.clone()
    }

    pub fn view_state(&self) -> watch::Receiver<MovieSearchViewState> {
        self.state.clone()
    }

    pub fn view_effects(&self) -> broadcast::Receiver<MovieSearchEffect> {
        self.effects.subscribe()
    }

    pub fn bindings(&self) -> ScreenBindings {
        ScreenBindings {
            input: Arc::new(self.input()),
            view_state: self.view_state(),
            view_effects: self.view_effects(),
        }
    }
}

impl Drop for MovieSearchViewModel {
    fn drop(&mut self) {
        self.task.abort();
        self.history_task.abort();
    }
}

enum Completion {
    Search {
        generation: u64,
        result: Lce<MovieSearchResult>,
    },
    Outcome(SearchOutcome),
}

enum HistoryJob {
    Load,
    Append(MovieSearchResult),
}

struct Processor {
    repository: Arc<dyn MovieRepository>,
    state: MovieSearchViewState,
    state_tx: watch::Sender<MovieSearchViewState>,
    effect_tx: broadcast::Sender<MovieSearchEffect>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    history_jobs: mpsc::UnboundedSender<HistoryJob>,
    search_generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl Processor {
    async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<MovieSearchIntent>,
        mut completions: mpsc::UnboundedReceiver<Completion>,
    ) {
        loop {
            tokio::select! {
                intent = intents.recv() => match intent {
                    Some(intent) => self.handle_intent(intent),
                    None => break,
                },
                Some(completion) = completions.recv() => self.handle_completion(completion),
            }
        }

        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        tracing::debug!("view-model stopped: all inputs closed");
    }

    fn handle_intent(&mut self, intent: MovieSearchIntent) {
        tracing::debug!(?intent, "processing intent");
        match intent {
            MovieSearchIntent::ScreenLoaded => self.enqueue_history(HistoryJob::Load),
            MovieSearchIntent::SearchRequested { query } => self.start_search(query),
            MovieSearchIntent::AddToHistoryRequested { movie } => {
                self.enqueue_history(HistoryJob::Append(movie))
            }
            MovieSearchIntent::RestoreFromHistoryRequested { entry } => {
                self.cancel_search();
                self.apply(SearchOutcome::RestoreFromHistory { entry });
            }
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Search { generation, result } => {
                if generation != self.search_generation {
                    tracing::trace!(generation, "discarding stale search result");
                    return;
                }
                self.in_flight = None;
                self.apply(SearchOutcome::Search(result));
            }
            Completion::Outcome(outcome) => self.apply(outcome),
        }
    }

    fn start_search(&mut self, query: String) {
        let query = query.trim().to_string();
        if query.is_empty() {
            tracing::debug!("ignoring blank search");
            return;
        }

        self.cancel_search();
        let generation = self.search_generation;
        self.apply(SearchOutcome::Search(Lce::Loading));

        let repository = Arc::clone(&self.repository);
        let completions = self.completion_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let lookup = query.clone();
            let result =
                match tokio::task::spawn_blocking(move || repository.search_movie(&lookup)).await {
                    Ok(Ok(movie)) => Lce::Content(movie),
                    Ok(Err(err)) => {
                        tracing::info!(%query, error = %err, "search failed");
                        Lce::Error(err.to_string())
                    }
                    Err(err) => {
                        tracing::error!(%query, error = %err, "search worker failed");
                        Lce::Error(format!("Search failed: {err}"))
                    }
                };
            let _ = completions.send(Completion::Search { generation, result });
        }));
    }

    fn cancel_search(&mut self) {
        self.search_generation += 1;
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }

    fn enqueue_history(&mut self, job: HistoryJob) {
        if self.history_jobs.send(job).is_err() {
            tracing::error!("history worker is gone; request dropped");
        }
    }

    fn apply(&mut self, outcome: SearchOutcome) {
        let (state, effect) = MovieSearchReducer::reduce(std::mem::take(&mut self.state), outcome);
        self.state = state;
        self.state_tx.send_replace(self.state.clone());

        if let Some(effect) = effect {
            if self.effect_tx.send(effect).is_err() {
                tracing::debug!(?effect, "no effect subscribers; effect dropped");
            }
        }
    }
}

async fn run_history_jobs(
    repository: Arc<dyn MovieRepository>,
    mut jobs: mpsc::UnboundedReceiver<HistoryJob>,
    completions: mpsc::UnboundedSender<Completion>,
) {
    while let Some(job) = jobs.recv().await {
        let repo = Arc::clone(&repository);
        let outcome = match job {
            HistoryJob::Load => match tokio::task::spawn_blocking(move || repo.history()).await {
                Ok(Ok(history)) => Some(SearchOutcome::ScreenLoad { history }),
                Ok(Err(err)) => {
                    tracing::warn!(error = %err, "failed to read history");
                    None
                }
                Err(err) => {
                    tracing::error!(error = %err, "history worker failed");
                    None
                }
            },
            HistoryJob::Append(movie) => {
                match tokio::task::spawn_blocking(move || repo.add_to_history(movie)).await {
                    Ok(Ok(history)) => Some(SearchOutcome::AddToHistory(Lce::Content(history))),
                    Ok(Err(err)) => {
                        tracing::warn!(error = %err, "failed to add to history");
                        Some(SearchOutcome::AddToHistory(Lce::Error(err.to_string())))
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "history worker failed");
                        Some(SearchOutcome::AddToHistory(Lce::Error(err.to_string())))
                    }
                }
            }
        };

        if let Some(outcome) = outcome {
            if completions.send(Completion::Outcome(outcome)).is_err() {
                break;
            }
        }
    }
}
