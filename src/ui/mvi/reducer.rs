//! Reducer trait for MVI architecture.

use super::effect::UiEffect;
use super::state::UiState;

/// Reducer transforms state based on results.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Input) -> (State, Option<Effect>)
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The result type this reducer folds into state.
    type Input: Send + 'static;

    /// The one-shot effect type this reducer may emit.
    type Effect: UiEffect;

    /// Process an input and return the new state plus an optional effect.
    ///
    /// This should be a pure function with no side effects.
    fn reduce(state: Self::State, input: Self::Input) -> (Self::State, Option<Self::Effect>);
}
