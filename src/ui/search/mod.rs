//! Movie search feature module.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `intent.rs` - What the screen asks for (load, search, add, restore)
//! - `outcome.rs` - Results of running those intents against the repository
//! - `state.rs` - Everything the screen renders
//! - `effect.rs` - One-shot notifications (toast)
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `view_model.rs` - Runs repository calls and publishes state/effects

mod effect;
mod intent;
mod outcome;
mod reducer;
mod state;
mod view_model;

pub use effect::MovieSearchEffect;
pub use intent::MovieSearchIntent;
pub use outcome::{Lce, SearchOutcome};
pub use reducer::{MovieSearchReducer, SEARCHING_TITLE};
pub use state::MovieSearchViewState;
pub use view_model::{IntentSink, MovieSearchViewModel, ScreenBindings, ViewModelError, ViewModelInput};
