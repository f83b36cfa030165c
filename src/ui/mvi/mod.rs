//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides base traits for implementing unidirectional
//! data flow in the UI layer.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ View-Model ──→ Reducer ──┬──→ State ──→ View
//!    ↑                                └──→ Effect ─→ View (once)
//!    └──────────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot of everything the view renders
//! - **Effect**: One-shot instruction that must not be replayed
//! - **Intent**: User actions or lifecycle events
//! - **Reducer**: Pure function that folds results into state and effects

mod effect;
mod intent;
mod reducer;
mod state;

pub use effect::UiEffect;
pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
