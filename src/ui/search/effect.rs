//! One-shot effects for the movie search screen.

use crate::ui::mvi::UiEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieSearchEffect {
    /// A movie was appended to history; shown as a short toast.
    AddedToHistory,
}

impl UiEffect for MovieSearchEffect {}

impl MovieSearchEffect {
    pub fn message(&self) -> &'static str {
        match self {
            MovieSearchEffect::AddedToHistory => "added to history",
        }
    }
}
