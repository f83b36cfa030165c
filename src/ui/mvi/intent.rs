//! Base trait for intents (user/system actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (button activations, list selections)
/// - Lifecycle events (screen became active)
///
/// Intents are handed to a view-model, which turns them into reducer input.
pub trait Intent: Send + 'static {}
