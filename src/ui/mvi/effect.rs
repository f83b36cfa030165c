//! Base trait for one-shot effects in MVI architecture.

/// Marker trait for effect objects.
///
/// Effects are delivered on their own channel, separately from state, and
/// are consumed exactly once. Re-rendering a state never re-fires an effect.
pub trait UiEffect: Clone + Send + 'static {}
