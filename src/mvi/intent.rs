//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents are input events (a byte arrived, the source closed) that a
/// reducer folds into a new state.
pub trait Intent: Send + 'static {}
