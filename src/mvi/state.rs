//! Base trait for state in MVI architecture.

/// Marker trait for state objects.
///
/// States are plain values: cloned to snapshot, compared to detect changes.
pub trait State: Clone + PartialEq + Default + Send + 'static {}
