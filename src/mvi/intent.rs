//! Base trait for intents (user/system actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (toggling a favorite, typing a query)
/// - System events (catalog responses, favorites changes)
///
/// Intents are transient: a store hands each one to its reducer exactly
/// once and drops it afterwards.
pub trait Intent: std::fmt::Debug + Send + 'static {}
