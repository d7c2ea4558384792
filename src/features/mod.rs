//! Screen logic built on [`crate::mvi`].
//!
//! Each feature is a state type, an intent enum and a reducer; [`home`]
//! also exposes a transformer from its state to a render-ready view.

pub mod favorites;
pub mod home;
pub mod search;

/// Key under which every feature runs its favorites observer.
pub(crate) const FAVORITES_OBSERVER: &str = "favorites";
