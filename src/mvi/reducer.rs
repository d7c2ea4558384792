//! Reducer trait for MVI architecture.

use thiserror::Error;

use super::effects::Effects;
use super::intent::Intent;
use super::state::UiState;

/// Outcome of reducing one intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition<S> {
    /// Replace the current state and notify subscribers.
    Next(S),
    /// No handler exists for this (state, intent) pair. The state is left
    /// untouched and subscribers are not notified.
    Unhandled,
}

impl<S> Transition<S> {
    /// Returns the next state, if any.
    pub fn into_next(self) -> Option<S> {
        match self {
            Transition::Next(state) => Some(state),
            Transition::Unhandled => None,
        }
    }
}

/// A handler failed while reducing an intent.
///
/// The store logs the failure, drops the intent and keeps processing.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ReduceError {
    message: String,
}

impl ReduceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen. The
/// returned state is computed synchronously from `state` and `intent`;
/// anything long-running goes through `effects`, whose tasks republish
/// their results as new intents.
///
/// A reducer is owned by its store's processing task, so `&mut self` is
/// never contended. Reducers use it to remember which observers they have
/// already started.
pub trait Reducer: Send + 'static {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the transition to apply.
    fn reduce(
        &mut self,
        state: &Self::State,
        intent: Self::Intent,
        effects: &mut Effects<Self::Intent>,
    ) -> Result<Transition<Self::State>, ReduceError>;
}
