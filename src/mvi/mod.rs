//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides the base traits for unidirectional data flow and
//! the [`Store`] that serialises every state transition of one feature
//! through a single processing task.
//!
//! # Architecture
//!
//! ```text
//!            publish                 reduce
//! Intent ─────────────→ queue ─────────────→ Reducer ──→ State ──→ subscribers
//!    ↑                                          │
//!    └────────── Effects (spawned work) ←───────┘
//! ```
//!
//! - **State**: Immutable representation of a feature's rendering data
//! - **Intent**: User actions or system notifications
//! - **Reducer**: Maps (State, Intent) to the next State, optionally
//!   scheduling background work through [`Effects`]
//! - **Store**: Owns the state, drains the queue and notifies subscribers

mod effects;
mod intent;
mod reducer;
mod state;
mod store;
mod stream;

pub use effects::{Effects, Publisher};
pub use intent::Intent;
pub use reducer::{ReduceError, Reducer, Transition};
pub use state::UiState;
pub use store::{Store, StoreError};
pub use stream::StateStream;
