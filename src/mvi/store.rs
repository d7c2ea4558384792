//! The single-writer state container.

use std::any::{type_name, Any};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::config::StoreConfig;
use crate::lifecycle::Lifecycle;

use super::effects::{Effects, Publisher};
use super::reducer::{Reducer, Transition};
use super::stream::{StateCell, StateStream};

/// Errors returned by [`Store::start`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Store must be started from within a Tokio runtime")]
    NoRuntime,

    #[error("Store has been shut down")]
    Closed,
}

/// Reducer and queue waiting for the first `start()`.
struct Pending<R: Reducer> {
    reducer: R,
    receiver: mpsc::UnboundedReceiver<R::Intent>,
}

enum Phase<R: Reducer> {
    NotStarted(Pending<R>),
    Processing,
    /// Shut down before it ever started.
    Closed,
}

/// Holds one feature's state and applies intents to it one at a time.
///
/// Lifecycle: NotStarted → Processing, once, on the first [`start`].
/// Intents published before that wait in an unbounded FIFO queue and are
/// applied in call order once processing begins.
///
/// Dropping the store (or calling [`shutdown`]) stops the processing task
/// and aborts every task its reducer spawned.
///
/// [`start`]: Store::start
/// [`shutdown`]: Store::shutdown
pub struct Store<R: Reducer> {
    publisher: Publisher<R::Intent>,
    cell: Arc<StateCell<R::State>>,
    phase: Mutex<Phase<R>>,
    lifecycle: Lifecycle,
}

impl<R: Reducer> Store<R> {
    pub fn new(initial: R::State, reducer: R) -> Self {
        Self::with_config(initial, reducer, &StoreConfig::default())
    }

    pub fn with_config(initial: R::State, reducer: R, config: &StoreConfig) -> Self {
        let (publisher, receiver) = Publisher::channel();
        Self {
            publisher,
            cell: StateCell::new(initial, config.state_buffer),
            phase: Mutex::new(Phase::NotStarted(Pending { reducer, receiver })),
            lifecycle: Lifecycle::new(),
        }
    }

    /// Enqueue an intent. Never blocks.
    pub fn publish(&self, intent: R::Intent) {
        self.publisher.publish(intent);
    }

    /// A clonable handle for publishing from elsewhere.
    pub fn publisher(&self) -> Publisher<R::Intent> {
        self.publisher.clone()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> R::State {
        self.cell.get()
    }

    /// Observe the current state and every later transition.
    pub fn subscribe(&self) -> StateStream<R::State> {
        self.cell.subscribe()
    }

    /// Begin draining the queue. Later calls are no-ops.
    pub fn start(&self) -> Result<(), StoreError> {
        let mut phase = self.phase.lock();
        match *phase {
            Phase::Processing => return Ok(()),
            Phase::Closed => return Err(StoreError::Closed),
            Phase::NotStarted(_) if self.lifecycle.is_closed() => return Err(StoreError::Closed),
            Phase::NotStarted(_) => {}
        }
        let runtime = Handle::try_current().map_err(|_| StoreError::NoRuntime)?;
        let Phase::NotStarted(Pending { reducer, receiver }) =
            std::mem::replace(&mut *phase, Phase::Processing)
        else {
            return Ok(());
        };

        tracing::debug!(reducer = type_name::<R>(), "Store processing started");
        runtime.spawn(process(
            reducer,
            receiver,
            Arc::clone(&self.cell),
            self.publisher.clone(),
            self.lifecycle.clone(),
        ));
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        matches!(*self.phase.lock(), Phase::Processing)
    }

    /// Stop processing and abort outstanding effects.
    pub fn shutdown(&self) {
        if self.teardown() {
            tracing::debug!(reducer = type_name::<R>(), "Store shut down");
        }
    }

    /// Close the lifecycle. A store that never started drops its queue and
    /// ends its state feed here; a running one does so when its task exits.
    fn teardown(&self) -> bool {
        let first = self.lifecycle.close();
        let mut phase = self.phase.lock();
        if matches!(*phase, Phase::NotStarted(_)) {
            *phase = Phase::Closed;
            self.cell.close();
        }
        first
    }
}

impl<R: Reducer> Drop for Store<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn process<R: Reducer>(
    mut reducer: R,
    mut receiver: mpsc::UnboundedReceiver<R::Intent>,
    cell: Arc<StateCell<R::State>>,
    publisher: Publisher<R::Intent>,
    lifecycle: Lifecycle,
) {
    let mut effects = Effects::new(publisher);

    loop {
        tokio::select! {
            biased;

            _ = lifecycle.closed() => break,

            intent = receiver.recv() => match intent {
                Some(intent) => apply(&mut reducer, &cell, intent, &mut effects),
                None => break,
            },

            Some(joined) = effects.join_next(), if !effects.is_empty() => {
                if let Err(err) = joined {
                    if err.is_panic() {
                        let payload = err.into_panic();
                        tracing::error!(
                            reducer = type_name::<R>(),
                            panic = panic_message(payload.as_ref()),
                            "Effect task panicked"
                        );
                    }
                }
            }
        }
    }

    effects.abort_all();
    drop(receiver);
    cell.close();
    tracing::debug!(reducer = type_name::<R>(), "Store processing stopped");
}

fn apply<R: Reducer>(
    reducer: &mut R,
    cell: &StateCell<R::State>,
    intent: R::Intent,
    effects: &mut Effects<R::Intent>,
) {
    let current = cell.get();
    tracing::trace!(reducer = type_name::<R>(), intent = ?intent, "Reducing intent");

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        reducer.reduce(&current, intent, effects)
    }));

    match outcome {
        Ok(Ok(Transition::Next(next))) => cell.replace(next),
        Ok(Ok(Transition::Unhandled)) => {
            tracing::trace!(reducer = type_name::<R>(), "No handler for intent");
        }
        Ok(Err(err)) => {
            tracing::warn!(
                reducer = type_name::<R>(),
                error = %err,
                "Reducer failed, intent dropped"
            );
        }
        Err(payload) => {
            tracing::error!(
                reducer = type_name::<R>(),
                panic = panic_message(payload.as_ref()),
                "Reducer panicked, intent dropped"
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
