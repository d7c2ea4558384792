//! Background work scheduled by reducers.

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinError, JoinSet};

use super::intent::Intent;

/// Handle for submitting intents to a store's queue.
///
/// Publishing never blocks and never fails: once the store has been torn
/// down, intents are dropped with a trace log.
pub struct Publisher<I> {
    sender: mpsc::UnboundedSender<I>,
}

impl<I> Clone for Publisher<I> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<I: Intent> Publisher<I> {
    /// Create a publisher together with the receiving end of its queue.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<I>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Enqueue an intent.
    pub fn publish(&self, intent: I) {
        if let Err(err) = self.sender.send(intent) {
            tracing::trace!(intent = ?err.0, "Store closed, intent dropped");
        }
    }

    /// Whether the receiving store is gone.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Scope for work a reducer starts while handling an intent.
///
/// Every task lives in a [`JoinSet`] owned by the store's processing task.
/// Tearing the store down drops the set, which aborts whatever is still
/// running. Keyed tasks replace each other: spawning under a key that is
/// already running aborts the older task first.
pub struct Effects<I> {
    publisher: Publisher<I>,
    tasks: JoinSet<()>,
    keyed: HashMap<String, AbortHandle>,
}

impl<I: Intent> Effects<I> {
    pub fn new(publisher: Publisher<I>) -> Self {
        Self {
            publisher,
            tasks: JoinSet::new(),
            keyed: HashMap::new(),
        }
    }

    /// Enqueue a follow-up intent. It is processed after every intent
    /// already waiting in the queue.
    pub fn publish(&self, intent: I) {
        self.publisher.publish(intent);
    }

    /// A publisher for tasks that report back later.
    pub fn publisher(&self) -> Publisher<I> {
        self.publisher.clone()
    }

    /// Run `task` until it completes or the store is torn down.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.spawn(task);
    }

    /// Run `task` under `key`, aborting any task still running under it.
    pub fn spawn_keyed<F>(&mut self, key: impl Into<String>, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let key = key.into();
        if let Some(previous) = self.keyed.remove(&key) {
            if !previous.is_finished() {
                tracing::debug!(key = %key, "Replacing running effect");
                previous.abort();
            }
        }
        let handle = self.tasks.spawn(task);
        self.keyed.insert(key, handle);
    }

    /// Abort the task running under `key`. Returns true if one was running.
    pub fn cancel(&mut self, key: &str) -> bool {
        match self.keyed.remove(key) {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// Whether a task is currently running under `key`.
    pub fn is_running(&self, key: &str) -> bool {
        self.keyed
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait for the next task to finish. Returns `None` when no tasks remain.
    pub(crate) async fn join_next(&mut self) -> Option<Result<(), JoinError>> {
        let joined = self.tasks.join_next().await;
        self.keyed.retain(|_, handle| !handle.is_finished());
        joined
    }

    /// Abort every outstanding task.
    pub(crate) fn abort_all(&mut self) {
        self.keyed.clear();
        self.tasks.abort_all();
    }
}
