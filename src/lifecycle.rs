use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Teardown signal shared between a store and its processing task.
///
/// Closing is one-way: once closed, a lifecycle never reopens.
#[derive(Clone, Default)]
pub struct Lifecycle {
    closed: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the lifecycle. Returns true for the call that actually closed it.
    pub fn close(&self) -> bool {
        if self.closed.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.notify.notify_waiters();
        true
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Resolve once the lifecycle is closed.
    pub async fn closed(&self) {
        // Register with Notify before reading the flag: a close() landing
        // between the check and the await would otherwise be missed.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_closed() {
            return;
        }
        notified.await;
    }
}
