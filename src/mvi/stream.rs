//! Latest-value state feed shared by a store and its subscribers.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use super::state::UiState;

/// Current state plus the live feed of replacements.
///
/// Subscribing and replacing take the same lock, so a subscriber's
/// snapshot is always immediately followed by the next replacement.
pub(crate) struct StateCell<S> {
    inner: Mutex<CellInner<S>>,
}

struct CellInner<S> {
    current: S,
    /// `None` once the store is torn down.
    feed: Option<broadcast::Sender<S>>,
}

impl<S: UiState> StateCell<S> {
    pub(crate) fn new(initial: S, buffer: usize) -> Arc<Self> {
        let (feed, _) = broadcast::channel(buffer.max(1));
        Arc::new(Self {
            inner: Mutex::new(CellInner {
                current: initial,
                feed: Some(feed),
            }),
        })
    }

    pub(crate) fn get(&self) -> S {
        self.inner.lock().current.clone()
    }

    pub(crate) fn replace(&self, next: S) {
        let mut inner = self.inner.lock();
        inner.current = next.clone();
        if let Some(feed) = &inner.feed {
            // No receivers is fine: nobody is watching yet.
            let _ = feed.send(next);
        }
    }

    /// End the feed. Subscribers drain what is buffered, then see `None`.
    pub(crate) fn close(&self) {
        self.inner.lock().feed = None;
    }

    pub(crate) fn subscribe(&self) -> StateStream<S> {
        let inner = self.inner.lock();
        let receiver = match &inner.feed {
            Some(feed) => feed.subscribe(),
            None => broadcast::channel(1).1,
        };
        StateStream {
            pending: Some(inner.current.clone()),
            latest: inner.current.clone(),
            receiver,
        }
    }
}

/// One observer's view of a store's state.
///
/// The first call to [`next`](Self::next) yields the state at the moment
/// of subscription; later calls yield every subsequent state in emission
/// order. A subscriber that falls further behind than the store's buffer
/// skips ahead to the oldest state still buffered.
pub struct StateStream<S> {
    pending: Option<S>,
    latest: S,
    receiver: broadcast::Receiver<S>,
}

impl<S: UiState> StateStream<S> {
    /// The most recent state this subscriber has seen.
    pub fn current(&self) -> &S {
        &self.latest
    }

    /// Wait for the next state. Returns `None` once the store is gone and
    /// every buffered state has been delivered.
    pub async fn next(&mut self) -> Option<S> {
        if let Some(first) = self.pending.take() {
            return Some(first);
        }
        loop {
            match self.receiver.recv().await {
                Ok(state) => {
                    self.latest = state.clone();
                    return Some(state);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "State subscriber lagged behind");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Wait until a state satisfies `predicate`, starting with the
    /// snapshot taken at subscription if it has not been consumed yet.
    pub async fn wait_for<F>(&mut self, mut predicate: F) -> Option<S>
    where
        F: FnMut(&S) -> bool,
    {
        while let Some(state) = self.next().await {
            if predicate(&state) {
                return Some(state);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Counter(u32);

    impl UiState for Counter {}

    #[tokio::test]
    async fn first_value_is_snapshot_at_subscription() {
        let cell = StateCell::new(Counter(1), 8);
        cell.replace(Counter(2));
        let mut stream = cell.subscribe();
        cell.replace(Counter(3));

        assert_eq!(stream.current(), &Counter(2));
        assert_eq!(stream.next().await, Some(Counter(2)));
        assert_eq!(stream.next().await, Some(Counter(3)));
        assert_eq!(stream.current(), &Counter(3));
    }

    #[tokio::test]
    async fn closed_feed_ends_stream_after_buffer_drains() {
        let cell = StateCell::new(Counter(0), 8);
        let mut stream = cell.subscribe();
        cell.replace(Counter(1));
        drop(cell);

        assert_eq!(stream.next().await, Some(Counter(0)));
        assert_eq!(stream.next().await, Some(Counter(1)));
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn close_ends_existing_and_later_subscribers() {
        let cell = StateCell::new(Counter(0), 8);
        let mut early = cell.subscribe();
        cell.replace(Counter(1));
        cell.close();
        cell.replace(Counter(2));

        assert_eq!(early.next().await, Some(Counter(0)));
        assert_eq!(early.next().await, Some(Counter(1)));
        assert_eq!(early.next().await, None);

        let mut late = cell.subscribe();
        assert_eq!(late.next().await, Some(Counter(2)));
        assert_eq!(late.next().await, None);
    }

    #[tokio::test]
    async fn lagging_subscriber_skips_to_buffered_states() {
        let cell = StateCell::new(Counter(0), 2);
        let mut stream = cell.subscribe();
        for value in 1..=5 {
            cell.replace(Counter(value));
        }

        assert_eq!(stream.next().await, Some(Counter(0)));
        assert_eq!(stream.next().await, Some(Counter(4)));
        assert_eq!(stream.next().await, Some(Counter(5)));
    }

    #[tokio::test]
    async fn wait_for_checks_snapshot_first() {
        let cell = StateCell::new(Counter(9), 4);
        let mut stream = cell.subscribe();
        assert_eq!(stream.wait_for(|c| c.0 == 9).await, Some(Counter(9)));
    }
}
