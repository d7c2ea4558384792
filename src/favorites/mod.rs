//! In-memory favorites shared by every feature.
//!
//! Mutations publish a fresh snapshot through a `watch` channel, so every
//! observer sees the latest list; intermediate snapshots may be skipped by
//! slow observers, which is fine because each snapshot is complete.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::Movie;

type Snapshot = Arc<BTreeMap<i64, Movie>>;

/// Shared, clonable favorites store.
#[derive(Clone)]
pub struct FavoritesStore {
    sender: Arc<watch::Sender<Snapshot>>,
}

impl Default for FavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoritesStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Snapshot::default());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// All favorites, ordered by movie id.
    pub fn all(&self) -> Vec<Movie> {
        self.sender.borrow().values().cloned().collect()
    }

    pub fn ids(&self) -> BTreeSet<i64> {
        self.sender.borrow().keys().copied().collect()
    }

    pub fn contains(&self, movie_id: i64) -> bool {
        self.sender.borrow().contains_key(&movie_id)
    }

    pub fn len(&self) -> usize {
        self.sender.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sender.borrow().is_empty()
    }

    /// Add `movie`. Re-adding an existing favorite does not notify.
    pub fn add(&self, movie: &Movie) {
        let stored = Movie {
            is_favorite: true,
            ..movie.clone()
        };
        self.sender.send_if_modified(|favorites| {
            if favorites.get(&stored.id) == Some(&stored) {
                return false;
            }
            Arc::make_mut(favorites).insert(stored.id, stored);
            true
        });
        tracing::debug!(movie_id = movie.id, "Favorite added");
    }

    /// Remove the movie with `movie_id`. Returns true if it was a favorite.
    pub fn remove(&self, movie_id: i64) -> bool {
        let removed = self.sender.send_if_modified(|favorites| {
            if !favorites.contains_key(&movie_id) {
                return false;
            }
            Arc::make_mut(favorites).remove(&movie_id);
            true
        });
        if removed {
            tracing::debug!(movie_id, "Favorite removed");
        }
        removed
    }

    /// Flip the favorite status of `movie`. Returns the new status.
    pub fn toggle(&self, movie: &Movie) -> bool {
        let mut now_favorite = false;
        self.sender.send_modify(|favorites| {
            let favorites = Arc::make_mut(favorites);
            if favorites.remove(&movie.id).is_none() {
                favorites.insert(
                    movie.id,
                    Movie {
                        is_favorite: true,
                        ..movie.clone()
                    },
                );
                now_favorite = true;
            }
        });
        tracing::debug!(movie_id = movie.id, now_favorite, "Favorite toggled");
        now_favorite
    }

    /// Live view of the favorites list.
    pub fn watch(&self) -> FavoritesWatch {
        FavoritesWatch {
            receiver: self.sender.subscribe(),
            seen_initial: false,
        }
    }
}

/// Live-updating favorites list.
pub struct FavoritesWatch {
    receiver: watch::Receiver<Snapshot>,
    seen_initial: bool,
}

impl FavoritesWatch {
    /// The current list on the first call, then the list after each change.
    /// Returns `None` once the store is gone.
    pub async fn next(&mut self) -> Option<Vec<Movie>> {
        if self.seen_initial {
            self.receiver.changed().await.ok()?;
        } else {
            self.seen_initial = true;
        }
        let snapshot = self.receiver.borrow_and_update().clone();
        Some(snapshot.values().cloned().collect())
    }
}
