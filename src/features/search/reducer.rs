use std::collections::BTreeSet;
use std::time::Duration;

use crate::catalog::SharedCatalog;
use crate::config::SearchConfig;
use crate::domain::apply_favorites;
use crate::favorites::FavoritesStore;
use crate::features::FAVORITES_OBSERVER;
use crate::mvi::{Effects, ReduceError, Reducer, Transition};

use super::intent::SearchIntent;
use super::state::SearchState;

const SEARCH_TASK: &str = "search";
const FIRST_PAGE: u32 = 1;

/// Search screen reducer.
///
/// Queries are debounced: each `PerformSearch` restarts a quiet period and
/// only the query still current when it ends reaches the catalog. A query
/// identical to the last dispatched one is not sent again.
pub struct SearchReducer {
    catalog: SharedCatalog,
    favorites: FavoritesStore,
    debounce: Duration,
    last_query: Option<String>,
}

impl SearchReducer {
    pub fn new(catalog: SharedCatalog, favorites: FavoritesStore, config: &SearchConfig) -> Self {
        Self {
            catalog,
            favorites,
            debounce: Duration::from_millis(config.debounce_ms),
            last_query: None,
        }
    }

    fn observe_favorites(&self, effects: &mut Effects<SearchIntent>) {
        if effects.is_running(FAVORITES_OBSERVER) {
            return;
        }
        let mut watch = self.favorites.watch();
        let publisher = effects.publisher();
        effects.spawn_keyed(FAVORITES_OBSERVER, async move {
            while let Some(favorites) = watch.next().await {
                let ids = favorites.iter().map(|movie| movie.id).collect();
                publisher.publish(SearchIntent::SetFavoriteMovies(ids));
            }
        });
    }

    fn schedule(&mut self, query: String, effects: &mut Effects<SearchIntent>) {
        self.last_query = Some(query.clone());
        let catalog = self.catalog.clone();
        let publisher = effects.publisher();
        let debounce = self.debounce;
        effects.spawn_keyed(SEARCH_TASK, async move {
            tokio::time::sleep(debounce).await;
            publisher.publish(SearchIntent::SetSearching(true));
            match catalog.search(&query, FIRST_PAGE).await {
                Ok(movies) => {
                    tracing::debug!(query = %query, count = movies.len(), "Search completed");
                    publisher.publish(SearchIntent::SetSearchResults(movies));
                }
                Err(err) => {
                    tracing::warn!(query = %query, error = %err, "Search failed");
                    publisher.publish(SearchIntent::SetSearchError(err.message().to_string()));
                }
            }
            publisher.publish(SearchIntent::SetSearching(false));
        });
    }
}

impl Reducer for SearchReducer {
    type State = SearchState;
    type Intent = SearchIntent;

    fn reduce(
        &mut self,
        state: &SearchState,
        intent: SearchIntent,
        effects: &mut Effects<SearchIntent>,
    ) -> Result<Transition<SearchState>, ReduceError> {
        match intent {
            SearchIntent::PerformSearch(raw) => {
                let query = raw.trim();
                if query.is_empty() {
                    effects.publish(SearchIntent::ClearSearch);
                    return Ok(Transition::Unhandled);
                }
                self.observe_favorites(effects);
                if self.last_query.as_deref() != Some(query) {
                    self.schedule(query.to_string(), effects);
                }
                if state.query == query {
                    return Ok(Transition::Unhandled);
                }
                Ok(Transition::Next(SearchState {
                    query: query.to_string(),
                    ..state.clone()
                }))
            }
            SearchIntent::SetSearching(is_searching) => Ok(Transition::Next(SearchState {
                is_searching,
                error: if is_searching { None } else { state.error.clone() },
                ..state.clone()
            })),
            SearchIntent::SetSearchResults(movies) => Ok(Transition::Next(SearchState {
                results: apply_favorites(&movies, &state.favorite_ids),
                error: None,
                ..state.clone()
            })),
            // Previous results stay visible under the error.
            SearchIntent::SetSearchError(message) => Ok(Transition::Next(SearchState {
                is_searching: false,
                error: Some(message),
                ..state.clone()
            })),
            SearchIntent::ClearSearchError => {
                if state.error.is_none() {
                    return Ok(Transition::Unhandled);
                }
                Ok(Transition::Next(SearchState {
                    error: None,
                    ..state.clone()
                }))
            }
            SearchIntent::ClearSearch => {
                effects.cancel(SEARCH_TASK);
                self.last_query = None;
                Ok(Transition::Next(SearchState {
                    favorite_ids: state.favorite_ids.clone(),
                    ..SearchState::default()
                }))
            }
            SearchIntent::ObserveFavorites => {
                self.observe_favorites(effects);
                Ok(Transition::Unhandled)
            }
            SearchIntent::SetFavoriteMovies(ids) => {
                if ids == state.favorite_ids {
                    return Ok(Transition::Unhandled);
                }
                Ok(Transition::Next(with_ids(state, ids)))
            }
            SearchIntent::ToggleFavorite(movie) => {
                let mut ids = state.favorite_ids.clone();
                if self.favorites.toggle(&movie) {
                    ids.insert(movie.id);
                } else {
                    ids.remove(&movie.id);
                }
                Ok(Transition::Next(with_ids(state, ids)))
            }
        }
    }
}

fn with_ids(state: &SearchState, favorite_ids: BTreeSet<i64>) -> SearchState {
    SearchState {
        favorite_ids,
        ..state.clone()
    }
    .with_favorite_status()
}
