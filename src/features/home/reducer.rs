use std::collections::BTreeSet;

use crate::catalog::SharedCatalog;
use crate::domain::{apply_favorites, Movie, MovieCategory};
use crate::favorites::FavoritesStore;
use crate::features::FAVORITES_OBSERVER;
use crate::mvi::{Effects, ReduceError, Reducer, Transition};

use super::intent::HomeIntent;
use super::state::{CategoryState, HomeState};

/// First page is all the home screen shows.
const FIRST_PAGE: u32 = 1;

pub struct HomeReducer {
    catalog: SharedCatalog,
    favorites: FavoritesStore,
}

impl HomeReducer {
    pub fn new(catalog: SharedCatalog, favorites: FavoritesStore) -> Self {
        Self { catalog, favorites }
    }

    fn observe_favorites(&self, effects: &mut Effects<HomeIntent>) {
        if effects.is_running(FAVORITES_OBSERVER) {
            return;
        }
        let mut watch = self.favorites.watch();
        let publisher = effects.publisher();
        effects.spawn_keyed(FAVORITES_OBSERVER, async move {
            while let Some(favorites) = watch.next().await {
                let ids: BTreeSet<i64> = favorites.iter().map(|movie| movie.id).collect();
                publisher.publish(HomeIntent::FavoritesChanged(ids));
            }
        });
    }

    fn fetch(&self, category: MovieCategory, effects: &mut Effects<HomeIntent>) {
        let catalog = self.catalog.clone();
        let publisher = effects.publisher();
        effects.spawn_keyed(format!("home:{}", category.slug()), async move {
            match catalog.movies(category, FIRST_PAGE).await {
                Ok(movies) => publisher.publish(HomeIntent::SetCategoryMovies(category, movies)),
                Err(err) => {
                    tracing::warn!(category = %category, error = %err, "Category load failed");
                    publisher.publish(HomeIntent::SetCategoryError(
                        category,
                        err.message().to_string(),
                    ));
                }
            }
        });
    }
}

impl Reducer for HomeReducer {
    type State = HomeState;
    type Intent = HomeIntent;

    fn reduce(
        &mut self,
        state: &HomeState,
        intent: HomeIntent,
        effects: &mut Effects<HomeIntent>,
    ) -> Result<Transition<HomeState>, ReduceError> {
        match intent {
            HomeIntent::LoadAllMovies => {
                self.observe_favorites(effects);
                for category in MovieCategory::ALL {
                    effects.publish(HomeIntent::LoadCategory(category));
                }
                Ok(Transition::Unhandled)
            }
            HomeIntent::LoadCategory(category) => {
                self.fetch(category, effects);
                // Keep showing loaded movies while a reload is in flight.
                if matches!(state.movies.get(&category), Some(CategoryState::Success(_))) {
                    return Ok(Transition::Unhandled);
                }
                let mut next = state.clone();
                next.movies.insert(category, CategoryState::Loading);
                Ok(Transition::Next(next))
            }
            HomeIntent::SetCategoryMovies(category, movies) => {
                let mut next = state.clone();
                next.movies.insert(
                    category,
                    CategoryState::Success(apply_favorites(&movies, &state.favorite_ids)),
                );
                Ok(Transition::Next(next))
            }
            HomeIntent::SetCategoryError(category, message) => {
                let mut next = state.clone();
                next.movies.insert(category, CategoryState::Error(message));
                Ok(Transition::Next(next))
            }
            HomeIntent::ToggleFavorite(movie) => {
                let now_favorite = self.favorites.toggle(&movie);
                Ok(Transition::Next(toggled(state, &movie, now_favorite)))
            }
            HomeIntent::FavoritesChanged(ids) => {
                if ids == state.favorite_ids {
                    return Ok(Transition::Unhandled);
                }
                Ok(Transition::Next(state.with_favorites(ids)))
            }
            HomeIntent::Refresh => {
                effects.publish(HomeIntent::LoadAllMovies);
                Ok(Transition::Unhandled)
            }
        }
    }
}

fn toggled(state: &HomeState, movie: &Movie, now_favorite: bool) -> HomeState {
    let mut ids = state.favorite_ids.clone();
    if now_favorite {
        ids.insert(movie.id);
    } else {
        ids.remove(&movie.id);
    }
    state.with_favorites(ids)
}
