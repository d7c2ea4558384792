use crate::favorites::FavoritesStore;
use crate::features::FAVORITES_OBSERVER;
use crate::mvi::{Effects, ReduceError, Reducer, Transition};

use super::intent::FavoritesIntent;
use super::state::FavoritesState;

pub struct FavoritesReducer {
    favorites: FavoritesStore,
}

impl FavoritesReducer {
    pub fn new(favorites: FavoritesStore) -> Self {
        Self { favorites }
    }
}

impl Reducer for FavoritesReducer {
    type State = FavoritesState;
    type Intent = FavoritesIntent;

    fn reduce(
        &mut self,
        state: &FavoritesState,
        intent: FavoritesIntent,
        effects: &mut Effects<FavoritesIntent>,
    ) -> Result<Transition<FavoritesState>, ReduceError> {
        match intent {
            FavoritesIntent::LoadFavorites => {
                if effects.is_running(FAVORITES_OBSERVER) {
                    return Ok(Transition::Unhandled);
                }
                let mut watch = self.favorites.watch();
                let publisher = effects.publisher();
                effects.spawn_keyed(FAVORITES_OBSERVER, async move {
                    while let Some(favorites) = watch.next().await {
                        publisher.publish(FavoritesIntent::SetFavorites(favorites));
                    }
                });
                Ok(Transition::Next(FavoritesState {
                    is_loading: true,
                    ..state.clone()
                }))
            }
            FavoritesIntent::SetFavorites(favorites) => Ok(Transition::Next(FavoritesState {
                favorites,
                is_loading: false,
            })),
            // The observer reports the new list.
            FavoritesIntent::ToggleFavorite(movie) => {
                self.favorites.toggle(&movie);
                Ok(Transition::Unhandled)
            }
        }
    }
}
