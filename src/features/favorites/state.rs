use crate::domain::Movie;
use crate::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FavoritesState {
    pub favorites: Vec<Movie>,
    pub is_loading: bool,
}

impl UiState for FavoritesState {}
