use crate::domain::Movie;
use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesIntent {
    LoadFavorites,
    SetFavorites(Vec<Movie>),
    ToggleFavorite(Movie),
}

impl Intent for FavoritesIntent {}
