use std::collections::BTreeSet;

use crate::domain::{Movie, MovieCategory};
use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum HomeIntent {
    /// Load every category and start following favorites.
    LoadAllMovies,
    LoadCategory(MovieCategory),
    SetCategoryMovies(MovieCategory, Vec<Movie>),
    SetCategoryError(MovieCategory, String),
    ToggleFavorite(Movie),
    /// Published by the favorites observer after every change.
    FavoritesChanged(BTreeSet<i64>),
    Refresh,
}

impl Intent for HomeIntent {}
