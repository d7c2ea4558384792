use std::collections::BTreeSet;

use crate::domain::Movie;
use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchIntent {
    /// The user typed `query`. Debounced; only the latest query is sent.
    PerformSearch(String),
    SetSearching(bool),
    SetSearchResults(Vec<Movie>),
    SetSearchError(String),
    ClearSearchError,
    ClearSearch,
    ObserveFavorites,
    SetFavoriteMovies(BTreeSet<i64>),
    ToggleFavorite(Movie),
}

impl Intent for SearchIntent {}
