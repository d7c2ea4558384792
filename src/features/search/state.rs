use std::collections::BTreeSet;

use crate::domain::{apply_favorites, Movie};
use crate::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    /// Trimmed query last typed by the user.
    pub query: String,
    pub results: Vec<Movie>,
    pub is_searching: bool,
    pub error: Option<String>,
    pub favorite_ids: BTreeSet<i64>,
}

impl UiState for SearchState {}

impl SearchState {
    /// Copy with `results` re-flagged against `favorite_ids`.
    pub fn with_favorite_status(&self) -> SearchState {
        SearchState {
            results: apply_favorites(&self.results, &self.favorite_ids),
            ..self.clone()
        }
    }
}
