use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{apply_favorites, Movie, MovieCategory};
use crate::mvi::UiState;

/// Load status of one category.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CategoryState {
    #[default]
    Loading,
    Success(Vec<Movie>),
    Error(String),
}

impl CategoryState {
    pub fn movies_or_empty(&self) -> &[Movie] {
        match self {
            CategoryState::Success(movies) => movies,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CategoryState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CategoryState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Home screen state: one independent status per category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeState {
    pub movies: BTreeMap<MovieCategory, CategoryState>,
    pub favorite_ids: BTreeSet<i64>,
}

impl UiState for HomeState {}

impl HomeState {
    /// Status of `category`. A category never requested counts as loading.
    pub fn category(&self, category: MovieCategory) -> &CategoryState {
        static LOADING: CategoryState = CategoryState::Loading;
        self.movies.get(&category).unwrap_or(&LOADING)
    }

    /// Whether every category in `categories` has finished loading.
    pub fn is_settled<I>(&self, categories: I) -> bool
    where
        I: IntoIterator<Item = MovieCategory>,
    {
        categories
            .into_iter()
            .all(|category| !self.category(category).is_loading())
    }

    /// Copy with every loaded movie re-flagged against `favorite_ids`.
    pub(crate) fn with_favorites(&self, favorite_ids: BTreeSet<i64>) -> HomeState {
        let movies = self
            .movies
            .iter()
            .map(|(category, status)| {
                let status = match status {
                    CategoryState::Success(movies) => {
                        CategoryState::Success(apply_favorites(movies, &favorite_ids))
                    }
                    other => other.clone(),
                };
                (*category, status)
            })
            .collect();
        HomeState {
            movies,
            favorite_ids,
        }
    }
}
