//! Render-ready projection of [`HomeState`].

use serde::Serialize;

use crate::domain::{Movie, MovieCategory};

use super::state::HomeState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Large, horizontally paged row at the top of the screen.
    Carousel,
    Regular,
}

/// One row of the home screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSection {
    pub category: MovieCategory,
    pub kind: SectionKind,
    pub title: String,
    pub movies: Vec<Movie>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HomeView {
    pub sections: Vec<MovieSection>,
}

/// Pure mapping from state to view. Holds no state of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeTransformer;

impl HomeTransformer {
    pub fn transform(&self, state: &HomeState) -> HomeView {
        self.transform_only(state, MovieCategory::ALL)
    }

    /// Like [`transform`](Self::transform), limited to `categories`.
    pub fn transform_only<I>(&self, state: &HomeState, categories: I) -> HomeView
    where
        I: IntoIterator<Item = MovieCategory>,
    {
        let sections = categories
            .into_iter()
            .map(|category| {
                let status = state.category(category);
                let kind = match category {
                    MovieCategory::Trending => SectionKind::Carousel,
                    _ => SectionKind::Regular,
                };
                MovieSection {
                    category,
                    kind,
                    title: category.title().to_string(),
                    movies: status.movies_or_empty().to_vec(),
                    is_loading: status.is_loading(),
                    error: status.error().map(str::to_string),
                }
            })
            .collect();
        HomeView { sections }
    }
}
