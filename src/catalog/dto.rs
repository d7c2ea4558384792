use serde::{Deserialize, Serialize};

use crate::domain::Movie;

/// One page of a list or search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviesResponse {
    pub page: u32,
    pub results: Vec<MovieDto>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// A movie as the catalog API returns it.
///
/// Search results routinely omit `overview` and `release_date` or send
/// them as null, so both are optional here and default to empty strings
/// in [`Movie`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u32,
}

impl From<MovieDto> for Movie {
    fn from(dto: MovieDto) -> Self {
        Movie {
            id: dto.id,
            title: dto.title,
            overview: dto.overview.unwrap_or_default(),
            poster_path: dto.poster_path,
            backdrop_path: dto.backdrop_path,
            release_date: dto.release_date.unwrap_or_default(),
            vote_average: dto.vote_average,
            vote_count: dto.vote_count,
            is_favorite: false,
        }
    }
}

impl MoviesResponse {
    pub fn into_movies(self) -> Vec<Movie> {
        self.results.into_iter().map(Movie::from).collect()
    }
}
