use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A catalog grouping fetched and displayed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieCategory {
    Trending,
    NowPlaying,
    Popular,
    TopRated,
    Upcoming,
}

impl MovieCategory {
    /// Every category, in home-screen order.
    pub const ALL: [MovieCategory; 5] = [
        MovieCategory::Trending,
        MovieCategory::NowPlaying,
        MovieCategory::Popular,
        MovieCategory::TopRated,
        MovieCategory::Upcoming,
    ];

    /// Section heading shown to the user.
    pub fn title(self) -> &'static str {
        match self {
            MovieCategory::Trending => "Trending",
            MovieCategory::NowPlaying => "Now Playing",
            MovieCategory::Popular => "Popular",
            MovieCategory::TopRated => "Top Rated",
            MovieCategory::Upcoming => "Upcoming",
        }
    }

    /// Identifier used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            MovieCategory::Trending => "trending",
            MovieCategory::NowPlaying => "now-playing",
            MovieCategory::Popular => "popular",
            MovieCategory::TopRated => "top-rated",
            MovieCategory::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for MovieCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for MovieCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        MovieCategory::ALL
            .into_iter()
            .find(|category| category.slug() == normalized)
            .ok_or_else(|| format!("unknown movie category '{}'", s))
    }
}

/// A movie as shown in lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: String,
    pub vote_average: f64,
    pub vote_count: u32,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Movie {
    /// Copy of this movie flagged according to `favorite_ids`.
    pub fn with_favorite(&self, favorite_ids: &BTreeSet<i64>) -> Movie {
        Movie {
            is_favorite: favorite_ids.contains(&self.id),
            ..self.clone()
        }
    }

    /// Release year, when the date is present.
    pub fn release_year(&self) -> Option<&str> {
        self.release_date.get(..4)
    }
}

/// Re-flag every movie in `movies` against `favorite_ids`.
pub fn apply_favorites(movies: &[Movie], favorite_ids: &BTreeSet<i64>) -> Vec<Movie> {
    movies
        .iter()
        .map(|movie| movie.with_favorite(favorite_ids))
        .collect()
}

#[cfg(test)]
pub(crate) fn sample_movie(id: i64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: String::new(),
        poster_path: None,
        backdrop_path: None,
        release_date: "2024-05-01".to_string(),
        vote_average: 7.5,
        vote_count: 100,
        is_favorite: false,
    }
}
