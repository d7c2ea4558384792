//! Movie-catalog access.
//!
//! Features depend on the [`MovieCatalog`] trait; [`TmdbCatalog`] is the
//! HTTP implementation backed by The Movie Database v3 API.

mod dto;
mod tmdb;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Movie, MovieCategory, MovieError};

pub use dto::{MovieDto, MoviesResponse};
pub use tmdb::TmdbCatalog;

/// Read-only catalog operations.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// One page of movies in `category` (pages start at 1).
    async fn movies(&self, category: MovieCategory, page: u32) -> Result<Vec<Movie>, MovieError>;

    /// One page of movies matching `query`.
    async fn search(&self, query: &str, page: u32) -> Result<Vec<Movie>, MovieError>;
}

/// Catalog shared between stores.
pub type SharedCatalog = Arc<dyn MovieCatalog>;
