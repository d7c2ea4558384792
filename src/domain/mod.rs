//! Catalog-independent movie types.

mod error;
mod model;

pub use error::MovieError;
pub use model::{apply_favorites, Movie, MovieCategory};

#[cfg(test)]
pub(crate) use model::sample_movie;
