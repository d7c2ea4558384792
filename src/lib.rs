//! Reactive single-writer state containers for a movie-catalog browser.
//!
//! [`mvi::Store`] serialises every state change of one feature through a
//! queue and a reducer, and fans the resulting states out to any number of
//! subscribers. The [`features`] build the home, search and favorites
//! screens on top of it, talking to the catalog through [`catalog`].

pub mod catalog;
pub mod config;
pub mod domain;
pub mod favorites;
pub mod features;
pub mod lifecycle;
pub mod logging;
pub mod mvi;
