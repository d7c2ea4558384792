//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_tmdb;

use async_trait::async_trait;
use parking_lot::Mutex;
use reelstate::catalog::MovieCatalog;
use reelstate::config::ApiConfig;
use reelstate::domain::{Movie, MovieCategory, MovieError};
use reelstate::mvi::StateStream;
use reelstate::mvi::UiState;
use std::collections::HashMap;
use std::net::TcpListener;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Upper bound for any single wait in these tests.
pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Find a port nothing is listening on.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// API settings pointing at `base_url` with a test key and short timeouts.
pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        api_key: Some("test-key".to_string()),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
        ..ApiConfig::default()
    }
}

/// Write `content` to a config file in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn movie(id: i64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: String::new(),
        poster_path: None,
        backdrop_path: None,
        release_date: "2021-10-22".to_string(),
        vote_average: 7.8,
        vote_count: 9000,
        is_favorite: false,
    }
}

/// Wait until `stream` yields a state matching `predicate`.
pub async fn settle<S, F>(stream: &mut StateStream<S>, predicate: F) -> S
where
    S: UiState,
    F: FnMut(&S) -> bool,
{
    tokio::time::timeout(SETTLE_TIMEOUT, stream.wait_for(predicate))
        .await
        .expect("state settled in time")
        .expect("store still running")
}

/// Outcome scripted for one catalog call.
#[derive(Clone)]
pub enum Scripted {
    Movies(Vec<Movie>),
    Fail(fn() -> MovieError),
}

/// In-memory catalog with per-category and per-query answers.
///
/// Unscripted categories return an empty list; unscripted queries return
/// no results. Every call is recorded.
#[derive(Default)]
pub struct ScriptedCatalog {
    categories: Mutex<HashMap<MovieCategory, Scripted>>,
    queries: Mutex<HashMap<String, Scripted>>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedCatalog {
    pub fn with_category(self, category: MovieCategory, outcome: Scripted) -> Self {
        self.categories.lock().insert(category, outcome);
        self
    }

    pub fn with_query(self, query: &str, outcome: Scripted) -> Self {
        self.queries.lock().insert(query.to_string(), outcome);
        self
    }

    pub fn set_category(&self, category: MovieCategory, outcome: Scripted) {
        self.categories.lock().insert(category, outcome);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

fn resolve(outcome: Option<Scripted>) -> Result<Vec<Movie>, MovieError> {
    match outcome {
        Some(Scripted::Movies(movies)) => Ok(movies),
        Some(Scripted::Fail(make)) => Err(make()),
        None => Ok(Vec::new()),
    }
}

#[async_trait]
impl MovieCatalog for ScriptedCatalog {
    async fn movies(&self, category: MovieCategory, _page: u32) -> Result<Vec<Movie>, MovieError> {
        self.calls.lock().push(format!("movies:{}", category));
        let outcome = self.categories.lock().get(&category).cloned();
        resolve(outcome)
    }

    async fn search(&self, query: &str, _page: u32) -> Result<Vec<Movie>, MovieError> {
        self.calls.lock().push(format!("search:{}", query));
        let outcome = self.queries.lock().get(query).cloned();
        resolve(outcome)
    }
}
