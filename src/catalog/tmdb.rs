use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::config::{ApiConfig, CredentialStatus, SecureString};
use crate::domain::{Movie, MovieCategory, MovieError};

use super::dto::MoviesResponse;
use super::MovieCatalog;

/// HTTP client for The Movie Database v3 API.
pub struct TmdbCatalog {
    client: Client,
    base_url: String,
    api_key: SecureString,
    trending_window: String,
}

impl TmdbCatalog {
    /// Build a catalog client from config, resolving the API key.
    pub fn from_config(config: &ApiConfig) -> Result<Self, MovieError> {
        let api_key = match config.resolve_api_key() {
            CredentialStatus::Configured(key) => key,
            CredentialStatus::Unconfigured { reason } => {
                return Err(MovieError::client(401).with_message(format!(
                    "Catalog API key missing: {}",
                    reason
                )));
            }
        };
        Self::new(config, api_key)
    }

    pub fn new(config: &ApiConfig, api_key: SecureString) -> Result<Self, MovieError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()
            .map_err(|e| {
                MovieError::unknown()
                    .with_message("Failed to build catalog client")
                    .with_source(e)
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            trending_window: config.trending_window.clone(),
        })
    }

    /// API path for a category list.
    fn category_path(&self, category: MovieCategory) -> String {
        match category {
            MovieCategory::Trending => format!("trending/movie/{}", self.trending_window),
            MovieCategory::NowPlaying => "movie/now_playing".to_string(),
            MovieCategory::Popular => "movie/popular".to_string(),
            MovieCategory::TopRated => "movie/top_rated".to_string(),
            MovieCategory::Upcoming => "movie/upcoming".to_string(),
        }
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, MovieError> {
        let mut query: Vec<(&str, &str)> = vec![("api_key", self.api_key.expose())];
        query.extend(params.iter().map(|(name, value)| (*name, value.as_str())));

        Url::parse_with_params(&format!("{}/{}", self.base_url, path), &query).map_err(|e| {
            MovieError::unknown()
                .with_message("Invalid catalog URL")
                .with_source(e)
        })
    }

    async fn fetch(&self, path: &str, params: &[(&str, String)]) -> Result<Vec<Movie>, MovieError> {
        let url = self.url(path, params)?;
        tracing::debug!(path = %path, "Catalog request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let err = map_status(status);
            tracing::warn!(
                path = %path,
                status = status.as_u16(),
                kind = err.kind(),
                "Catalog request failed"
            );
            return Err(err);
        }

        let page: MoviesResponse = response.json().await.map_err(map_transport_error)?;
        tracing::debug!(path = %path, count = page.results.len(), "Catalog response");
        Ok(page.into_movies())
    }
}

#[async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn movies(&self, category: MovieCategory, page: u32) -> Result<Vec<Movie>, MovieError> {
        let path = self.category_path(category);
        self.fetch(&path, &[("page", page.max(1).to_string())]).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<Vec<Movie>, MovieError> {
        self.fetch(
            "search/movie",
            &[
                ("query", query.to_string()),
                ("page", page.max(1).to_string()),
            ],
        )
        .await
    }
}

/// Classify a failure that happened before a status code was available,
/// or while reading the body.
fn map_transport_error(err: reqwest::Error) -> MovieError {
    if err.is_timeout() {
        MovieError::timeout()
            .with_message("Connection timeout")
            .with_source(err)
    } else if err.is_connect() {
        MovieError::network().with_source(err)
    } else if err.is_decode() {
        MovieError::data().with_source(err)
    } else if err.is_request() || err.is_body() {
        MovieError::network()
            .with_message("Network error occurred")
            .with_source(err)
    } else {
        let message = err.to_string();
        MovieError::unknown().with_message(message).with_source(err)
    }
}

fn map_status(status: StatusCode) -> MovieError {
    let code = status.as_u16();
    match code {
        400..=499 => MovieError::client(code).with_message(format!(
            "Request failed: {}",
            status.canonical_reason().unwrap_or("Unknown")
        )),
        500..=599 => MovieError::server().with_message("Server error occurred"),
        _ => MovieError::unknown().with_message(format!("HTTP error: {}", code)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TmdbCatalog {
        let config = ApiConfig {
            base_url: "https://api.example.com/3/".to_string(),
            ..ApiConfig::default()
        };
        TmdbCatalog::new(&config, SecureString::new("k3y".to_string())).expect("client")
    }

    #[test]
    fn category_paths_follow_api_layout() {
        let catalog = catalog();
        assert_eq!(
            catalog.category_path(MovieCategory::Trending),
            "trending/movie/week"
        );
        assert_eq!(
            catalog.category_path(MovieCategory::NowPlaying),
            "movie/now_playing"
        );
        assert_eq!(catalog.category_path(MovieCategory::TopRated), "movie/top_rated");
    }

    #[test]
    fn url_carries_key_and_escapes_query() {
        let url = catalog()
            .url("search/movie", &[("query", "the matrix".to_string())])
            .expect("url");
        assert_eq!(url.path(), "/3/search/movie");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("api_key".to_string(), "k3y".to_string())));
        assert!(pairs.contains(&("query".to_string(), "the matrix".to_string())));
    }

    #[test]
    fn status_codes_map_to_taxonomy() {
        let not_found = map_status(StatusCode::NOT_FOUND);
        assert!(matches!(not_found, MovieError::Client { code: 404, .. }));
        assert_eq!(not_found.message(), "Request failed: Not Found");

        let unavailable = map_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(unavailable.kind(), "server");
        assert_eq!(unavailable.message(), "Server error occurred");

        let redirect = map_status(StatusCode::NOT_MODIFIED);
        assert_eq!(redirect.message(), "HTTP error: 304");
    }

    #[test]
    fn missing_key_is_rejected() {
        let config = ApiConfig {
            api_key: Some(String::new()),
            ..ApiConfig::default()
        };
        // Only meaningful when the environment does not provide a key.
        if std::env::var(crate::config::API_KEY_ENV_VAR).is_err() {
            assert!(TmdbCatalog::from_config(&config).is_err());
        }
    }
}
