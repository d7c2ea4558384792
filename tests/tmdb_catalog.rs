mod common;

use std::sync::Arc;

use common::mock_tmdb::{MockResponse, MockTmdb};
use common::{api_config, free_port, settle};
use reelstate::catalog::{MovieCatalog, SharedCatalog, TmdbCatalog};
use reelstate::domain::{MovieCategory, MovieError};
use reelstate::favorites::FavoritesStore;
use reelstate::features::home::{CategoryState, HomeIntent, HomeReducer, HomeState};
use reelstate::mvi::Store;

fn catalog_for(base_url: &str) -> TmdbCatalog {
    TmdbCatalog::from_config(&api_config(base_url)).expect("catalog")
}

#[tokio::test]
async fn category_request_hits_expected_path_with_key() {
    let mock = MockTmdb::start().await;
    mock.route(
        "/3/movie/now_playing",
        MockResponse::movies(&[(603, "The Matrix"), (604, "The Matrix Reloaded")]),
    )
    .await;

    let movies = catalog_for(&mock.base_url())
        .movies(MovieCategory::NowPlaying, 1)
        .await
        .expect("movies");

    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].id, 603);
    assert_eq!(movies[0].poster_path.as_deref(), Some("/603.jpg"));
    assert_eq!(movies[0].release_year(), Some("2023"));

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/3/movie/now_playing");
    assert_eq!(requests[0].query.get("api_key").map(String::as_str), Some("test-key"));
    assert_eq!(requests[0].query.get("page").map(String::as_str), Some("1"));
}

#[tokio::test]
async fn trending_uses_configured_window() {
    let mock = MockTmdb::start().await;
    mock.route("/3/trending/movie/day", MockResponse::movies(&[(1, "A")]))
        .await;

    let config = reelstate::config::ApiConfig {
        trending_window: "day".to_string(),
        ..api_config(&mock.base_url())
    };
    let movies = TmdbCatalog::from_config(&config)
        .expect("catalog")
        .movies(MovieCategory::Trending, 1)
        .await
        .expect("movies");
    assert_eq!(movies.len(), 1);
}

#[tokio::test]
async fn search_sends_query_text() {
    let mock = MockTmdb::start().await;
    mock.route("/3/search/movie", MockResponse::movies(&[(78, "Blade Runner")]))
        .await;

    let movies = catalog_for(&mock.base_url())
        .search("blade runner", 2)
        .await
        .expect("results");
    assert_eq!(movies[0].title, "Blade Runner");

    let requests = mock.captured_requests().await;
    assert_eq!(
        requests[0].query.get("query").map(String::as_str),
        Some("blade runner")
    );
    assert_eq!(requests[0].query.get("page").map(String::as_str), Some("2"));
}

#[tokio::test]
async fn http_errors_map_to_taxonomy() {
    let mock = MockTmdb::start().await;
    mock.route(
        "/3/movie/popular",
        MockResponse::error(401, "Invalid API key: You must be granted a valid key."),
    )
    .await;
    mock.route("/3/movie/top_rated", MockResponse::error(503, "Service unavailable"))
        .await;
    mock.route("/3/movie/upcoming", MockResponse::json("{\"page\": \"one\"}"))
        .await;

    let catalog = catalog_for(&mock.base_url());

    let unauthorized = catalog.movies(MovieCategory::Popular, 1).await.unwrap_err();
    assert!(matches!(unauthorized, MovieError::Client { code: 401, .. }));
    assert_eq!(unauthorized.message(), "Request failed: Unauthorized");

    let unavailable = catalog.movies(MovieCategory::TopRated, 1).await.unwrap_err();
    assert_eq!(unavailable.kind(), "server");
    assert_eq!(unavailable.message(), "Server error occurred");

    let garbled = catalog.movies(MovieCategory::Upcoming, 1).await.unwrap_err();
    assert_eq!(garbled.kind(), "data");
    assert_eq!(garbled.message(), "Invalid data");
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let base_url = format!("http://127.0.0.1:{}/3", free_port());
    let err = catalog_for(&base_url)
        .movies(MovieCategory::Popular, 1)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "network");
    assert_eq!(err.message(), "No internet connection");
}

#[tokio::test]
async fn slow_server_times_out() {
    let mock = MockTmdb::start().await;
    mock.route(
        "/3/movie/popular",
        MockResponse::movies(&[(1, "A")]).with_delay(3_000),
    )
    .await;

    let config = reelstate::config::ApiConfig {
        timeout_seconds: 1,
        ..api_config(&mock.base_url())
    };
    let err = TmdbCatalog::from_config(&config)
        .expect("catalog")
        .movies(MovieCategory::Popular, 1)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "timeout");
    assert_eq!(err.message(), "Connection timeout");
}

#[tokio::test]
async fn home_store_over_http_keeps_other_categories_on_failure() {
    let mock = MockTmdb::start().await;
    mock.route("/3/movie/popular", MockResponse::movies(&[(1, "A"), (2, "B")]))
        .await;
    mock.route("/3/movie/upcoming", MockResponse::error(500, "boom"))
        .await;

    let catalog: SharedCatalog = Arc::new(catalog_for(&mock.base_url()));
    let store = Store::new(
        HomeState::default(),
        HomeReducer::new(catalog, FavoritesStore::new()),
    );
    let mut states = store.subscribe();
    store.start().expect("start");

    store.publish(HomeIntent::LoadCategory(MovieCategory::Popular));
    store.publish(HomeIntent::LoadCategory(MovieCategory::Upcoming));
    let done = settle(&mut states, |s| {
        s.is_settled([MovieCategory::Popular, MovieCategory::Upcoming])
    })
    .await;

    assert_eq!(
        done.category(MovieCategory::Popular)
            .movies_or_empty()
            .iter()
            .map(|m| m.id)
            .collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(
        done.category(MovieCategory::Upcoming),
        &CategoryState::Error("Server error occurred".to_string())
    );
}
