use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Movie-catalog API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the catalog API (e.g., "https://api.themoviedb.org/3").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key. Falls back to the `TMDB_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 30).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Time window for the trending list: "day" or "week" (default: "week").
    #[serde(default = "default_trending_window")]
    pub trending_window: String,
}

/// Search feature settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search is sent (default: 300).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// State container settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// States buffered per subscriber before a slow subscriber starts
    /// skipping (default: 256).
    #[serde(default = "default_state_buffer")]
    pub state_buffer: usize,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    30
}

fn default_trending_window() -> String {
    "week".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_state_buffer() -> usize {
    256
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            trending_window: default_trending_window(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            state_buffer: default_state_buffer(),
        }
    }
}
