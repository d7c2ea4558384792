//! API key resolution from configuration.
//!
//! The key comes from `api.api_key` in the config file, or from the
//! `TMDB_API_KEY` environment variable when the file leaves it unset.

use super::types::ApiConfig;

/// Environment variable consulted when the config file has no key.
pub const API_KEY_ENV_VAR: &str = "TMDB_API_KEY";

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Status of API key resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    /// API key resolved successfully.
    Configured(SecureString),
    /// API key is missing or empty.
    Unconfigured { reason: String },
}

impl ApiConfig {
    /// Resolve the API key from config, then from the environment.
    ///
    /// Called on demand and not cached.
    pub fn resolve_api_key(&self) -> CredentialStatus {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Same as [`resolve_api_key`](Self::resolve_api_key) with an explicit
    /// environment lookup.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> CredentialStatus
    where
        F: FnOnce(&str) -> Option<String>,
    {
        if let Some(key) = self.api_key.as_deref().map(str::trim) {
            if !key.is_empty() {
                return CredentialStatus::Configured(SecureString::new(key.to_string()));
            }
        }

        match lookup(API_KEY_ENV_VAR) {
            Some(key) if !key.trim().is_empty() => {
                CredentialStatus::Configured(SecureString::new(key.trim().to_string()))
            }
            _ => CredentialStatus::Unconfigured {
                reason: format!("api.api_key is not set and {} is empty", API_KEY_ENV_VAR),
            },
        }
    }
}
