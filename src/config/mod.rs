mod credentials;
mod loader;
mod types;

pub use credentials::{CredentialStatus, SecureString, API_KEY_ENV_VAR};
pub use loader::ConfigError;
pub use types::{ApiConfig, Config, SearchConfig, StoreConfig};
