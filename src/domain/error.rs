//! Error taxonomy produced at the catalog boundary.
//!
//! Feature reducers never see these directly: background tasks convert
//! them into intents carrying [`MovieError::message`].

use thiserror::Error;

type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by catalog operations.
#[derive(Debug, Error)]
pub enum MovieError {
    /// Host unreachable or connection dropped
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: Option<Cause>,
    },

    /// Request did not complete in time
    #[error("{message}")]
    Timeout {
        message: String,
        #[source]
        source: Option<Cause>,
    },

    /// 4xx response
    #[error("{message} (HTTP {code})")]
    Client {
        code: u16,
        message: String,
        #[source]
        source: Option<Cause>,
    },

    /// 5xx response
    #[error("{message}")]
    Server {
        message: String,
        #[source]
        source: Option<Cause>,
    },

    /// Response body could not be understood
    #[error("{message}")]
    Data {
        message: String,
        #[source]
        source: Option<Cause>,
    },

    /// Anything else
    #[error("{message}")]
    Unknown {
        message: String,
        #[source]
        source: Option<Cause>,
    },
}

impl MovieError {
    pub fn network() -> Self {
        MovieError::Network {
            message: "No internet connection".to_string(),
            source: None,
        }
    }

    pub fn timeout() -> Self {
        MovieError::Timeout {
            message: "Request timeout".to_string(),
            source: None,
        }
    }

    pub fn client(code: u16) -> Self {
        MovieError::Client {
            code,
            message: "Request failed".to_string(),
            source: None,
        }
    }

    pub fn server() -> Self {
        MovieError::Server {
            message: "Server error".to_string(),
            source: None,
        }
    }

    pub fn data() -> Self {
        MovieError::Data {
            message: "Invalid data".to_string(),
            source: None,
        }
    }

    pub fn unknown() -> Self {
        MovieError::Unknown {
            message: "An unexpected error occurred".to_string(),
            source: None,
        }
    }

    /// Replace the user-facing message.
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        *self.message_mut() = text.into();
        self
    }

    /// Attach the underlying cause.
    pub fn with_source<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        *self.source_mut() = Some(Box::new(cause));
        self
    }

    /// Text suitable for showing next to a retry action.
    pub fn message(&self) -> &str {
        match self {
            MovieError::Network { message, .. }
            | MovieError::Timeout { message, .. }
            | MovieError::Client { message, .. }
            | MovieError::Server { message, .. }
            | MovieError::Data { message, .. }
            | MovieError::Unknown { message, .. } => message,
        }
    }

    /// Short machine-readable kind for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MovieError::Network { .. } => "network",
            MovieError::Timeout { .. } => "timeout",
            MovieError::Client { .. } => "client",
            MovieError::Server { .. } => "server",
            MovieError::Data { .. } => "data",
            MovieError::Unknown { .. } => "unknown",
        }
    }

    fn message_mut(&mut self) -> &mut String {
        match self {
            MovieError::Network { message, .. }
            | MovieError::Timeout { message, .. }
            | MovieError::Client { message, .. }
            | MovieError::Server { message, .. }
            | MovieError::Data { message, .. }
            | MovieError::Unknown { message, .. } => message,
        }
    }

    fn source_mut(&mut self) -> &mut Option<Cause> {
        match self {
            MovieError::Network { source, .. }
            | MovieError::Timeout { source, .. }
            | MovieError::Client { source, .. }
            | MovieError::Server { source, .. }
            | MovieError::Data { source, .. }
            | MovieError::Unknown { source, .. } => source,
        }
    }
}
