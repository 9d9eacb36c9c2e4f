//! Error types for the Notion/arXiv sync.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;
use std::time::Duration;

/// Errors raised while loading the settings file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid YAML (or has the wrong shape)
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A required key is absent or empty
    #[error("Missing required config key: {key}")]
    Missing {
        /// Dotted key path, e.g. `property.title`
        key: &'static str,
    },

    /// A key is present but its value is unusable
    #[error("Invalid value for config key {key}: {message}")]
    Invalid {
        /// Dotted key path
        key: &'static str,
        /// What is wrong with the value
        message: String,
    },
}

impl ConfigError {
    /// Create a missing-key error.
    #[must_use]
    pub const fn missing(key: &'static str) -> Self {
        Self::Missing { key }
    }

    /// Create an invalid-value error.
    #[must_use]
    pub fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

/// Errors from the HTTP client layer (Notion and arXiv).
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credential could not be turned into a request header
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Credential rejected (401/403 response)
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Error message from API
        message: String,
    },

    /// Rate limited by the remote API (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response or empty lookup)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Atom feed parsing error
    #[error("Failed to parse Atom feed: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited {
            retry_after: Duration::from_secs(seconds),
        }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create an unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Returns true if the remote side reported no matching record.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Build the error for a non-success response.
    ///
    /// Shared by both clients so their status mapping cannot drift apart.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();

        match status {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Self::rate_limited(retry_after)
            }
            401 | 403 => Self::unauthorized(response.text().await.unwrap_or_default()),
            404 => Self::not_found(response.text().await.unwrap_or_default()),
            400 => Self::bad_request(response.text().await.unwrap_or_default()),
            500..=599 => Self::server(status, response.text().await.unwrap_or_default()),
            _ => Self::UnexpectedStatus {
                status,
                message: response.text().await.unwrap_or_default(),
            },
        }
    }
}

/// Errors that abort a whole run.
#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    /// Settings could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Remote API call failed outside per-row lookups
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// Output file could not be written
    #[error("Failed to write {path}: {source}")]
    Snapshot {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for sync runs.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_not_found() {
        assert!(ClientError::not_found("2301.12345").is_not_found());
        assert!(!ClientError::server(500, "Internal error").is_not_found());
        assert!(!ClientError::rate_limited(60).is_not_found());
    }

    #[test]
    fn test_config_error_names_key() {
        let err = ConfigError::missing("databaseId");
        assert!(err.to_string().contains("databaseId"));

        let err = ConfigError::invalid("arxiv.maxResults", "must be positive");
        assert!(err.to_string().contains("arxiv.maxResults"));
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_sync_error_wraps_config_error() {
        let err: SyncError = ConfigError::missing("credential").into();
        assert!(matches!(
            err,
            SyncError::Config(ConfigError::Missing { key: "credential" })
        ));
    }
}
