//! Error types for the upstream adapters.

use std::fmt;

use thiserror::Error;

/// Broad classification of an adapter failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterErrorKind {
    /// Connection failure, DNS failure or timeout.
    Network,
    /// The provider answered but refused the request (non-2xx, API error body, tool exit code).
    UpstreamRejected,
    /// The provider answered with something that could not be decoded.
    MalformedResponse,
    /// The provider explicitly reported that the resource does not exist.
    NotFound,
}

impl fmt::Display for AdapterErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Network => "network error",
            Self::UpstreamRejected => "upstream rejected request",
            Self::MalformedResponse => "malformed response",
            Self::NotFound => "not found",
        };
        f.write_str(label)
    }
}

/// Error returned by every upstream adapter.
///
/// "No results" is never an error; adapters return an empty or `None` value for it.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct AdapterError {
    kind: AdapterErrorKind,
    message: String,
}

impl AdapterError {
    /// Build an error of the given kind.
    pub fn new(kind: AdapterErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AdapterErrorKind::Network, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(AdapterErrorKind::UpstreamRejected, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(AdapterErrorKind::MalformedResponse, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(AdapterErrorKind::NotFound, message)
    }

    /// Failure classification.
    pub fn kind(&self) -> AdapterErrorKind {
        self.kind
    }

    /// Human-readable detail, without the kind prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::malformed(err.to_string())
        } else if err.is_status() {
            Self::rejected(err.to_string())
        } else {
            // timeouts, connect and body errors
            Self::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(err.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for AdapterError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        Self::network(format!("timed out: {}", err))
    }
}

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = AdapterError::rejected("HTTP 403");
        assert_eq!(err.to_string(), "upstream rejected request: HTTP 403");
        assert_eq!(err.message(), "HTTP 403");
    }

    #[test]
    fn test_json_error_is_malformed() {
        let json_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err: AdapterError = json_err.into();
        assert_eq!(err.kind(), AdapterErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn test_elapsed_is_network() {
        let elapsed = tokio::time::timeout(
            std::time::Duration::from_millis(1),
            std::future::pending::<()>(),
        )
        .await
        .unwrap_err();
        let err: AdapterError = elapsed.into();
        assert_eq!(err.kind(), AdapterErrorKind::Network);
    }
}
