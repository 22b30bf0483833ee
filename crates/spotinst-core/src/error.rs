//! Error types for Spotinst API operations.
//!
//! Every failure in the request pipeline is reported through [`Error`]. The
//! variants map onto distinct failure classes so callers can tell a caller
//! bug (templating, configuration) from a transient failure that was retried
//! until the policy gave up, or from a structured rejection by the API.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for Spotinst operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Required setting missing or transport could not be built
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path template could not be expanded
    #[error("URI template error: {0}")]
    Template(String),

    /// Network-level failure (connection refused, reset, DNS)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request exceeded the transport timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-2xx response carrying the provider's structured error body
    #[error("API error: {0}")]
    Api(ApiError),

    /// Every attempt allowed by the retry policy failed
    #[error("Retries exhausted after {attempts} attempts: {last_error}")]
    RetryExhausted {
        /// Number of attempts made, including the first
        attempts: u32,
        /// Failure observed on the final attempt
        last_error: Box<Error>,
    },

    /// Response body was not the expected JSON shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Request body could not be serialized
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// Base URL or request URL is malformed
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The call's context was cancelled
    #[error("Context cancelled")]
    Cancelled,

    /// The call's context deadline passed
    #[error("Context deadline exceeded")]
    DeadlineExceeded,
}

/// Specialized result type for Spotinst operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A structured error returned by the Spotinst API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status code of the response
    pub status: u16,
    /// Request ID echoed by the API, if present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Per-field error details
    pub errors: Vec<ApiErrorDetail>,
}

/// A single entry of the `response.errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code
    #[serde(default)]
    pub code: String,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Offending input field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    /// Code of the first error detail, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.errors.first().map(|e| e.code.as_str())
    }

    /// Message of the first error detail, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {}", self.status)?;
        if let Some(id) = &self.request_id {
            write!(f, " (request {id})")?;
        }
        for detail in &self.errors {
            write!(f, ": {}: {}", detail.code, detail.message)?;
            if let Some(field) = &detail.field {
                write!(f, " [{field}]")?;
            }
        }
        Ok(())
    }
}

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Template(_) => "TEMPLATE_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Api(_) => "API_ERROR",
            Self::RetryExhausted { .. } => "RETRY_EXHAUSTED",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Encode(_) => "ENCODE_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::Cancelled => "CANCELLED",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
        }
    }

    /// Returns true if the executor may re-attempt after this failure.
    ///
    /// Transport failures, timeouts, and API errors with status 429 or 5xx
    /// are retryable. Everything else is terminal.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Api(api) => is_retryable_status(api.status),
            _ => false,
        }
    }

    /// Returns true for cancellation and deadline errors.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    /// Returns the structured API error, looking through retry exhaustion.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api) => Some(api),
            Self::RetryExhausted { last_error, .. } => last_error.api_error(),
            _ => None,
        }
    }
}

/// Status codes the executor treats as transient.
#[must_use]
pub const fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500..=599)
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> Error {
        Error::Api(ApiError {
            status,
            request_id: Some("req-1".to_string()),
            errors: vec![ApiErrorDetail {
                code: "GROUP_DOESNT_EXIST".to_string(),
                message: "Group not found".to_string(),
                field: None,
            }],
        })
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::Config("x".into()).error_code(), "CONFIG_ERROR");
        assert_eq!(Error::Template("x".into()).error_code(), "TEMPLATE_ERROR");
        assert_eq!(Error::Cancelled.error_code(), "CANCELLED");
        assert_eq!(Error::DeadlineExceeded.error_code(), "DEADLINE_EXCEEDED");
        assert_eq!(
            Error::RetryExhausted {
                attempts: 3,
                last_error: Box::new(Error::Timeout("t".into())),
            }
            .error_code(),
            "RETRY_EXHAUSTED"
        );
    }

    #[test]
    fn test_retryable_classification() {
        assert!(Error::Transport("reset".into()).is_retryable());
        assert!(Error::Timeout("slow".into()).is_retryable());
        assert!(api_error(429).is_retryable());
        assert!(api_error(503).is_retryable());
        assert!(!api_error(400).is_retryable());
        assert!(!api_error(404).is_retryable());
        assert!(!Error::Decode("bad".into()).is_retryable());
        assert!(!Error::Cancelled.is_retryable());
    }

    #[test]
    fn test_cancellation_is_distinct_from_exhaustion() {
        assert!(Error::Cancelled.is_cancellation());
        assert!(Error::DeadlineExceeded.is_cancellation());
        let exhausted = Error::RetryExhausted {
            attempts: 2,
            last_error: Box::new(Error::Transport("reset".into())),
        };
        assert!(!exhausted.is_cancellation());
    }

    #[test]
    fn test_api_error_through_exhaustion() {
        let exhausted = Error::RetryExhausted {
            attempts: 4,
            last_error: Box::new(api_error(503)),
        };
        let api = exhausted.api_error().unwrap();
        assert_eq!(api.status, 503);
        assert_eq!(api.code(), Some("GROUP_DOESNT_EXIST"));
    }

    #[test]
    fn test_api_error_display() {
        let err = api_error(404);
        assert_eq!(
            err.to_string(),
            "API error: status 404 (request req-1): GROUP_DOESNT_EXIST: Group not found"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let spot_err: Error = err.into();
        assert!(matches!(spot_err, Error::Decode(_)));
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let spot_err: Error = err.into();
        assert!(matches!(spot_err, Error::InvalidEndpoint(_)));
    }
}
