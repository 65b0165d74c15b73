//! Error types for the Notte client.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use notte_client::{Result, Error};
//!
//! async fn example(client: &NotteClient) -> Result<()> {
//!     let session = client.sessions.start(Default::default()).await?;
//!     client.sessions.stop(&session.session_id).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Caller misuse | [`Error::InvalidState`] |
//! | Validation | [`Error::RequestValidation`], [`Error::ResponseValidation`] |
//! | Remote API | [`Error::Api`], [`Error::Timeout`], [`Error::UnexpectedResponse`] |
//! | External | [`Error::Transport`], [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use serde_json::Value;
use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging: API failures carry
/// the HTTP status, the raw error body, and the request path so callers can
/// branch on the failure kind programmatically.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned at client construction when no API key can be resolved or
    /// the server URL is invalid. Never deferred to the first network call.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Caller-Misuse Errors
    // ========================================================================
    /// Session handle used in the wrong lifecycle state.
    ///
    /// Returned before any I/O when a session is started twice, stopped
    /// before being started, or its identifier is read before `start()`.
    #[error("Invalid session state: {message}")]
    InvalidState {
        /// Description of the misuse.
        message: String,
    },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Caller-supplied parameters failed the strict request schema.
    ///
    /// Raised before the network call is issued.
    #[error("Invalid request: {message}")]
    RequestValidation {
        /// Description of the offending fields.
        message: String,
    },

    /// A successful response did not match the expected schema.
    ///
    /// Indicates either an API contract change or a client-side schema bug.
    #[error("Invalid response from `{path}`: {message}")]
    ResponseValidation {
        /// Request path that produced the response.
        path: String,
        /// Description of the schema mismatch.
        message: String,
    },

    // ========================================================================
    // Remote API Errors
    // ========================================================================
    /// Non-success HTTP status from the server.
    #[error("API error on `{path}` (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message derived from the error body.
        message: String,
        /// Parsed JSON error body, or the raw text as a JSON string.
        body: Value,
        /// Request path that failed.
        path: String,
    },

    /// Request exceeded the configured timeout.
    ///
    /// Reported with the sentinel status code `0` by [`Error::status`],
    /// distinguishing it from real HTTP statuses.
    #[error("Request to `{path}` timed out after {timeout_ms}ms")]
    Timeout {
        /// Request path that timed out.
        path: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// A list endpoint returned neither an array nor an `{items: [...]}`
    /// object.
    ///
    /// Reported with the sentinel status code `0` by [`Error::status`].
    #[error(
        "Unexpected response shape from `{path}`: expected an array or an object with an `items` array"
    )]
    UnexpectedResponse {
        /// Request path that produced the response.
        path: String,
        /// The offending response body.
        body: Value,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// Transport-level failure other than timeout.
    ///
    /// Propagated unchanged from the HTTP client.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid-state error.
    #[inline]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Creates a request-validation error.
    #[inline]
    pub fn request_validation(message: impl Into<String>) -> Self {
        Self::RequestValidation {
            message: message.into(),
        }
    }

    /// Creates a response-validation error.
    #[inline]
    pub fn response_validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResponseValidation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an API error from a status code and error body.
    ///
    /// The message is derived from the body: an object's `detail` field,
    /// then its `message` field, then `status N: <body>` for a non-empty
    /// string body, else a generic fallback naming the status code. Any
    /// other body shape (number, array, null) uses the generic fallback;
    /// the raw body is always retained for inspection.
    pub fn api(status: u16, body: Value, path: impl Into<String>) -> Self {
        let message = match &body {
            Value::Object(map) => map
                .get("detail")
                .and_then(Value::as_str)
                .or_else(|| map.get("message").and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| format!("request failed with status {status}")),
            Value::String(text) if !text.is_empty() => format!("status {status}: {text}"),
            _ => format!("request failed with status {status}"),
        };

        Self::Api {
            status,
            message,
            body,
            path: path.into(),
        }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn request_timeout(path: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            path: path.into(),
            timeout_ms,
        }
    }

    /// Creates a malformed-list-response error.
    #[inline]
    pub fn unexpected_response(path: impl Into<String>, body: Value) -> Self {
        Self::UnexpectedResponse {
            path: path.into(),
            body,
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns the HTTP status associated with this error, if any.
    ///
    /// [`Error::Timeout`] and [`Error::UnexpectedResponse`] report the
    /// sentinel status `0`, distinguishing them from real server statuses.
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Timeout { .. } | Self::UnexpectedResponse { .. } => Some(0),
            _ => None,
        }
    }

    /// Returns the request path associated with this error, if any.
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Api { path, .. }
            | Self::Timeout { path, .. }
            | Self::UnexpectedResponse { path, .. }
            | Self::ResponseValidation { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if the server rejected the request with an HTTP
    /// error status.
    #[inline]
    #[must_use]
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Returns `true` if this error was raised before any network I/O.
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::InvalidState { .. } | Self::RequestValidation { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
