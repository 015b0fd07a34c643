//! Error types for the energomonitor client.
//!
//! Every session operation either succeeds or fails with one of two kinds:
//! [`Error::NotAuthorized`], raised locally before any request is built, or
//! [`Error::Transport`], which wraps whatever the HTTP layer reported.
//! [`Error::InvalidInput`] is only produced while configuring a session.

use thiserror::Error;

/// Message carried by [`Error::NotAuthorized`].
///
/// Callers and tests compare against this text verbatim, so it must not change.
pub const NOT_AUTHORIZED_MESSAGE: &str = "Cannot call this method without setting the authorization token (in the constructor or using the authorize method).";

/// The unified error type for energomonitor operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An authenticated operation was invoked before a token was set.
    ///
    /// No request was sent. Call [`Session::authorize`](crate::Session::authorize)
    /// and retry.
    #[error("{}", NOT_AUTHORIZED_MESSAGE)]
    NotAuthorized,

    /// The HTTP layer failed or the API answered with a non-2xx status.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Invalid configuration (API URL, token).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if this is the local "no token set" failure.
    pub fn is_not_authorized(&self) -> bool {
        matches!(self, Error::NotAuthorized)
    }

    /// Returns the HTTP status code if the API answered with an error status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(err) => err.status(),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The API answered with a non-2xx status.
    #[error("HTTP {status}{}", format_body(.body))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, possibly empty.
        body: String,
    },

    /// A 2xx response body could not be decoded.
    #[error("invalid response body: {message}")]
    Decode { message: String },

    /// A request body could not be encoded as JSON.
    #[error("invalid request body: {message}")]
    Encode { message: String },
}

fn format_body(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}

impl TransportError {
    /// Returns the HTTP status for [`TransportError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the error body decoded as JSON, if it is JSON.
    pub fn body_json(&self) -> Option<serde_json::Value> {
        match self {
            TransportError::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Encode {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Token contains characters that cannot appear in an HTTP header.
    #[error("invalid token: {reason}")]
    Token { reason: String },

    /// HTTP client could not be configured.
    #[error("invalid transport configuration: {message}")]
    Transport { message: String },
}
