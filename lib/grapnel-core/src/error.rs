//! Error types for grapnel.

use derive_more::{Display, Error, From};

/// Main error type for grapnel operations.
///
/// Note that `execute` on a request never returns one of these directly:
/// every failure is folded into an [`crate::Outcome`]. The variants here
/// describe what a [`crate::Transport`] or a decode step can produce.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// The in-flight call was cancelled through its cancellation token.
    #[display("request aborted")]
    #[from(skip)]
    Aborted,

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON decode error with path context.
    #[display("JSON decode error at '{path}': {message}")]
    #[from(skip)]
    JsonDecode {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON decode error with path context.
    #[must_use]
    pub fn json_decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDecode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this error comes from a cancelled request.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
