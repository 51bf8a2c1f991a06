//! # API Errors
//!
//! Error types for API operations.

use thiserror::Error;

/// Errors that can occur during API operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service returned an error response.
    #[error("api error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message body from the service.
        message: String,
    },

    /// Failed to deserialize a response.
    #[error("invalid response format: {0}")]
    InvalidResponse(String),

    /// A branch reference update did not land on the commit just created.
    ///
    /// Reported when the service acknowledges a reference update but the
    /// returned reference points at a different object.
    #[error("reference update mismatch: expected {expected}, got {actual}")]
    RefUpdateMismatch {
        /// SHA of the commit the reference was moved to.
        expected: String,
        /// SHA the service reports the reference pointing at.
        actual: String,
    },

    /// A commit was requested with no files.
    #[error("cannot create a commit from an empty file set")]
    EmptyCommit,

    /// Client-side configuration is unusable (e.g. malformed base URL).
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
