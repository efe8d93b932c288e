//! Error types for the panel client

use thiserror::Error;

/// Errors that can occur when talking to the panel
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed or the body was not valid JSON
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid panel URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Panel returned an error status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Response lacked a nested field the normalized shape is built from
    #[error("missing field in panel response: {0}")]
    MissingField(String),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
