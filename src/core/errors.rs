//! Error types for pull operations

use thiserror::Error;

/// Errors surfaced while pulling translations
#[derive(Error, Debug)]
pub enum PullError {
    /// Credential could not be read from or written to its backing store
    #[error("credential store error for {key}: {message}")]
    CredentialStore {
        key: String,
        message: String,
    },

    /// HTTP transport failed before a usable response arrived
    #[error("transport error: {message}")]
    Transport {
        message: String,
    },

    /// The service answered with an empty body
    #[error("empty response body from {endpoint}")]
    MissingBody {
        endpoint: String,
    },

    /// Response body is not valid JSON
    #[error("malformed JSON response: {message}")]
    MalformedJson {
        message: String,
    },

    /// JSON parsed but does not have the expected shape
    #[error("unexpected response schema: {message}")]
    Schema {
        message: String,
    },

    /// Non-200 status; OneSky answers non-200 while an export file is still being generated
    #[error("unexpected status {status} exporting {file_name} for {locale}")]
    UnexpectedStatus {
        status: u16,
        locale: String,
        file_name: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pull operations
pub type Result<T> = std::result::Result<T, PullError>;
