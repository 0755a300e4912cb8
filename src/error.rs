//! Error types
//!
//! One error enum per layer: raw content fetches, per-entry classification,
//! and the crate-wide `ApiError` surfaced to the CLI and assessment steps.

use thiserror::Error;

/// Failure of a single partial-content fetch against the raw content host.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid raw content URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Unexpected status: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("Fetch cancelled")]
    Cancelled,
}

impl FetchError {
    /// HTTP status code carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure to decide whether a single tree entry is binary.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Failed to check binary status of {path}: {source}")]
    Fetch {
        path: String,
        #[source]
        source: FetchError,
    },
}

impl ClassifyError {
    pub fn path(&self) -> &str {
        match self {
            ClassifyError::Fetch { path, .. } => path,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            ClassifyError::Fetch {
                source: FetchError::Cancelled,
                ..
            }
        )
    }
}

/// Crate-wide error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("GraphQL error: {0}")]
    GraphqlError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
