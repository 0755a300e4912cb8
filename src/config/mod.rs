//! Configuration
//!
//! `ScanConfig` is assembled from defaults, an optional TOML file, and
//! `REPO_BASELINE__*` environment variables. CLI flags are applied last by the
//! tooling layer.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::binary::fetch::{DEFAULT_FETCH_TIMEOUT, DEFAULT_RANGE_BYTES, DEFAULT_RAW_CONTENT_URL};
use crate::error::ApiError;
use crate::github::DEFAULT_GRAPHQL_URL;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default config file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "repo-baseline.toml";

/// What a tree walk does when a single entry cannot be classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Abort the walk with the first error.
    #[default]
    FailFast,
    /// Log the error and count the entry as text.
    LogAndContinue,
}

/// Scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Repository owner (user or organization).
    #[serde(default)]
    pub owner: String,

    /// Repository name.
    #[serde(default)]
    pub repo: String,

    /// Branch to scan; the default branch is queried when unset.
    #[serde(default)]
    pub branch: Option<String>,

    /// GitHub token.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,

    #[serde(default = "default_raw_content_url")]
    pub raw_content_url: String,

    /// Timeout of each partial-content request, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Bytes requested from the start of each sniffed file.
    #[serde(default = "default_range_bytes")]
    pub range_bytes: u64,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    #[serde(default)]
    pub logging: LoggingConfig,
}

pub(crate) fn default_graphql_url() -> String {
    DEFAULT_GRAPHQL_URL.to_string()
}

pub(crate) fn default_raw_content_url() -> String {
    DEFAULT_RAW_CONTENT_URL.to_string()
}

pub(crate) fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_secs()
}

pub(crate) fn default_range_bytes() -> u64 {
    DEFAULT_RANGE_BYTES
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            branch: None,
            token: None,
            graphql_url: default_graphql_url(),
            raw_content_url: default_raw_content_url(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            range_bytes: default_range_bytes(),
            failure_policy: FailurePolicy::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ScanConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Check the fields a scan needs.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.owner.trim().is_empty() {
            return Err(ApiError::ConfigError(
                "Repository owner is required".to_string(),
            ));
        }
        if self.repo.trim().is_empty() {
            return Err(ApiError::ConfigError(
                "Repository name is required".to_string(),
            ));
        }
        if let Some(branch) = &self.branch {
            if branch.trim().is_empty() {
                return Err(ApiError::ConfigError(
                    "Branch cannot be empty when set".to_string(),
                ));
            }
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ApiError::ConfigError(
                "fetch_timeout_secs must be positive".to_string(),
            ));
        }
        if self.range_bytes == 0 {
            return Err(ApiError::ConfigError(
                "range_bytes must be positive".to_string(),
            ));
        }
        for (key, url) in [
            ("graphql_url", &self.graphql_url),
            ("raw_content_url", &self.raw_content_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ApiError::ConfigError(format!(
                    "Invalid {}: {} (must be http or https)",
                    key, url
                )));
            }
        }
        Ok(())
    }
}
