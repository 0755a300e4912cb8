//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ScanConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration: explicit file when given, else the default file in
    /// `working_dir` if present; environment always overlays.
    pub fn load(config_file: Option<&Path>, working_dir: &Path) -> Result<ScanConfig, ApiError> {
        let config = match config_file {
            Some(path) => MergeService::load_from_file(path)?,
            None => MergeService::load(working_dir)?,
        };
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> ScanConfig {
        ScanConfig::default()
    }
}
