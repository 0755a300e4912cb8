//! MergeService: orchestrates sources, applies merge policy, deserializes to ScanConfig.

use crate::config::sources::{environment, file};
use crate::config::ScanConfig;
use config::ConfigError;
use std::path::Path;

use super::builder_with_defaults;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from the working directory and environment.
    /// Precedence: defaults (lowest) -> `repo-baseline.toml` if present -> environment (highest).
    pub fn load(working_dir: &Path) -> Result<ScanConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = file::add_default_to_builder(builder, working_dir)?;
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }

    /// Load config from a specific file with environment overlay. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<ScanConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = file::add_to_builder(builder, path, true)?;
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }
}
