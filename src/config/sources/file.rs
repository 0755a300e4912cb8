//! TOML file source.

use crate::config::DEFAULT_CONFIG_FILE;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

/// Add a TOML file to the builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = path.to_str().ok_or_else(|| {
        ConfigError::Message(format!("Config path is not valid UTF-8: {}", path.display()))
    })?;
    Ok(builder.add_source(
        File::new(path, FileFormat::Toml).required(required),
    ))
}

/// Add `repo-baseline.toml` from `dir` when it exists.
pub fn add_default_to_builder(
    builder: ConfigBuilder<DefaultState>,
    dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    add_to_builder(builder, &dir.join(DEFAULT_CONFIG_FILE), false)
}
