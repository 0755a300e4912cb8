//! Environment variable source: REPO_BASELINE__* with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "REPO_BASELINE";

/// Add environment variable overlay to builder.
/// `REPO_BASELINE__FETCH_TIMEOUT_SECS=5` sets `fetch_timeout_secs`,
/// `REPO_BASELINE__LOGGING__LEVEL=debug` sets `logging.level`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    ))
}
