//! Merge policy: defaults seeded into the builder before any source.

pub mod service;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

use super::{
    default_fetch_timeout_secs, default_graphql_url, default_range_bytes, default_raw_content_url,
};

/// Builder pre-populated with the lowest-precedence defaults.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("graphql_url", default_graphql_url())?
        .set_default("raw_content_url", default_raw_content_url())?
        .set_default("fetch_timeout_secs", default_fetch_timeout_secs())?
        .set_default("range_bytes", default_range_bytes())?
        .set_default("failure_policy", "fail-fast")
}
