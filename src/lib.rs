//! Repo Baseline: OSPS Baseline checks for GitHub repositories
//!
//! Fetches the top levels of a repository tree through the GitHub GraphQL API
//! and flags binary files, using the API's inline hints, a known-text
//! extension list, and range requests against the raw content host.

pub mod assessment;
pub mod binary;
pub mod cancel;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod scanner;
pub mod tooling;
pub mod tree;
pub mod types;
