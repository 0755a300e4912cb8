//! Repository scanner
//!
//! Wires configuration to the GraphQL client, the raw content fetcher, and the
//! tree walk: resolve the branch, fetch the tree once, classify its blobs.

use crate::binary::{BinaryChecker, Evidence, RawContentFetcher};
use crate::cancel::CancelSignal;
use crate::config::{FailurePolicy, ScanConfig};
use crate::error::ApiError;
use crate::github::GraphqlClient;
use crate::tree::{find_binaries_with, WalkerConfig, MAX_TREE_DEPTH};
use crate::types::{BinaryHint, RepoCoordinates};
use tracing::info;

/// Scans one repository.
pub struct RepoScanner {
    config: ScanConfig,
    http: reqwest::Client,
    graphql: GraphqlClient,
    cancel: CancelSignal,
}

impl RepoScanner {
    pub fn new(config: ScanConfig, cancel: CancelSignal) -> Result<Self, ApiError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("repo-baseline/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        let graphql = GraphqlClient::new(http.clone(), &config.graphql_url, config.token.clone());
        Ok(Self {
            config,
            http,
            graphql,
            cancel,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Configured branch, or the repository default.
    pub async fn resolve_branch(&self) -> Result<String, ApiError> {
        match &self.config.branch {
            Some(branch) => Ok(branch.clone()),
            None => {
                self.graphql
                    .default_branch(&self.config.owner, &self.config.repo)
                    .await
            }
        }
    }

    /// Binary checker fetching from `branch` of the configured repository.
    pub fn checker(&self, branch: &str) -> Result<BinaryChecker<RawContentFetcher>, ApiError> {
        let coords = RepoCoordinates::new(&self.config.owner, &self.config.repo, branch);
        let fetcher = RawContentFetcher::new(self.http.clone(), &self.config.raw_content_url, coords)
            .map_err(|e| ApiError::ConfigError(e.to_string()))?
            .with_timeout(self.config.fetch_timeout())
            .with_range_bytes(self.config.range_bytes)
            .with_token(self.config.token.clone())
            .with_cancel(self.cancel.clone());
        Ok(BinaryChecker::new(fetcher))
    }

    fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            max_depth: MAX_TREE_DEPTH,
            failure_policy: self.config.failure_policy,
            cancel: self.cancel.clone(),
        }
    }

    /// Names of suspected binary files in the top levels of the repository.
    pub async fn suspected_binaries(&self) -> Result<Vec<String>, ApiError> {
        let branch = self.resolve_branch().await?;
        let tree = self
            .graphql
            .fetch_repo_tree(&self.config.owner, &self.config.repo, &branch)
            .await?;
        let checker = self.checker(&branch)?;
        let found = find_binaries_with(tree.as_ref(), &checker, &self.walker_config()).await?;
        info!(
            owner = %self.config.owner,
            repo = %self.config.repo,
            branch = %branch,
            count = found.len(),
            fail_fast = self.config.failure_policy == FailurePolicy::FailFast,
            "Suspected binaries collected"
        );
        Ok(found)
    }

    /// Classify a single path without fetching the tree.
    pub async fn classify_path(
        &self,
        path: &str,
        hint: BinaryHint,
        truncated: bool,
    ) -> Result<(bool, Evidence), ApiError> {
        let branch = self.resolve_branch().await?;
        let checker = self.checker(&branch)?;
        Ok(checker.classify_with_evidence(hint, truncated, path).await?)
    }
}
