//! GitHub GraphQL client
//!
//! Two queries: the repository's default branch, and the repository tree
//! fixed at three levels with inline blob binary/truncation signals.

use crate::error::ApiError;
use crate::tree::RepoTree;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Public GitHub GraphQL endpoint.
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

const CLIENT_USER_AGENT: &str = concat!("repo-baseline/", env!("CARGO_PKG_VERSION"));

const DEFAULT_BRANCH_QUERY: &str = r#"query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    defaultBranchRef { name }
  }
}"#;

/// Tree query. Depth is fixed by the selection set; the walker mirrors it.
pub const REPO_TREE_QUERY: &str = r#"query($owner: String!, $name: String!, $branch: String!) {
  repository(owner: $owner, name: $name) {
    object(expression: $branch) {
      ... on Tree {
        entries {
          name
          type
          path
          object {
            ... on Blob { isBinary isTruncated }
            ... on Tree {
              entries {
                name
                type
                path
                object {
                  ... on Blob { isBinary isTruncated }
                  ... on Tree {
                    entries {
                      name
                      type
                      path
                      object {
                        ... on Blob { isBinary isTruncated }
                      }
                    }
                  }
                }
              }
            }
          }
        }
      }
    }
  }
}"#;

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DefaultBranchData {
    repository: Option<DefaultBranchRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DefaultBranchRepository {
    default_branch_ref: Option<BranchRef>,
}

#[derive(Debug, Deserialize)]
struct BranchRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TreeData {
    repository: Option<TreeRepository>,
}

#[derive(Debug, Deserialize)]
struct TreeRepository {
    object: Option<RepoTree>,
}

/// Minimal GraphQL client over reqwest.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    timeout: Duration,
}

impl GraphqlClient {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            token: token.filter(|t| !t.is_empty()),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run a query and decode its `data`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ApiError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .timeout(self.timeout)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(format!("GraphQL request failed: {}", e)))?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized(
                "GitHub rejected the token for the GraphQL API".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(format!(
                "GraphQL request returned status {}: {}",
                status, body
            )));
        }

        let decoded: GraphqlResponse<T> = response
            .json()
            .await
            .map_err(|e| ApiError::GraphqlError(format!("Failed to decode response: {}", e)))?;
        if !decoded.errors.is_empty() {
            let messages: Vec<&str> = decoded.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(ApiError::GraphqlError(messages.join("; ")));
        }
        decoded
            .data
            .ok_or_else(|| ApiError::GraphqlError("Response carried no data".to_string()))
    }

    /// Name of the repository's default branch.
    pub async fn default_branch(&self, owner: &str, repo: &str) -> Result<String, ApiError> {
        let data: DefaultBranchData = self
            .query(
                DEFAULT_BRANCH_QUERY,
                json!({ "owner": owner, "name": repo }),
            )
            .await?;
        let repository = data.repository.ok_or_else(|| {
            ApiError::GraphqlError(format!("Repository {}/{} not found", owner, repo))
        })?;
        let branch = repository.default_branch_ref.ok_or_else(|| {
            ApiError::GraphqlError(format!("Repository {}/{} has no default branch", owner, repo))
        })?;
        debug!(owner, repo, branch = %branch.name, "Resolved default branch");
        Ok(branch.name)
    }

    /// Top three levels of the tree at `branch`. `None` when the branch does
    /// not resolve to a tree.
    pub async fn fetch_repo_tree(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Option<RepoTree>, ApiError> {
        let expression = format!("{}:", branch);
        let data: TreeData = self
            .query(
                REPO_TREE_QUERY,
                json!({ "owner": owner, "name": repo, "branch": expression }),
            )
            .await?;
        let repository = data.repository.ok_or_else(|| {
            ApiError::GraphqlError(format!("Repository {}/{} not found", owner, repo))
        })?;
        if repository.object.is_none() {
            warn!(owner, repo, branch, "Branch did not resolve to a tree");
        }
        Ok(repository.object)
    }
}
