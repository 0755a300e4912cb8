//! Core types shared across the tree walker, classifier, and GraphQL client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies where raw file content is fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoCoordinates {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl RepoCoordinates {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }
}

impl fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.branch)
    }
}

/// Binary signal reported inline by the tree API.
///
/// `None` means the API had no opinion; `Some(false)` is a definite "text".
pub type BinaryHint = Option<bool>;
