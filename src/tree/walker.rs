//! Bounded tree walk for binary detection.
//!
//! Visits a pre-fetched repository tree depth-first, pre-order, in the order
//! the API returned the entries, and classifies every blob sequentially.
//! Only `MAX_TREE_DEPTH` levels are explored: the tree query stops there, so
//! deeper directories are never present in the data.

use crate::binary::{BinaryChecker, PrefixFetcher};
use crate::cancel::CancelSignal;
use crate::config::FailurePolicy;
use crate::error::{ClassifyError, FetchError};
use crate::tree::node::{RepoTree, TreeEntry};
use tracing::{info, warn};

/// Levels of the repository tree returned by the GraphQL query, root included.
pub const MAX_TREE_DEPTH: usize = 3;

/// Walk configuration.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    pub max_depth: usize,
    pub failure_policy: FailurePolicy,
    pub cancel: CancelSignal,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_TREE_DEPTH,
            failure_policy: FailurePolicy::FailFast,
            cancel: CancelSignal::never(),
        }
    }
}

/// Names of suspected binary files, with the default walk configuration.
pub async fn find_binaries<F: PrefixFetcher>(
    tree: Option<&RepoTree>,
    checker: &BinaryChecker<F>,
) -> Result<Vec<String>, ClassifyError> {
    find_binaries_with(tree, checker, &WalkerConfig::default()).await
}

/// Names (not paths) of suspected binary files, in traversal order.
///
/// A missing or empty tree yields an empty list. Under
/// `FailurePolicy::FailFast` the first classification error aborts the walk;
/// under `LogAndContinue` it is logged and the entry counts as text.
/// Cancellation always aborts.
pub async fn find_binaries_with<F: PrefixFetcher>(
    tree: Option<&RepoTree>,
    checker: &BinaryChecker<F>,
    config: &WalkerConfig,
) -> Result<Vec<String>, ClassifyError> {
    let Some(tree) = tree else {
        return Ok(Vec::new());
    };
    if tree.is_empty() || config.max_depth == 0 {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    let mut blobs_checked = 0usize;
    let mut skipped_trees = 0usize;
    let mut stack: Vec<(std::slice::Iter<'_, TreeEntry>, usize)> =
        vec![(tree.entries.iter(), 0)];

    while let Some((entries, depth)) = stack.last_mut() {
        let depth = *depth;
        let Some(entry) = entries.next() else {
            stack.pop();
            continue;
        };

        if entry.is_blob() {
            if config.cancel.is_cancelled() {
                return Err(ClassifyError::Fetch {
                    path: entry.path.clone(),
                    source: FetchError::Cancelled,
                });
            }
            blobs_checked += 1;
            if classify_entry(entry, checker, config).await? {
                found.push(entry.name.clone());
            }
        } else if entry.is_tree() {
            match entry.children() {
                Some(children) if depth + 1 < config.max_depth => {
                    stack.push((children.iter(), depth + 1));
                }
                _ => skipped_trees += 1,
            }
        }
    }

    info!(
        blobs_checked,
        binaries = found.len(),
        skipped_trees,
        "Binary scan finished"
    );
    Ok(found)
}

async fn classify_entry<F: PrefixFetcher>(
    entry: &TreeEntry,
    checker: &BinaryChecker<F>,
    config: &WalkerConfig,
) -> Result<bool, ClassifyError> {
    let meta = entry.blob_metadata().cloned().unwrap_or_default();
    match checker
        .classify(meta.is_binary, meta.is_truncated, &entry.path)
        .await
    {
        Ok(binary) => Ok(binary),
        Err(err) if err.is_cancelled() => Err(err),
        Err(err) => match config.failure_policy {
            FailurePolicy::FailFast => Err(err),
            FailurePolicy::LogAndContinue => {
                warn!(path = %entry.path, error = %err, "Treating entry as text after failed check");
                Ok(false)
            }
        },
    }
}
