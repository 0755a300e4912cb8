//! Repository tree nodes as returned by the GitHub GraphQL tree query.

use crate::types::BinaryHint;
use serde::{Deserialize, Serialize};

/// Entry kind reported by the API (`"blob"`, `"tree"`, `"commit"` for submodules).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntryKind {
    Blob,
    Tree,
    Other(String),
}

impl From<String> for EntryKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "blob" => EntryKind::Blob,
            "tree" => EntryKind::Tree,
            _ => EntryKind::Other(value),
        }
    }
}

impl From<EntryKind> for String {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Blob => "blob".to_string(),
            EntryKind::Tree => "tree".to_string(),
            EntryKind::Other(other) => other,
        }
    }
}

/// Blob metadata.
///
/// `is_truncated` is set when the API could not inline enough content to make
/// a binary determination; `is_binary` is then usually absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobMetadata {
    #[serde(default)]
    pub is_binary: BinaryHint,
    #[serde(default)]
    pub is_truncated: bool,
}

/// The `object` of an entry: a child tree for directories, metadata for blobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryObject {
    Tree(RepoTree),
    Blob(BlobMetadata),
}

/// One entry of a tree level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub path: String,
    #[serde(default)]
    pub object: Option<EntryObject>,
}

impl TreeEntry {
    pub fn blob(path: &str, is_binary: BinaryHint, is_truncated: bool) -> Self {
        Self {
            name: file_name(path).to_string(),
            kind: EntryKind::Blob,
            path: path.to_string(),
            object: Some(EntryObject::Blob(BlobMetadata {
                is_binary,
                is_truncated,
            })),
        }
    }

    pub fn directory(path: &str, entries: Vec<TreeEntry>) -> Self {
        Self {
            name: file_name(path).to_string(),
            kind: EntryKind::Tree,
            path: path.to_string(),
            object: Some(EntryObject::Tree(RepoTree { entries })),
        }
    }

    pub fn is_blob(&self) -> bool {
        self.kind == EntryKind::Blob
    }

    pub fn is_tree(&self) -> bool {
        self.kind == EntryKind::Tree
    }

    /// Blob metadata, only for blob entries.
    pub fn blob_metadata(&self) -> Option<&BlobMetadata> {
        match (&self.kind, &self.object) {
            (EntryKind::Blob, Some(EntryObject::Blob(meta))) => Some(meta),
            _ => None,
        }
    }

    /// Child entries, only for tree entries whose level was fetched.
    pub fn children(&self) -> Option<&[TreeEntry]> {
        match (&self.kind, &self.object) {
            (EntryKind::Tree, Some(EntryObject::Tree(tree))) => Some(&tree.entries),
            _ => None,
        }
    }
}

/// One level of a repository tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoTree {
    pub entries: Vec<TreeEntry>,
}

impl RepoTree {
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
