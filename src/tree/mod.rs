//! Repository tree
//!
//! Data model for the depth-limited tree returned by the GitHub GraphQL API
//! and the bounded walk that classifies its blobs.

pub mod node;
pub mod walker;

pub use node::{BlobMetadata, EntryKind, EntryObject, RepoTree, TreeEntry};
pub use walker::{find_binaries, find_binaries_with, WalkerConfig, MAX_TREE_DEPTH};
