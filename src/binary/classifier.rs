//! Per-entry binary decision.
//!
//! Order of evidence:
//! 1. an inline hint from the tree API is authoritative;
//! 2. a known-text extension means text;
//! 3. a truncated blob is settled by fetching and sniffing its prefix;
//! 4. otherwise the entry is not binary.
//!
//! A network request is only made in case 3.

use crate::binary::extension::is_known_text_extension;
use crate::binary::fetch::{PrefixFetcher, RawContentFetcher};
use crate::binary::sniff::looks_binary;
use crate::error::ClassifyError;
use crate::types::BinaryHint;
use tracing::debug;

/// Which rule settled a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evidence {
    Hint,
    KnownTextExtension,
    ContentSniff,
    NoEvidence,
}

impl Evidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Evidence::Hint => "hint",
            Evidence::KnownTextExtension => "known-text-extension",
            Evidence::ContentSniff => "content-sniff",
            Evidence::NoEvidence => "no-evidence",
        }
    }
}

/// Classifies tree entries as binary or text.
///
/// Holds no mutable state; one checker serves one walk at a time.
#[derive(Debug, Clone)]
pub struct BinaryChecker<F = RawContentFetcher> {
    fetcher: F,
}

impl<F: PrefixFetcher> BinaryChecker<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Decide whether the blob at `path` is binary.
    pub async fn classify(
        &self,
        hint: BinaryHint,
        truncated: bool,
        path: &str,
    ) -> Result<bool, ClassifyError> {
        let (binary, evidence) = self.classify_with_evidence(hint, truncated, path).await?;
        debug!(path, binary, evidence = evidence.as_str(), "Classified entry");
        Ok(binary)
    }

    /// Same as [`classify`](Self::classify), also reporting which rule decided.
    pub async fn classify_with_evidence(
        &self,
        hint: BinaryHint,
        truncated: bool,
        path: &str,
    ) -> Result<(bool, Evidence), ClassifyError> {
        if let Some(binary) = hint {
            return Ok((binary, Evidence::Hint));
        }
        if is_known_text_extension(path) {
            return Ok((false, Evidence::KnownTextExtension));
        }
        if !truncated {
            return Ok((false, Evidence::NoEvidence));
        }

        let prefix = self
            .fetcher
            .fetch_prefix(path)
            .await
            .map_err(|source| ClassifyError::Fetch {
                path: path.to_string(),
                source,
            })?;
        Ok((looks_binary(&prefix), Evidence::ContentSniff))
    }
}
