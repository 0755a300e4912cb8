//! Partial-content fetcher
//!
//! Reads the first bytes of a file from a raw content host
//! (`<base>/<owner>/<repo>/<branch>/<path>`) using an HTTP range request.
//! Each request carries its own timeout and races the walk's cancel signal.

use crate::cancel::CancelSignal;
use crate::error::FetchError;
use crate::types::RepoCoordinates;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, RANGE};
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::trace;

/// Default raw content host.
pub const DEFAULT_RAW_CONTENT_URL: &str = "https://raw.githubusercontent.com";

/// Per-request timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of leading bytes requested.
pub const DEFAULT_RANGE_BYTES: u64 = 512;

/// Source of file prefixes for content sniffing.
#[async_trait]
pub trait PrefixFetcher: Send + Sync {
    /// Fetch up to the first few hundred bytes of `path`.
    async fn fetch_prefix(&self, path: &str) -> Result<Vec<u8>, FetchError>;
}

/// reqwest-backed fetcher for one repository/branch.
#[derive(Debug, Clone)]
pub struct RawContentFetcher {
    client: reqwest::Client,
    base_url: Url,
    coords: RepoCoordinates,
    token: Option<String>,
    timeout: Duration,
    range_bytes: u64,
    cancel: CancelSignal,
}

impl RawContentFetcher {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        coords: RepoCoordinates,
    ) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }
        Ok(Self {
            client,
            base_url,
            coords,
            token: None,
            timeout: DEFAULT_FETCH_TIMEOUT,
            range_bytes: DEFAULT_RANGE_BYTES,
            cancel: CancelSignal::never(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_range_bytes(mut self, range_bytes: u64) -> Self {
        self.range_bytes = range_bytes.max(1);
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn coords(&self) -> &RepoCoordinates {
        &self.coords
    }

    /// Build the raw content URL for `path`.
    ///
    /// Every `/`-separated segment of the branch and path is percent-escaped on
    /// its own, so separators survive while spaces, `#`, `?` and friends do not.
    pub fn content_url(&self, path: &str) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                FetchError::InvalidUrl(format!("{} cannot be used as a base URL", self.base_url))
            })?;
            segments
                .pop_if_empty()
                .push(&self.coords.owner)
                .push(&self.coords.repo)
                .extend(self.coords.branch.split('/'))
                .extend(path.split('/'));
        }
        Ok(url)
    }

    fn map_send_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            FetchError::Transport(err)
        }
    }

    fn map_body_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            FetchError::Body(err)
        }
    }

    async fn read_prefix(&self, mut response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let limit = self.range_bytes as usize;
        let mut content = Vec::with_capacity(limit.min(8192));
        // A 200 carries the whole file; stop once the prefix is complete.
        while content.len() < limit {
            match response.chunk().await.map_err(|e| self.map_body_error(e))? {
                Some(chunk) => content.extend_from_slice(&chunk),
                None => break,
            }
        }
        content.truncate(limit);
        Ok(content)
    }

    async fn fetch_uncancelled(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        let mut request = self
            .client
            .get(url)
            .header(RANGE, format!("bytes=0-{}", self.range_bytes - 1))
            .timeout(self.timeout);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }
        self.read_prefix(response).await
    }
}

#[async_trait]
impl PrefixFetcher for RawContentFetcher {
    async fn fetch_prefix(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.content_url(path)?;
        trace!(url = %url, range_bytes = self.range_bytes, "Fetching content prefix");

        if self.cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(FetchError::Cancelled),
            result = self.fetch_uncancelled(url) => result,
        }
    }
}
