//! OSPS "no binaries in repository" control step.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Control identifier in the OSPS Baseline catalog.
pub const NO_BINARIES_CONTROL: &str = "OSPS-QA-05.01";

/// Outcome of a control assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlResult {
    Passed,
    Failed,
    NeedsReview,
    Unknown,
}

impl ControlResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlResult::Passed => "passed",
            ControlResult::Failed => "failed",
            ControlResult::NeedsReview => "needs-review",
            ControlResult::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ControlResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result plus a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub control: String,
    pub result: ControlResult,
    pub message: String,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        self.result == ControlResult::Passed
    }

    pub fn to_text(&self) -> String {
        format!("[{}] {}: {}", self.result, self.control, self.message)
    }
}

/// Evaluate the no-binaries control from the outcome of a binary scan.
///
/// A scan error is not a failure: the verdict is `Unknown` so a reviewer
/// looks at it.
pub fn no_binaries_in_repo(scan: Result<Vec<String>, ApiError>) -> Verdict {
    let (result, message) = match scan {
        Err(err) => {
            debug!(error = %err, "Unexpected response while checking for binaries");
            (
                ControlResult::Unknown,
                "Error while scanning repository for binaries, potentially due to repo size. See logs for details.".to_string(),
            )
        }
        Ok(found) if found.is_empty() => (
            ControlResult::Passed,
            "No binary files were found in the repository".to_string(),
        ),
        Ok(found) => (
            ControlResult::Failed,
            format!(
                "Suspected binaries found in the repository: {}",
                found.join(", ")
            ),
        ),
    };
    Verdict {
        control: NO_BINARIES_CONTROL.to_string(),
        result,
        message,
    }
}
