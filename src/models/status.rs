//! Test execution status and issue markers.

use serde::{Deserialize, Serialize};

/// Test execution status.
///
/// The remote service accepts arbitrary status strings; the common runner
/// outcomes get their own variants and anything else rides in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
    #[serde(untagged)]
    Other(String),
}

impl TestStatus {
    /// Convert to the wire string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Other(s) => s,
        }
    }

    /// Parse from string representation.
    pub fn parse(s: &str) -> Self {
        match s {
            "passed" => Self::Passed,
            "failed" => Self::Failed,
            "skipped" => Self::Skipped,
            other => Self::Other(other.to_string()),
        }
    }

    /// Skipped steps are finished with a NOT_ISSUE marker so the remote
    /// service does not count them as real failures.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Issue classification attached to a finished item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueType {
    #[serde(rename = "NOT_ISSUE")]
    NotIssue,
}

/// Issue payload inside a finish request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub issue_type: IssueType,
}

impl Issue {
    /// The only issue this client ever sends: mark a skipped step as not a bug.
    pub fn not_issue() -> Self {
        Issue {
            issue_type: IssueType::NotIssue,
        }
    }
}
