//! Request and response payloads exchanged with the reporting service.

use serde::{Deserialize, Serialize};

use super::status::{Issue, TestStatus};

/// Kind of reported test item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemType {
    /// A named grouping of steps (usually one test file)
    Suite,
    /// The smallest reported unit
    Step,
}

impl ItemType {
    /// Convert to the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suite => "SUITE",
            Self::Step => "STEP",
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of a log entry sent to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

/// Payload for starting a launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartLaunchRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Payload for starting a suite or step item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartItemRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Epoch milliseconds; the service stamps its own time when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
}

/// Payload for finishing a suite or step item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishItemRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TestStatus>,
    /// Epoch milliseconds
    pub end_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<Issue>,
}

impl FinishItemRequest {
    /// Finish payload carrying only an end time (used for suites).
    pub fn at(end_time: i64) -> Self {
        FinishItemRequest {
            status: None,
            end_time,
            issue: None,
        }
    }
}

/// Payload for finishing a launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishLaunchRequest {
    /// Epoch milliseconds
    pub end_time: i64,
}

/// One log entry attached to a test item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "status")]
    pub level: LogLevel,
    pub message: String,
    /// Epoch milliseconds
    pub time: i64,
}

impl LogEntry {
    /// Error-level entry, the only severity this client emits.
    pub fn error(message: impl Into<String>, time: i64) -> Self {
        LogEntry {
            level: LogLevel::Error,
            message: message.into(),
            time,
        }
    }
}

/// Binary attachment accompanying a log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogAttachment {
    /// File name shown by the service (e.g. "step-1.png")
    pub name: String,
    /// MIME type of the content
    pub content_type: String,
    pub content: Vec<u8>,
}

impl LogAttachment {
    /// PNG attachment, the only kind this client sends.
    pub fn png(name: impl Into<String>, content: Vec<u8>) -> Self {
        LogAttachment {
            name: name.into(),
            content_type: "image/png".to_string(),
            content,
        }
    }
}

/// Response to a start-launch call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchStarted {
    /// Temporary launch identifier
    pub id: String,
}

/// Response to a start-item call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemStarted {
    /// Temporary item identifier
    pub id: String,
}
