//! Test-run information handed over by the test runner for one step.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Everything the runner knows about one finished step.
///
/// Field names mirror the runner's own JSON shape (camelCase) so the struct
/// can be deserialized straight from runner output and pretty-printed for
/// diagnostics without renaming.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunInfo {
    /// Step duration in milliseconds
    pub duration_ms: i64,
    /// Screenshots captured while the step ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<Screenshot>>,
    /// Raw runner error objects; formatting is the caller's concern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errs: Option<Vec<JsonValue>>,
    /// Whether the runner skipped the step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,
}

/// One screenshot captured by the runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    /// Path of the image file on local disk
    pub screenshot_path: PathBuf,
    /// Set when the runner captured the image because the step failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken_on_fail: Option<bool>,
}
