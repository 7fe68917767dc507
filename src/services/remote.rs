//! Contract of the remote reporting backend.

use async_trait::async_trait;
use chrono::Utc;

use crate::error::ReportResult;
use crate::models::{
    FinishItemRequest, FinishLaunchRequest, LogAttachment, LogEntry, StartItemRequest,
    StartLaunchRequest,
};

/// Asynchronous client to the reporting backend.
///
/// The session only ever deals in the temporary identifiers these operations
/// return; resolving them to permanent ones is the backend's business. The
/// trait is the seam tests mock out.
#[async_trait]
pub trait RemoteReporting: Send + Sync {
    /// Probe the service. Used once per session, right after construction.
    async fn check_connectivity(&self) -> ReportResult<()>;

    /// Start a launch; returns its temporary identifier.
    async fn start_launch(&self, request: StartLaunchRequest) -> ReportResult<String>;

    /// Start a suite or step under `launch_id` (and optionally a parent
    /// item); returns the new item's temporary identifier.
    async fn start_test_item(
        &self,
        request: StartItemRequest,
        launch_id: &str,
        parent_id: Option<&str>,
    ) -> ReportResult<String>;

    /// Attach a log entry (optionally with a binary attachment) to an item.
    async fn send_log(
        &self,
        item_id: &str,
        entry: LogEntry,
        attachment: Option<LogAttachment>,
    ) -> ReportResult<()>;

    /// Finish a suite or step.
    async fn finish_test_item(&self, item_id: &str, request: FinishItemRequest)
    -> ReportResult<()>;

    /// Finish a launch.
    async fn finish_launch(
        &self,
        launch_id: &str,
        request: FinishLaunchRequest,
    ) -> ReportResult<()>;

    /// Current time in the unit the service expects (epoch milliseconds).
    fn now(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
