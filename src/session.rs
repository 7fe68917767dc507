//! Report session: the state machine tracking one test run.
//!
//! A `ReportSession` is bound to one run and drives the launch/suite/step
//! hierarchy on the remote service. Connectivity is probed once, in the
//! background, right after construction; if the probe fails the session
//! degrades to a no-op mode that returns sentinel identifiers so test
//! execution never blocks on reporting availability.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use futures_util::future;
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::{ReportError, ReportResult};
use crate::models::{
    FinishItemRequest, FinishLaunchRequest, Issue, ItemType, LogAttachment, LogEntry,
    StartItemRequest, StartLaunchRequest, TestRunInfo, TestStatus,
};
use crate::services::error_format::{ErrorFormatter, clean_error_text};
use crate::services::http_client::HttpReportingClient;
use crate::services::remote::RemoteReporting;

/// Identifier returned by `start_launch` while disconnected.
pub const UNKNOWN_LAUNCH_ID: &str = "Unknown Launch ID";

/// Identifier returned by `capture_fixture_item` while disconnected.
pub const UNKNOWN_TEST_ID: &str = "Unknown Test ID";

/// Log message accompanying every screenshot attachment.
const SCREENSHOT_LOG_MESSAGE: &str = "Error Screenshot";

/// Connectivity state of the session.
///
/// `Pending` behaves as connected: operations issued before the probe
/// resolves proceed optimistically and may fail against an unreachable
/// remote. This race is part of the session's contract; callers that need
/// certainty must wait out the probe themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Probe not resolved yet; treated as connected
    Pending,
    Connected,
    Disconnected,
}

impl Connectivity {
    fn as_u8(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Connected => 1,
            Self::Disconnected => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Connected,
            2 => Self::Disconnected,
            _ => Self::Pending,
        }
    }
}

/// The launch a session reports under.
///
/// `Fresh` launches were started (and will be finished) by this session;
/// `Reused` launches belong to another process and are never finished here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    /// Started by this session; carries the temporary identifier
    Fresh(String),
    /// Pre-existing launch supplied via configuration
    Reused(String),
}

impl Launch {
    /// Identifier all further operations address the launch by.
    pub fn id(&self) -> &str {
        match self {
            Self::Fresh(id) | Self::Reused(id) => id,
        }
    }

    /// Whether this session is responsible for finishing the launch.
    pub fn owned(&self) -> bool {
        matches!(self, Self::Fresh(_))
    }
}

/// Stateful reporter for one test run.
///
/// Caller-driven: construct once, call `start_launch`, one
/// `capture_fixture_item` per suite, one `capture_test_item` per step, and
/// `finish_launch` at run end. Must be constructed inside a Tokio runtime
/// (the connectivity probe is spawned immediately).
pub struct ReportSession {
    config: SessionConfig,
    client: Arc<dyn RemoteReporting>,
    connectivity: Arc<AtomicU8>,
    launch: Option<Launch>,
    /// Open fixtures in creation order, finished in bulk at run end
    fixtures: Vec<String>,
}

impl ReportSession {
    /// Create a session talking HTTP to the configured service.
    pub fn new(config: SessionConfig) -> Self {
        let client = Arc::new(HttpReportingClient::new(&config));
        Self::with_client(config, client)
    }

    /// Create a session with an injected reporting client.
    pub fn with_client(config: SessionConfig, client: Arc<dyn RemoteReporting>) -> Self {
        let connectivity = Arc::new(AtomicU8::new(Connectivity::Pending.as_u8()));

        // Probe in the background; construction itself never fails on an
        // unreachable remote.
        let probe_client = Arc::clone(&client);
        let probe_flag = Arc::clone(&connectivity);
        tokio::spawn(async move {
            match probe_client.check_connectivity().await {
                Ok(()) => {
                    probe_flag.store(Connectivity::Connected.as_u8(), Ordering::SeqCst);
                }
                Err(e) => {
                    warn!(
                        "Error connecting to the reporting service, \
                         confirm that your details are correct: {e}"
                    );
                    probe_flag.store(Connectivity::Disconnected.as_u8(), Ordering::SeqCst);
                }
            }
        });

        Self {
            config,
            client,
            connectivity,
            launch: None,
            fixtures: Vec::new(),
        }
    }

    /// Current connectivity state.
    pub fn connectivity(&self) -> Connectivity {
        Connectivity::from_u8(self.connectivity.load(Ordering::SeqCst))
    }

    /// The launch this session reports under, once started.
    pub fn launch(&self) -> Option<&Launch> {
        self.launch.as_ref()
    }

    /// Temporary identifiers of all fixtures opened so far.
    pub fn open_fixtures(&self) -> &[String] {
        &self.fixtures
    }

    fn is_reporting(&self) -> bool {
        self.connectivity() != Connectivity::Disconnected
    }

    /// Start the run's launch and return its identifier.
    ///
    /// With a configured launch-id override the remote is not called: the
    /// session attaches to the existing launch and returns the override
    /// verbatim. Disconnected sessions return [`UNKNOWN_LAUNCH_ID`].
    pub async fn start_launch(&mut self) -> ReportResult<String> {
        if !self.is_reporting() {
            return Ok(UNKNOWN_LAUNCH_ID.to_string());
        }

        if let Some(id) = self.config.launch_id_override.clone() {
            self.launch = Some(Launch::Reused(id.clone()));
            return Ok(id);
        }

        let request = StartLaunchRequest {
            name: self.config.launch_name.clone(),
            description: self.config.description.clone(),
            tags: self
                .config
                .tags
                .as_ref()
                .map(|tags| tags.iter().cloned().collect()),
        };
        let temp_id = self.client.start_launch(request).await?;
        self.launch = Some(Launch::Fresh(temp_id.clone()));
        Ok(temp_id)
    }

    /// Open a suite under `launch_id` and return its identifier.
    ///
    /// Every call opens a new suite, even for a repeated name; the session
    /// tracks it for bulk finishing. Ancestry is not validated locally; the
    /// remote rejects items started under foreign identifiers. Disconnected
    /// sessions return [`UNKNOWN_TEST_ID`].
    pub async fn capture_fixture_item(
        &mut self,
        launch_id: &str,
        fixture_name: &str,
    ) -> ReportResult<String> {
        if !self.is_reporting() {
            return Ok(UNKNOWN_TEST_ID.to_string());
        }

        let request = StartItemRequest {
            name: fixture_name.to_string(),
            item_type: ItemType::Suite,
            start_time: None,
        };
        let suite_id = self.client.start_test_item(request, launch_id, None).await?;
        self.fixtures.push(suite_id.clone());
        Ok(suite_id)
    }

    /// Report one finished step under `fixture_id`.
    ///
    /// Starts the step, fans out its screenshot attachments and formatted
    /// error logs concurrently, then finishes it with the runner's status
    /// and timing. Skipped steps are marked `NOT_ISSUE` so the service does
    /// not count them as real failures. The step identifier never leaves
    /// this call. Disconnected sessions do nothing.
    pub async fn capture_test_item(
        &self,
        launch_id: &str,
        fixture_id: &str,
        step_name: &str,
        status: TestStatus,
        test_run_info: &TestRunInfo,
        formatter: &dyn ErrorFormatter,
    ) -> ReportResult<()> {
        if !self.is_reporting() {
            return Ok(());
        }

        let start_time = self.client.now();
        let step_id = self
            .client
            .start_test_item(
                StartItemRequest {
                    name: step_name.to_string(),
                    item_type: ItemType::Step,
                    start_time: Some(start_time),
                },
                launch_id,
                Some(fixture_id),
            )
            .await?;

        debug!(
            "test run info for {step_name}: {}",
            serde_json::to_string_pretty(test_run_info).unwrap_or_default()
        );

        let mut log_sends = Vec::new();

        if let Some(screenshots) = &test_run_info.screenshots {
            for screenshot in screenshots {
                let content = tokio::fs::read(&screenshot.screenshot_path)
                    .await
                    .map_err(|source| ReportError::Screenshot {
                        path: screenshot.screenshot_path.clone(),
                        source,
                    })?;
                log_sends.push(self.client.send_log(
                    &step_id,
                    LogEntry::error(SCREENSHOT_LOG_MESSAGE, start_time),
                    Some(LogAttachment::png(format!("{step_name}.png"), content)),
                ));
            }
        }

        if let Some(errs) = &test_run_info.errs {
            for err in errs {
                let message = clean_error_text(&formatter.format_error(err));
                log_sends.push(
                    self.client
                        .send_log(&step_id, LogEntry::error(message, start_time), None),
                );
            }
        }

        // All log sends are issued concurrently; one failing does not stop
        // the others. The first failure still surfaces to the caller.
        for result in future::join_all(log_sends).await {
            result?;
        }

        let end_time = start_time + test_run_info.duration_ms;
        let request = FinishItemRequest {
            issue: status.is_skipped().then(Issue::not_issue),
            status: Some(status),
            end_time,
        };
        self.client.finish_test_item(&step_id, request).await
    }

    /// Finish every tracked fixture.
    ///
    /// Finishes are issued concurrently and jointly awaited. The tracked
    /// list is not cleared: a second call re-finishes the same items.
    pub async fn finish_fixture(&self) -> ReportResult<()> {
        if !self.is_reporting() {
            return Ok(());
        }

        let finishes = self.fixtures.iter().map(|fixture_id| {
            self.client
                .finish_test_item(fixture_id, FinishItemRequest::at(self.client.now()))
        });
        for result in future::join_all(finishes).await {
            result?;
        }
        Ok(())
    }

    /// Close the run: all fixtures first, then the launch itself.
    ///
    /// A reused launch belongs to another process and is left open; only a
    /// launch this session started gets the remote finish call.
    pub async fn finish_launch(&self, launch_id: &str) -> ReportResult<()> {
        if !self.is_reporting() {
            return Ok(());
        }

        self.finish_fixture().await?;

        if let Some(launch) = &self.launch
            && !launch.owned()
        {
            return Ok(());
        }

        self.client
            .finish_launch(
                launch_id,
                FinishLaunchRequest {
                    end_time: self.client.now(),
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_round_trip() {
        for state in [
            Connectivity::Pending,
            Connectivity::Connected,
            Connectivity::Disconnected,
        ] {
            assert_eq!(Connectivity::from_u8(state.as_u8()), state);
        }
    }

    #[test]
    fn test_unknown_flag_value_reads_as_pending() {
        assert_eq!(Connectivity::from_u8(7), Connectivity::Pending);
    }

    #[test]
    fn test_fresh_launch_is_owned() {
        let launch = Launch::Fresh("temp-1".to_string());
        assert_eq!(launch.id(), "temp-1");
        assert!(launch.owned());
    }

    #[test]
    fn test_reused_launch_is_not_owned() {
        let launch = Launch::Reused("external-9".to_string());
        assert_eq!(launch.id(), "external-9");
        assert!(!launch.owned());
    }

    #[test]
    fn test_sentinels_match_contract() {
        assert_eq!(UNKNOWN_LAUNCH_ID, "Unknown Launch ID");
        assert_eq!(UNKNOWN_TEST_ID, "Unknown Test ID");
    }
}
