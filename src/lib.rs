//! Client library for reporting test runs to a remote test-management service.
//!
//! One run maps to one launch on the service, containing suites (fixtures),
//! containing steps, each with status, timing, logs and optional screenshot
//! attachments. The [`session::ReportSession`] state machine owns the
//! hierarchy and degrades to no-ops when the service is unreachable, so test
//! execution never depends on reporting availability.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;

// Re-export the caller-facing surface
pub use config::{ConfigError, SessionConfig};
pub use error::{ReportError, ReportResult};
pub use models::{TestRunInfo, TestStatus};
pub use services::{ErrorFormatter, HttpReportingClient, RemoteReporting};
pub use session::{Connectivity, Launch, ReportSession, UNKNOWN_LAUNCH_ID, UNKNOWN_TEST_ID};
