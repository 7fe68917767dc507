//! Domain error types for the report client.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Errors surfaced by session operations and the remote collaborator.
///
/// Connectivity-probe failures never appear here; they only flip the
/// session into disconnected mode. Everything else propagates to the caller,
/// which decides whether a reporting failure should fail the test run.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The remote service answered with a non-success status
    #[error("Remote service error: {status} {message}")]
    Remote { status: u16, message: String },

    /// The request never produced a usable response (connect, timeout, TLS)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote answered 2xx but the body did not match the contract
    #[error("Invalid response from remote service: {0}")]
    InvalidResponse(String),

    /// A screenshot file could not be read
    #[error("Failed to read screenshot {path}: {source}")]
    Screenshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type ReportResult<T> = Result<T, ReportError>;
