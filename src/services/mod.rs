//! External collaborators: the remote contract and its thin I/O wrappers.

pub mod error_format;
pub mod http_client;
pub mod remote;

pub use error_format::{ErrorFormatter, clean_error_text};
pub use http_client::HttpReportingClient;
pub use remote::RemoteReporting;
