//! Session configuration loaded from environment variables.

use std::collections::BTreeSet;
use std::env;

use secrecy::SecretString;

/// Session configuration.
///
/// Every recognized option is an explicit field here rather than an implicit
/// environment read inside the session, so callers can also construct one by
/// hand (tests do).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the reporting service (without the API prefix)
    pub base_url: String,
    /// Project the launch is reported under
    pub project: String,
    /// API token, exposed only when building request headers
    pub token: SecretString,
    /// Launch display name (defaults to the project name)
    pub launch_name: String,
    /// Optional launch description
    pub description: Option<String>,
    /// Optional launch tags
    pub tags: Option<BTreeSet<String>>,
    /// Pre-existing launch to attach to instead of starting a new one.
    /// A session never finishes a launch it did not create.
    pub launch_id_override: Option<String>,
}

impl SessionConfig {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored if present.
    ///
    /// Environment variables:
    /// - `REPORT_PORTAL_BASE_URL`: service base URL - REQUIRED
    /// - `REPORT_PORTAL_PROJECT_NAME`: project name - REQUIRED
    /// - `REPORT_PORTAL_TOKEN`: API token - REQUIRED
    /// - `REPORT_PORTAL_LAUNCH_NAME`: launch name (default: project name)
    /// - `REPORT_PORTAL_DESCRIPTION`: launch description (optional)
    /// - `REPORT_PORTAL_TAGS`: comma-separated launch tags (optional)
    /// - `REPORT_PORTAL_LAUNCH_ID`: existing launch to attach to (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_url = env::var("REPORT_PORTAL_BASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("REPORT_PORTAL_BASE_URL"))?;

        let project = env::var("REPORT_PORTAL_PROJECT_NAME")
            .map_err(|_| ConfigError::MissingEnvVar("REPORT_PORTAL_PROJECT_NAME"))?;

        let token = env::var("REPORT_PORTAL_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("REPORT_PORTAL_TOKEN"))?;

        let launch_name =
            env::var("REPORT_PORTAL_LAUNCH_NAME").unwrap_or_else(|_| project.clone());

        let description = env::var("REPORT_PORTAL_DESCRIPTION").ok();

        let tags = env::var("REPORT_PORTAL_TAGS").ok().map(|raw| parse_tags(&raw));

        let launch_id_override = env::var("REPORT_PORTAL_LAUNCH_ID").ok();

        Ok(SessionConfig {
            base_url,
            project,
            token: token.into(),
            launch_name,
            description,
            tags,
            launch_id_override,
        })
    }
}

/// Split a comma-separated tag list into a set, skipping empty entries.
fn parse_tags(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_splits_on_comma() {
        let tags = parse_tags("smoke,regression,nightly");
        assert_eq!(tags.len(), 3);
        assert!(tags.contains("smoke"));
        assert!(tags.contains("regression"));
        assert!(tags.contains("nightly"));
    }

    #[test]
    fn test_parse_tags_skips_empty_entries() {
        let tags = parse_tags("smoke,, ,nightly,");
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("smoke"));
        assert!(tags.contains("nightly"));
    }

    #[test]
    fn test_parse_tags_trims_whitespace() {
        let tags = parse_tags(" smoke , nightly ");
        assert!(tags.contains("smoke"));
        assert!(tags.contains("nightly"));
    }
}
