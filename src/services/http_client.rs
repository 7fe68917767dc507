//! Reqwest-backed implementation of the remote reporting contract.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::{ReportError, ReportResult};
use crate::models::{
    FinishItemRequest, FinishLaunchRequest, ItemStarted, LaunchStarted, LogAttachment, LogEntry,
    StartItemRequest, StartLaunchRequest,
};
use crate::services::remote::RemoteReporting;

/// HTTP connect timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP total timeout per request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one project on the reporting service.
///
/// A thin wrapper: one request per operation, bearer-token auth, no retries.
/// Timeout policy lives here and nowhere else in the crate.
pub struct HttpReportingClient {
    /// API root, e.g. "https://portal.example.com/api/v1"
    api_root: String,
    /// Project-scoped root, e.g. "https://portal.example.com/api/v1/Demo"
    project_root: String,
    token: SecretString,
    http: reqwest::Client,
}

/// Start-item body: the item payload plus the launch it belongs to.
#[derive(Serialize)]
struct StartItemBody<'a> {
    #[serde(flatten)]
    request: &'a StartItemRequest,
    launch_id: &'a str,
}

/// Log body: the entry plus the item it belongs to.
#[derive(Serialize)]
struct LogBody<'a> {
    item_id: &'a str,
    #[serde(flatten)]
    entry: &'a LogEntry,
}

impl HttpReportingClient {
    /// Create a client from session configuration.
    pub fn new(config: &SessionConfig) -> Self {
        let api_root = format!("{}/api/v1", config.base_url.trim_end_matches('/'));
        let project_root = format!("{}/{}", api_root, config.project);

        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client for reporting");

        Self {
            api_root,
            project_root,
            token: config.token.clone(),
            http,
        }
    }

    fn bearer(&self) -> &str {
        self.token.expose_secret()
    }

    /// Map a non-2xx response to `ReportError::Remote` with the body text.
    async fn ensure_success(response: reqwest::Response) -> ReportResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ReportError::Remote {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl RemoteReporting for HttpReportingClient {
    async fn check_connectivity(&self) -> ReportResult<()> {
        let url = format!("{}/user", self.api_root);
        let response = self.http.get(&url).bearer_auth(self.bearer()).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn start_launch(&self, request: StartLaunchRequest) -> ReportResult<String> {
        let url = format!("{}/launch", self.project_root);
        debug!("starting launch {:?}", request.name);
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.bearer())
            .json(&request)
            .send()
            .await?;
        let started: LaunchStarted = Self::ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| ReportError::InvalidResponse(e.to_string()))?;
        Ok(started.id)
    }

    async fn start_test_item(
        &self,
        request: StartItemRequest,
        launch_id: &str,
        parent_id: Option<&str>,
    ) -> ReportResult<String> {
        let url = match parent_id {
            Some(parent) => format!("{}/item/{}", self.project_root, parent),
            None => format!("{}/item", self.project_root),
        };
        debug!("starting {} item {:?}", request.item_type, request.name);
        let body = StartItemBody {
            request: &request,
            launch_id,
        };
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.bearer())
            .json(&body)
            .send()
            .await?;
        let started: ItemStarted = Self::ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| ReportError::InvalidResponse(e.to_string()))?;
        Ok(started.id)
    }

    async fn send_log(
        &self,
        item_id: &str,
        entry: LogEntry,
        attachment: Option<LogAttachment>,
    ) -> ReportResult<()> {
        let url = format!("{}/log", self.project_root);
        let body = LogBody {
            item_id,
            entry: &entry,
        };

        let response = match attachment {
            // Attachment uploads go as multipart: the JSON payload in one
            // part, the raw bytes in another.
            Some(file) => {
                let json_part = multipart::Part::text(
                    serde_json::to_string(&body).expect("log payload serializes"),
                )
                .mime_str("application/json")?;
                let binary_part = multipart::Part::bytes(file.content)
                    .file_name(file.name)
                    .mime_str(&file.content_type)?;
                let form = multipart::Form::new()
                    .part("json_request_part", json_part)
                    .part("binary_part", binary_part);
                self.http
                    .post(&url)
                    .bearer_auth(self.bearer())
                    .multipart(form)
                    .send()
                    .await?
            }
            None => {
                self.http
                    .post(&url)
                    .bearer_auth(self.bearer())
                    .json(&body)
                    .send()
                    .await?
            }
        };
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn finish_test_item(
        &self,
        item_id: &str,
        request: FinishItemRequest,
    ) -> ReportResult<()> {
        let url = format!("{}/item/{}", self.project_root, item_id);
        let response = self
            .http
            .put(&url)
            .bearer_auth(self.bearer())
            .json(&request)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn finish_launch(
        &self,
        launch_id: &str,
        request: FinishLaunchRequest,
    ) -> ReportResult<()> {
        let url = format!("{}/launch/{}/finish", self.project_root, launch_id);
        debug!("finishing launch {launch_id}");
        let response = self
            .http
            .put(&url)
            .bearer_auth(self.bearer())
            .json(&request)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
