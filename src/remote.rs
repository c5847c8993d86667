//! HTTP client for the optional remote project backend.
//!
//! Remote sync is best effort: local storage stays the source of truth and a
//! failed insert is never retried. Configuration comes from
//! [`crate::config::Config`] or the environment:
//! - `SUNSTONE_BACKEND_URL` - base URL; no URL means no remote sync
//! - `SUNSTONE_BACKEND_KEY` - bearer key (optional)

use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::models::ProjectRecord;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized: backend key required or invalid")]
    Unauthorized,

    #[error("Backend rejected insert ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
}

/// Row sent to the backend's `projects` table.
///
/// The backend keeps its own JSON document per project, which starts empty.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectRow<'a> {
    id: &'a str,
    name: &'a str,
    industry: &'a str,
    phase: &'a str,
    model_type: Option<&'a str>,
    region: Option<&'a str>,
    data: serde_json::Value,
}

impl<'a> From<&'a ProjectRecord> for ProjectRow<'a> {
    fn from(record: &'a ProjectRecord) -> Self {
        Self {
            id: &record.id,
            name: &record.name,
            industry: &record.industry,
            phase: &record.phase,
            model_type: non_empty(&record.model_type),
            region: non_empty(&record.region),
            data: serde_json::json!({}),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl BackendClient {
    /// Create a client from the environment, or `None` if no URL is set.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("SUNSTONE_BACKEND_URL").ok()?;
        let api_key = std::env::var("SUNSTONE_BACKEND_KEY").ok();
        Some(Self::new(base_url, api_key))
    }

    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        req
    }

    /// Insert a freshly created project into the backend.
    pub async fn insert_project(&self, record: &ProjectRecord) -> Result<(), RemoteError> {
        let response = self
            .request(reqwest::Method::POST, "/projects")
            .json(&ProjectRow::from(record))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED => Err(RemoteError::Unauthorized),
            _ => Err(RemoteError::Rejected { status, body }),
        }
    }
}
