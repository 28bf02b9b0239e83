//! Uploading one article to the catalog service.
//!
//! [`ArticleUploader`] is the seam the batch driver talks to; [`ApiClient`]
//! is the reqwest-backed implementation. The trait is annotated for
//! `mockall` so tests can drive the pipeline without a server.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::{Settings, TOKEN_ENV};
use crate::payload::SyncPayload;

/// Catalog endpoint the payload is posted to, relative to the API base.
pub const SYNC_ENDPOINT: &str = "/api/v1/articles/sync";

/// Classified outcome of a failed upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// No credential configured; raised before any network call.
    #[error("no catalog token configured; set {TOKEN_ENV}")]
    AuthMissing,
    /// Transport-level failure: no response was obtained.
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),
    /// The catalog answered with a non-2xx status.
    #[error("server rejected sync ({status}): {detail}")]
    ServerRejected { status: u16, detail: String },
}

/// Uploads one composed payload and classifies the outcome. Success carries
/// the destination path the article landed at.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
#[async_trait]
pub trait ArticleUploader: Send + Sync {
    async fn sync_article(&self, payload: SyncPayload) -> Result<String, UploadError>;
}

/// Success body returned by the catalog; `path` echoes the stored location.
#[derive(Debug, Deserialize)]
struct SyncResponse {
    path: Option<String>,
}

/// Error body shape: FastAPI-style `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// HTTP client for the article catalog.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Self {
        Self::with_base_url(&settings.api_url, settings.token.clone())
    }

    /// Builds a client against an explicit base URL (useful for tests).
    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ArticleUploader for ApiClient {
    async fn sync_article(&self, payload: SyncPayload) -> Result<String, UploadError> {
        let token = self
            .token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(UploadError::AuthMissing)?;

        let url = format!("{}{}", self.base_url, SYNC_ENDPOINT);
        debug!(url = %url, path = %payload.path, title = %payload.title, "Posting article sync");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            // Prefer the path the server reports it stored the article at.
            let destination = response
                .json::<SyncResponse>()
                .await
                .ok()
                .and_then(|body| body.path)
                .unwrap_or_else(|| payload.path.clone());
            info!(path = %destination, status = status.as_u16(), "Article synced");
            Ok(destination)
        } else {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| "sync rejected by server".to_string());
            error!(status = status.as_u16(), detail = %detail, "Article sync rejected");
            Err(UploadError::ServerRejected {
                status: status.as_u16(),
                detail,
            })
        }
    }
}
