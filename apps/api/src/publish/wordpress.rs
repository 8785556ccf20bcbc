//! WordPress REST client — creates draft posts via `/wp-json/wp/v2/posts`
//! with application-password basic auth.
//!
//! Publishing is the terminal, irreversible pipeline step, so failures here
//! are the one error category surfaced to the caller as a structured
//! result with a machine-readable reason.

use axum::http::StatusCode;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::info;

use super::PublishPayload;

/// Machine-readable publish failure reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishReason {
    Auth,
    NotFound,
    Forbidden,
    Unknown,
}

impl PublishReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishReason::Auth => "auth",
            PublishReason::NotFound => "not_found",
            PublishReason::Forbidden => "forbidden",
            PublishReason::Unknown => "unknown",
        }
    }

    fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            401 => PublishReason::Auth,
            403 => PublishReason::Forbidden,
            404 => PublishReason::NotFound,
            _ => PublishReason::Unknown,
        }
    }
}

#[derive(Debug, Error)]
#[error("WordPress publish failed ({}): {message}", .reason.as_str())]
pub struct PublishError {
    pub reason: PublishReason,
    pub message: String,
}

impl PublishError {
    pub fn reason(&self) -> PublishReason {
        self.reason
    }

    /// Upstream publish failures map to 502 regardless of reason — the
    /// reason field carries the distinction for the caller.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_GATEWAY
    }
}

/// A successfully created WordPress draft.
#[derive(Debug, Clone)]
pub struct PublishedDraft {
    pub id: u64,
    pub edit_url: String,
    pub preview_url: String,
}

#[derive(Debug, Deserialize)]
struct WpPostResponse {
    id: u64,
    link: String,
}

/// WordPress REST API client.
#[derive(Clone)]
pub struct WpClient {
    client: Client,
    base_url: String,
    username: String,
    app_password: String,
}

impl WpClient {
    pub fn new(base_url: String, username: String, app_password: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            app_password,
        }
    }

    /// Creates a draft post with content, excerpt, slug, and plugin meta
    /// fields. Returns edit/preview URLs derived from the created post id.
    pub async fn create_draft(&self, payload: &PublishPayload) -> Result<PublishedDraft, PublishError> {
        let url = format!("{}/wp-json/wp/v2/posts", self.base_url);

        let mut body = json!({
            "title": payload.title,
            "content": payload.html_body,
            "excerpt": payload.excerpt,
            "slug": payload.slug,
            "status": "draft",
            "meta": payload.meta_fields,
        });
        if let Some(image_ref) = &payload.featured_image_ref {
            body["meta"]["_postforge_featured_image_url"] = json!(image_ref);
        }

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.app_password))
            .json(&body)
            .send()
            .await
            .map_err(|e| PublishError {
                reason: PublishReason::Unknown,
                message: format!("request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PublishError {
                reason: PublishReason::from_status(status),
                message: format!("status {status}: {message}"),
            });
        }

        let created: WpPostResponse = response.json().await.map_err(|e| PublishError {
            reason: PublishReason::Unknown,
            message: format!("malformed response: {e}"),
        })?;

        info!("Created WordPress draft {} at {}", created.id, created.link);

        Ok(PublishedDraft {
            id: created.id,
            edit_url: format!(
                "{}/wp-admin/post.php?post={}&action=edit",
                self.base_url, created.id
            ),
            preview_url: format!("{}?preview=true", created.link),
        })
    }
}
