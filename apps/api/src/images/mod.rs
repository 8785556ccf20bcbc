//! Image asset service — generates images via an external endpoint and
//! uploads them to S3 for a stable serving URL.
//!
//! Image failures never propagate: every failure path degrades to the
//! static placeholder URL with a warning, and publishing continues.

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

/// Served when generation or upload fails.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://static.postforge.dev/placeholders/article-image.jpg";

#[derive(Debug, Deserialize)]
struct ImageApiResponse {
    url: String,
}

#[derive(Clone)]
pub struct ImageService {
    http: Client,
    s3: S3Client,
    bucket: String,
    s3_endpoint: String,
    api_url: String,
}

impl ImageService {
    pub fn new(s3: S3Client, bucket: String, s3_endpoint: String, api_url: String) -> Self {
        Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            s3,
            bucket,
            s3_endpoint: s3_endpoint.trim_end_matches('/').to_string(),
            api_url,
        }
    }

    /// Generates an image for the prompt and re-hosts it on S3.
    /// Always returns a usable URL — the placeholder on any failure.
    pub async fn generate_image(&self, prompt: &str) -> String {
        match self.generate_and_upload(prompt).await {
            Ok(url) => url,
            Err(e) => {
                warn!("Image generation failed for prompt '{prompt}': {e} — using placeholder");
                PLACEHOLDER_IMAGE_URL.to_string()
            }
        }
    }

    async fn generate_and_upload(&self, prompt: &str) -> anyhow::Result<String> {
        let response = self
            .http
            .post(&self.api_url)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await?
            .error_for_status()?;

        let generated: ImageApiResponse = response.json().await?;

        // Re-host: the generation endpoint's URLs expire.
        let image_bytes = self
            .http
            .get(&generated.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let key = format!("post-images/{}.jpg", Uuid::new_v4());
        self.upload_image(&key, image_bytes).await
    }

    /// Uploads raw image bytes to S3 and returns the object URL.
    pub async fn upload_image(&self, key: &str, bytes: Bytes) -> anyhow::Result<String> {
        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("image/jpeg")
            .body(ByteStream::from(bytes))
            .send()
            .await?;

        let url = format!("{}/{}/{}", self.s3_endpoint, self.bucket, key);
        info!("Uploaded image to {url}");
        Ok(url)
    }
}
