//! Axum route handler for publishing a draft to WordPress.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::content::ContentBlock;
use crate::errors::AppError;
use crate::generation::handlers::{load_draft, parse_draft};
use crate::models::draft::update_draft_status;
use crate::publish::build_publish_payload;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub success: bool,
    pub post_id: u64,
    pub edit_url: String,
    pub preview_url: String,
}

/// POST /api/v1/posts/:id/publish
///
/// Resolves image placeholders through the image service (placeholder URL
/// on failure — never fatal), renders the publish payload, and creates a
/// WordPress draft. Publish failures propagate as structured errors with a
/// machine-readable reason — the terminal step is the one place the
/// pipeline does not absorb failures.
pub async fn handle_publish(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<PublishResponse>, AppError> {
    let draft = load_draft(&state, draft_id).await?;
    let (blocks, meta, company) = parse_draft(&draft)?;

    // One generated image per placeholder, keyed by block id.
    let mut image_refs = HashMap::new();
    for block in &blocks {
        if let ContentBlock::ImagePlaceholder { id, prompt, .. } = block {
            let url = state.images.generate_image(prompt).await;
            image_refs.insert(*id, url);
        }
    }

    let payload = build_publish_payload(&blocks, &meta, &draft.keyword, &company, &image_refs);

    let published = state.wp.create_draft(&payload).await?;

    update_draft_status(&state.db, draft_id, "published").await?;
    info!(
        "Published draft {draft_id} as WordPress post {}",
        published.id
    );

    Ok(Json(PublishResponse {
        success: true,
        post_id: published.id,
        edit_url: published.edit_url,
        preview_url: published.preview_url,
    }))
}
