//! Axum route handlers for the generation API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::{CompanyContext, ContentBlock, MetaData};
use crate::errors::AppError;
use crate::generation::assembler::regenerate_block;
use crate::generation::generator::{generate_post, GeneratePostRequest, GeneratePostResponse};
use crate::models::draft::{get_draft, update_draft_content, DraftRow};
use crate::seo::scorer::{score, SeoReport};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegenerateBlockRequest {
    pub index: usize,
}

#[derive(Debug, Serialize)]
pub struct RegenerateBlockResponse {
    pub blocks: Vec<ContentBlock>,
    pub seo: SeoReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/posts/generate
///
/// Full generation pipeline: plan → assemble → optimize meta → score →
/// persist. Always returns a complete draft; generation degradation shows
/// up in the SEO score, not as an error.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GeneratePostRequest>,
) -> Result<Json<GeneratePostResponse>, AppError> {
    if request.keyword.trim().is_empty() {
        return Err(AppError::Validation("keyword cannot be empty".to_string()));
    }

    let response = generate_post(&state.db, state.generator.as_ref(), request).await?;

    Ok(Json(response))
}

/// GET /api/v1/posts/:id
///
/// Returns the stored draft row.
pub async fn handle_get_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<DraftRow>, AppError> {
    let draft = load_draft(&state, draft_id).await?;
    Ok(Json(draft))
}

/// POST /api/v1/posts/:id/score
///
/// Recomputes the SEO report from the stored blocks and meta — the report
/// is derived data, recomputed on demand — and persists the new score.
pub async fn handle_score_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<SeoReport>, AppError> {
    let draft = load_draft(&state, draft_id).await?;
    let (blocks, meta, _) = parse_draft(&draft)?;

    let report = score(&draft.keyword, &blocks, &meta);

    update_draft_content(
        &state.db,
        draft_id,
        &draft.blocks,
        &draft.meta,
        report.score as i32,
    )
    .await?;

    Ok(Json(report))
}

/// POST /api/v1/posts/:id/regenerate-block
///
/// Regenerates exactly one paragraph block, re-scores, and overwrites the
/// stored draft.
pub async fn handle_regenerate_block(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
    Json(request): Json<RegenerateBlockRequest>,
) -> Result<Json<RegenerateBlockResponse>, AppError> {
    let draft = load_draft(&state, draft_id).await?;
    let (mut blocks, meta, company) = parse_draft(&draft)?;

    regenerate_block(
        &mut blocks,
        request.index,
        &draft.keyword,
        &company,
        state.generator.as_ref(),
    )
    .await?;

    let report = score(&draft.keyword, &blocks, &meta);

    let blocks_value = serde_json::to_value(&blocks)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize blocks: {e}")))?;
    update_draft_content(
        &state.db,
        draft_id,
        &blocks_value,
        &draft.meta,
        report.score as i32,
    )
    .await?;

    Ok(Json(RegenerateBlockResponse {
        blocks,
        seo: report,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

pub async fn load_draft(state: &AppState, draft_id: Uuid) -> Result<DraftRow, AppError> {
    get_draft(&state.db, draft_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Draft {draft_id} not found")))
}

/// Deserializes the JSONB columns of a stored draft into typed values.
pub fn parse_draft(
    draft: &DraftRow,
) -> Result<(Vec<ContentBlock>, MetaData, CompanyContext), AppError> {
    let blocks: Vec<ContentBlock> = serde_json::from_value(draft.blocks.clone())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Corrupt draft blocks: {e}")))?;
    let meta: MetaData = serde_json::from_value(draft.meta.clone())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Corrupt draft meta: {e}")))?;
    let company: CompanyContext = serde_json::from_value(draft.company.clone())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Corrupt draft company: {e}")))?;
    Ok((blocks, meta, company))
}
