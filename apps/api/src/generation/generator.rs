//! Post generation — orchestrates the full pipeline.
//!
//! Flow: plan word budget → assemble blocks (one gateway call per section)
//! → optimize meta (one gateway call) → score → persist draft → return.
//!
//! The pipeline always produces a complete `(blocks, meta, seo)` triple:
//! gateway failures degrade to deterministic fallbacks and show up as a
//! lower SEO score, never as a hard failure.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::content::{title_case, CompanyContext, ContentBlock, MetaData};
use crate::errors::AppError;
use crate::generation::assembler::assemble;
use crate::generation::meta_optimizer::{optimize, MetaDrafts};
use crate::generation::planner::plan;
use crate::llm_client::TextGenerator;
use crate::models::draft::insert_draft;
use crate::seo::scorer::{score, SeoReport};

const DEFAULT_TOTAL_WORDS: u32 = 2500;
const DEFAULT_BODY_SECTIONS: u32 = 4;
const MAX_BODY_SECTIONS: u32 = 6;

/// Request body for post generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePostRequest {
    pub keyword: String,
    pub company: CompanyContext,
    pub total_word_count: Option<u32>,
    pub body_sections: Option<u32>,
}

/// Response from the generation pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratePostResponse {
    pub draft_id: Uuid,
    pub blocks: Vec<ContentBlock>,
    pub meta: MetaData,
    pub seo: SeoReport,
    pub status: String,
}

/// Runs the full generation pipeline and persists the draft.
pub async fn generate_post(
    pool: &PgPool,
    generator: &dyn TextGenerator,
    request: GeneratePostRequest,
) -> Result<GeneratePostResponse, AppError> {
    let keyword = request.keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return Err(AppError::Validation("keyword cannot be empty".to_string()));
    }

    let total_words = request.total_word_count.unwrap_or(DEFAULT_TOTAL_WORDS);
    if total_words == 0 {
        return Err(AppError::Validation(
            "total_word_count must be positive".to_string(),
        ));
    }

    let body_sections = request.body_sections.unwrap_or(DEFAULT_BODY_SECTIONS);
    if !(1..=MAX_BODY_SECTIONS).contains(&body_sections) {
        return Err(AppError::Validation(format!(
            "body_sections must be between 1 and {MAX_BODY_SECTIONS}"
        )));
    }

    // Step 1: Word budget
    let sections = plan(&keyword, total_words, body_sections);
    info!(
        "Planned {} sections for keyword '{keyword}' ({total_words} words)",
        sections.len()
    );

    // Step 2: Assemble content blocks, one gateway call per section
    let blocks = assemble(&keyword, &sections, &request.company, generator).await;

    // Step 3: Optimize meta fields, one gateway call with draft fallback
    let meta = optimize(
        &keyword,
        draft_meta(&keyword, &request.company),
        &request.company.name,
        generator,
    )
    .await;

    // Step 4: Score — pure function over the assembled result
    let seo = score(&keyword, &blocks, &meta);
    info!(
        "Draft scored {}/100 for keyword '{keyword}' ({} words)",
        seo.score, seo.word_count
    );

    // Step 5: Persist
    let draft_id = Uuid::new_v4();
    let company_value = serde_json::to_value(&request.company)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize company: {e}")))?;
    let blocks_value = serde_json::to_value(&blocks)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize blocks: {e}")))?;
    let meta_value = serde_json::to_value(&meta)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize meta: {e}")))?;

    insert_draft(
        pool,
        draft_id,
        &keyword,
        &company_value,
        &blocks_value,
        &meta_value,
        seo.score as i32,
    )
    .await?;

    info!("Persisted draft {draft_id} for keyword '{keyword}'");

    Ok(GeneratePostResponse {
        draft_id,
        blocks,
        meta,
        seo,
        status: "draft".to_string(),
    })
}

/// Deterministic draft meta fields, used as the optimizer's input and as
/// its fallback output.
fn draft_meta(keyword: &str, company: &CompanyContext) -> MetaDrafts {
    let display = title_case(keyword);
    MetaDrafts {
        h1: display.clone(),
        meta_title: format!("{display} | {}", company.name),
        meta_description: format!(
            "Looking for {keyword}? {} breaks down the costs, timelines, and options \
             so you can plan with confidence. Get expert help today.",
            company.name
        ),
    }
}
