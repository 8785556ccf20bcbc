//! Draft store — the persisted post-draft record and its CRUD queries.
//!
//! Updates are whole-field overwrites keyed by draft id: no optimistic
//! locking, no transactions, last writer wins. Acceptable while drafts are
//! single-user; multi-writer access would need a per-draft mutex or a
//! conditional update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DraftRow {
    pub id: Uuid,
    pub keyword: String,
    pub company: Value,
    pub blocks: Value,
    pub meta: Value,
    pub seo_score: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inserts a freshly generated draft with status 'draft'.
pub async fn insert_draft(
    pool: &PgPool,
    id: Uuid,
    keyword: &str,
    company: &Value,
    blocks: &Value,
    meta: &Value,
    seo_score: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO drafts (id, keyword, company, blocks, meta, seo_score, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'draft')
        "#,
    )
    .bind(id)
    .bind(keyword)
    .bind(company)
    .bind(blocks)
    .bind(meta)
    .bind(seo_score)
    .execute(pool)
    .await?;
    Ok(())
}

/// Fetches a draft by id.
pub async fn get_draft(pool: &PgPool, id: Uuid) -> Result<Option<DraftRow>, sqlx::Error> {
    sqlx::query_as::<_, DraftRow>("SELECT * FROM drafts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Overwrites a draft's content fields and score. Last writer wins.
pub async fn update_draft_content(
    pool: &PgPool,
    id: Uuid,
    blocks: &Value,
    meta: &Value,
    seo_score: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE drafts
        SET blocks = $2, meta = $3, seo_score = $4, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(blocks)
    .bind(meta)
    .bind(seo_score)
    .execute(pool)
    .await?;
    Ok(())
}

/// Overwrites a draft's status field.
pub async fn update_draft_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE drafts SET status = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(())
}
