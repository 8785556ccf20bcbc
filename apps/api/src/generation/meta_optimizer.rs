//! Meta Optimizer — derives SEO-tuned title, description, and slug from the
//! focus keyword via one gateway call, with a deterministic rule-based
//! fallback.
//!
//! The gateway response is parsed strictly into `MetaData`; any parse
//! failure or empty field takes the explicit fallback path — caller drafts
//! untouched plus a rule-derived slug. Never fatal.

use tracing::{info, warn};

use crate::content::MetaData;
use crate::generation::prompts::{META_PROMPT_TEMPLATE, META_SYSTEM};
use crate::llm_client::{generate_json, TextGenerator};

/// Maximum slug length in characters.
const MAX_SLUG_LEN: usize = 50;

/// Caller-supplied draft meta fields, pre-optimization.
#[derive(Debug, Clone)]
pub struct MetaDrafts {
    pub h1: String,
    pub meta_title: String,
    pub meta_description: String,
}

/// Optimizes meta fields with a single gateway call.
///
/// The returned slug is always normalized through `generate_slug`, so the
/// slug invariant (lowercase, hyphenated, ≤ 50 chars) holds on both paths.
pub async fn optimize(
    keyword: &str,
    drafts: MetaDrafts,
    company_name: &str,
    generator: &dyn TextGenerator,
) -> MetaData {
    let prompt = META_PROMPT_TEMPLATE
        .replace("{keyword}", keyword)
        .replace("{company_name}", company_name)
        .replace("{draft_h1}", &drafts.h1)
        .replace("{draft_meta_title}", &drafts.meta_title)
        .replace("{draft_meta_description}", &drafts.meta_description);

    match generate_json::<MetaData>(generator, &prompt, META_SYSTEM).await {
        Ok(meta) if is_complete(&meta) => {
            info!("Meta optimization succeeded for keyword '{keyword}'");
            MetaData {
                slug: generate_slug(&meta.slug),
                ..meta
            }
        }
        Ok(_) => {
            warn!("Meta optimization returned empty fields for '{keyword}' — using drafts");
            fallback(keyword, drafts)
        }
        Err(e) => {
            warn!("Meta optimization failed for '{keyword}': {e} — using drafts");
            fallback(keyword, drafts)
        }
    }
}

fn is_complete(meta: &MetaData) -> bool {
    !meta.h1.trim().is_empty()
        && !meta.meta_title.trim().is_empty()
        && !meta.meta_description.trim().is_empty()
        && !meta.slug.trim().is_empty()
}

/// Deterministic fallback: drafts untouched, slug derived from the keyword.
fn fallback(keyword: &str, drafts: MetaDrafts) -> MetaData {
    MetaData {
        h1: drafts.h1,
        meta_title: drafts.meta_title,
        meta_description: drafts.meta_description,
        slug: generate_slug(keyword),
    }
}

/// Derives a URL slug from a phrase: lowercase, non-alphanumerics stripped,
/// whitespace to hyphens, repeated hyphens collapsed, capped at 50 chars
/// with no trailing hyphen. Deterministic and idempotent.
pub fn generate_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());

    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
        // everything else is dropped
    }

    let mut slug = slug.trim_matches('-').to_string();

    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    slug
}
