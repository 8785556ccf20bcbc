//! SEO Compliance Scorer — scores an assembled draft against a fixed
//! weighted rubric.
//!
//! Pure function over `(keyword, blocks, meta)` — no I/O, no gateway calls,
//! recomputed on demand. Rule failures are data, never errors: each failed
//! rule contributes a recommendation string instead of its weight.
//!
//! One canonical rubric. The weights sum to exactly 100, so the score is
//! structurally capped; a test guards this.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::{body_text, body_word_count, count_occurrences, ContentBlock, MetaData};
use crate::generation::meta_optimizer::generate_slug;

/// Minimum body word count for full content-length credit.
const MIN_BODY_WORDS: usize = 1102;
/// Maximum H1 length in characters.
const MAX_TITLE_CHARS: usize = 60;
/// Inclusive meta description length range.
const DESCRIPTION_RANGE: (usize, usize) = (140, 160);
/// Inclusive keyword density range, in percent.
const DENSITY_RANGE: (f64, f64) = (0.5, 2.5);
/// The keyword must appear within this many leading body words.
const FIRST_WORDS_WINDOW: usize = 100;

/// Rule keys and weights. The canonical rubric — weights sum to 100.
pub const RULE_WEIGHTS: &[(&str, u32)] = &[
    ("keyword_in_title", 15),
    ("keyword_in_description", 10),
    ("keyword_in_slug", 10),
    ("keyword_in_first_words", 15),
    ("keyword_in_body", 10),
    ("content_length", 10),
    ("title_length", 10),
    ("readability", 10),
    ("description_length", 5),
    ("keyword_density", 5),
];

/// Result of scoring one draft. Derived data — never independently mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoReport {
    /// 0–100, sum of weights of passed rules.
    pub score: u32,
    /// Pass/fail per rule key.
    pub checks: BTreeMap<String, bool>,
    /// One human-readable recommendation per failed rule.
    pub recommendations: Vec<String>,
    /// Total words across paragraph blocks.
    pub word_count: usize,
    /// Keyword occurrences / word count * 100.
    pub keyword_density: f64,
}

fn rule_weight(key: &str) -> u32 {
    RULE_WEIGHTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, w)| *w)
        .unwrap_or(0)
}

/// Scores the assembled draft against the rubric.
///
/// Keyword matching is exact case-insensitive literal phrase matching —
/// multi-word keywords must match contiguously. No stemming.
pub fn score(keyword: &str, blocks: &[ContentBlock], meta: &MetaData) -> SeoReport {
    let body = body_text(blocks);
    let words = body_word_count(blocks);
    let occurrences = count_occurrences(&body, keyword);
    let density = if words > 0 {
        occurrences as f64 / words as f64 * 100.0
    } else {
        0.0
    };

    let first_window = body
        .split_whitespace()
        .take(FIRST_WORDS_WINDOW)
        .collect::<Vec<_>>()
        .join(" ");

    let keyword_lower = keyword.to_lowercase();
    let hyphenated = generate_slug(keyword);

    let mut checks = BTreeMap::new();
    let mut recommendations = Vec::new();
    let mut total = 0_u32;

    let mut apply = |key: &str, passed: bool, recommendation: String| {
        checks.insert(key.to_string(), passed);
        if passed {
            total += rule_weight(key);
        } else {
            recommendations.push(recommendation);
        }
    };

    apply(
        "keyword_in_title",
        meta.h1.to_lowercase().contains(&keyword_lower)
            || meta.meta_title.to_lowercase().contains(&keyword_lower),
        format!("Include the keyword \"{keyword}\" in your H1 or meta title"),
    );

    apply(
        "keyword_in_description",
        meta.meta_description.to_lowercase().contains(&keyword_lower),
        format!("Include the keyword \"{keyword}\" in your meta description"),
    );

    apply(
        "keyword_in_slug",
        meta.slug.contains(&hyphenated),
        format!("Use the hyphenated keyword \"{hyphenated}\" in the URL slug"),
    );

    apply(
        "keyword_in_first_words",
        count_occurrences(&first_window, keyword) > 0,
        format!("Mention the keyword \"{keyword}\" within the first {FIRST_WORDS_WINDOW} words"),
    );

    apply(
        "keyword_in_body",
        occurrences > 0,
        format!("The keyword \"{keyword}\" does not appear in the content body"),
    );

    apply(
        "content_length",
        words >= MIN_BODY_WORDS,
        format!("Increase content length to at least {MIN_BODY_WORDS} words (current: {words})"),
    );

    apply(
        "title_length",
        meta.h1.chars().count() <= MAX_TITLE_CHARS,
        format!(
            "Shorten the title to {MAX_TITLE_CHARS} characters or fewer (current: {})",
            meta.h1.chars().count()
        ),
    );

    // No computed readability metric — granted unconditionally. A known
    // simplification carried over from the rubric definition.
    apply("readability", true, String::new());

    let desc_len = meta.meta_description.chars().count();
    apply(
        "description_length",
        desc_len >= DESCRIPTION_RANGE.0 && desc_len <= DESCRIPTION_RANGE.1,
        format!(
            "Adjust the meta description length into the {}-{} character range (current: {desc_len})",
            DESCRIPTION_RANGE.0, DESCRIPTION_RANGE.1
        ),
    );

    apply(
        "keyword_density",
        density >= DENSITY_RANGE.0 && density <= DENSITY_RANGE.1,
        format!(
            "Keyword density {density:.2}% is outside the {}%-{}% range",
            DENSITY_RANGE.0, DENSITY_RANGE.1
        ),
    );

    SeoReport {
        score: total.min(100),
        checks,
        recommendations,
        word_count: words,
        keyword_density: density,
    }
}
