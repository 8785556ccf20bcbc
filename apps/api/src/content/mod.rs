//! Core content domain types shared by the generation pipeline, the SEO
//! scorer, and the publication adapter.
//!
//! A post draft is an ordered `Vec<ContentBlock>` plus a `MetaData` record.
//! Block order is document order; regeneration replaces at most one block
//! in place without disturbing the rest.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which part of the article a paragraph belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionRole {
    Intro,
    Body,
    Conclusion,
}

/// Structural role of an image placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRole {
    /// The post's featured image — exactly one per assembly, before the H1.
    Feature,
    /// In-content illustration — at most one, after the second body section.
    Inline,
}

/// One typed unit of the assembled document.
///
/// Image placeholders carry a prompt and alt text but no binary payload;
/// actual image generation happens at publish time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
        role: SectionRole,
    },
    ImagePlaceholder {
        id: Uuid,
        prompt: String,
        alt_text: String,
        role: ImageRole,
    },
}

impl ContentBlock {
    /// Paragraph text, if this block is a paragraph.
    pub fn paragraph_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Paragraph { text, .. } => Some(text),
            _ => None,
        }
    }

}

/// SEO meta fields for a draft.
///
/// After optimization: `h1` and `meta_title` should contain the keyword
/// verbatim (case-insensitive), `meta_description` should land in
/// [140,160] characters, and `slug` is lowercase-hyphenated, ≤ 50 chars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaData {
    pub h1: String,
    pub meta_title: String,
    pub meta_description: String,
    pub slug: String,
}

/// Company branding context supplied by the caller with each run.
/// Prompts mandate company-name and service mentions; the publication
/// adapter uses it for the appended related-links section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyContext {
    pub name: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Title-cases a phrase: first letter of each whitespace-delimited word
/// uppercased, the rest lowercased.
pub fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Counts whitespace-delimited words in a text fragment.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Total word count across all `Paragraph` blocks, in document order.
pub fn body_word_count(blocks: &[ContentBlock]) -> usize {
    blocks
        .iter()
        .filter_map(|b| b.paragraph_text())
        .map(word_count)
        .sum()
}

/// Concatenated text of all `Paragraph` blocks, space-joined.
pub fn body_text(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter_map(|b| b.paragraph_text())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Counts non-overlapping case-insensitive occurrences of a literal phrase.
///
/// Exact literal matching — multi-word keywords must match as a contiguous
/// phrase. No stemming, no fuzzy matching.
pub fn count_occurrences(haystack: &str, phrase: &str) -> usize {
    let phrase = phrase.trim().to_lowercase();
    if phrase.is_empty() {
        return 0;
    }
    haystack.to_lowercase().matches(&phrase).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(text: &str, role: SectionRole) -> ContentBlock {
        ContentBlock::Paragraph {
            text: text.to_string(),
            role,
        }
    }

    #[test]
    fn test_content_block_serde_round_trip() {
        let block = ContentBlock::Heading {
            level: 2,
            text: "Benefits of Solar".to_string(),
        };
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains(r#""type":"heading""#));
        let back: ContentBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_image_placeholder_serde_tags_role() {
        let block = ContentBlock::ImagePlaceholder {
            id: Uuid::new_v4(),
            prompt: "rooftop solar array at sunset".to_string(),
            alt_text: "solar panels".to_string(),
            role: ImageRole::Feature,
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "image_placeholder");
        assert_eq!(json["role"], "feature");
    }

    #[test]
    fn test_body_word_count_ignores_headings_and_images() {
        let blocks = vec![
            ContentBlock::Heading {
                level: 1,
                text: "lots of heading words here".to_string(),
            },
            para("one two three", SectionRole::Intro),
            para("four five", SectionRole::Body),
        ];
        assert_eq!(body_word_count(&blocks), 5);
    }

    #[test]
    fn test_count_occurrences_case_insensitive_phrase() {
        let text = "Solar panel installation is easy. SOLAR PANEL INSTALLATION saves money.";
        assert_eq!(count_occurrences(text, "solar panel installation"), 2);
    }

    #[test]
    fn test_count_occurrences_requires_contiguous_phrase() {
        let text = "Solar energy and panel installation";
        assert_eq!(count_occurrences(text, "solar panel"), 0);
    }

    #[test]
    fn test_count_occurrences_empty_phrase_is_zero() {
        assert_eq!(count_occurrences("anything", "  "), 0);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("solar panel installation"), "Solar Panel Installation");
        assert_eq!(title_case("HVAC repair"), "Hvac Repair");
    }
}
