//! Word-Budget Planner — turns a target total word count into an ordered,
//! per-section budget driving content generation.
//!
//! Allocation is fixed-percentage, configuration constants only — nothing
//! is computed from content. The section shares must close to 100% so the
//! planned sum tracks the requested total within rounding.

use serde::{Deserialize, Serialize};

use crate::content::{title_case, SectionRole};

/// Share of the total budget given to the introduction.
const INTRO_SHARE: f64 = 0.10;
/// Share of the total budget given to the conclusion.
const CONCLUSION_SHARE: f64 = 0.12;
/// The body sections split the remainder equally.
const BODY_SHARE: f64 = 1.0 - INTRO_SHARE - CONCLUSION_SHARE;

/// Where the keyword must appear within a generated section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordPlacement {
    /// Keyword must appear in the opening words of the section.
    LeadParagraph,
    /// Keyword repeated where it reads naturally.
    NaturalRepetition,
    /// Keyword plus a call to action.
    CallToAction,
}

/// One planned section: role, heading, word budget, keyword rule.
/// Transient — consumed exactly once by the assembler, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionPlan {
    pub role: SectionRole,
    pub heading_text: String,
    pub target_word_count: u32,
    pub keyword_requirement: KeywordPlacement,
}

/// Heading templates rotated across body sections. `{keyword}` is replaced
/// with the title-cased focus keyword.
const BODY_HEADING_TEMPLATES: &[&str] = &[
    "What Is {keyword}?",
    "Key Benefits of {keyword}",
    "How {keyword} Works",
    "What Does {keyword} Cost?",
    "Common {keyword} Mistakes to Avoid",
    "Choosing the Right {keyword} Provider",
];

/// Builds the ordered section plan: introduction, `num_body_sections` body
/// sections, conclusion.
///
/// Always succeeds for any positive total. The planned word counts sum to
/// the requested total within one word per section of rounding error.
pub fn plan(keyword: &str, total_word_count: u32, num_body_sections: u32) -> Vec<SectionPlan> {
    let total = f64::from(total_word_count);
    let display_keyword = title_case(keyword);

    let mut sections = Vec::with_capacity(num_body_sections as usize + 2);

    sections.push(SectionPlan {
        role: SectionRole::Intro,
        heading_text: display_keyword.clone(),
        target_word_count: (total * INTRO_SHARE).round() as u32,
        keyword_requirement: KeywordPlacement::LeadParagraph,
    });

    if num_body_sections > 0 {
        let per_body = total * BODY_SHARE / f64::from(num_body_sections);
        for i in 0..num_body_sections as usize {
            let template = BODY_HEADING_TEMPLATES[i % BODY_HEADING_TEMPLATES.len()];
            sections.push(SectionPlan {
                role: SectionRole::Body,
                heading_text: template.replace("{keyword}", &display_keyword),
                target_word_count: per_body.round() as u32,
                keyword_requirement: KeywordPlacement::NaturalRepetition,
            });
        }
    }

    sections.push(SectionPlan {
        role: SectionRole::Conclusion,
        heading_text: format!("Getting Started with {display_keyword}"),
        target_word_count: (total * CONCLUSION_SHARE).round() as u32,
        keyword_requirement: KeywordPlacement::CallToAction,
    });

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_close_to_one() {
        assert!((INTRO_SHARE + BODY_SHARE + CONCLUSION_SHARE - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_plan_emits_sections_in_order() {
        let sections = plan("solar panel installation", 2500, 4);
        assert_eq!(sections.len(), 6);
        assert_eq!(sections[0].role, SectionRole::Intro);
        for section in &sections[1..5] {
            assert_eq!(section.role, SectionRole::Body);
        }
        assert_eq!(sections[5].role, SectionRole::Conclusion);
    }

    #[test]
    fn test_budget_sum_property() {
        for total in [120_u32, 500, 1000, 2500, 3777, 10_000] {
            for num_body in 1..=6_u32 {
                let sections = plan("roof repair", total, num_body);
                let planned: u32 = sections.iter().map(|s| s.target_word_count).sum();
                let tolerance = sections.len() as i64;
                let diff = (i64::from(planned) - i64::from(total)).abs();
                assert!(
                    diff <= tolerance,
                    "total={total} num_body={num_body}: planned {planned} differs by {diff}"
                );
            }
        }
    }

    #[test]
    fn test_keyword_placements_by_role() {
        let sections = plan("solar panel installation", 2000, 3);
        assert_eq!(
            sections[0].keyword_requirement,
            KeywordPlacement::LeadParagraph
        );
        assert_eq!(
            sections[1].keyword_requirement,
            KeywordPlacement::NaturalRepetition
        );
        assert_eq!(
            sections.last().unwrap().keyword_requirement,
            KeywordPlacement::CallToAction
        );
    }

    #[test]
    fn test_body_headings_interpolate_keyword() {
        let sections = plan("solar panel installation", 2500, 4);
        assert!(sections[1]
            .heading_text
            .contains("Solar Panel Installation"));
        // Rotation gives distinct headings for distinct sections
        assert_ne!(sections[1].heading_text, sections[2].heading_text);
    }

    #[test]
    fn test_zero_body_sections_still_plans_intro_and_conclusion() {
        let sections = plan("roof repair", 600, 0);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].role, SectionRole::Intro);
        assert_eq!(sections[1].role, SectionRole::Conclusion);
    }

    #[test]
    fn test_heading_rotation_wraps_past_template_count() {
        let sections = plan("roof repair", 5000, 8);
        // 8 body sections with 6 templates — index 6 repeats template 0
        assert_eq!(sections[1].heading_text, sections[7].heading_text);
    }
}
