//! Content Block Assembler — drives the text-generation gateway once per
//! planned section and collects the results into an ordered block list.
//!
//! Gateway calls are sequential, one per section, awaiting each before the
//! next. A failed call is section-local: the section falls back to a
//! deterministic template paragraph and assembly continues.
//!
//! Structural invariants:
//! - exactly one `ImagePlaceholder{Feature}` per assembly, before the H1
//! - exactly one `Heading` immediately precedes each body `Paragraph`
//! - exactly one `ImagePlaceholder{Inline}` when there are ≥ 2 body sections,
//!   inserted after the second body section

use tracing::{info, warn};
use uuid::Uuid;

use crate::content::{CompanyContext, ContentBlock, ImageRole, SectionRole};
use crate::errors::AppError;
use crate::generation::planner::{KeywordPlacement, SectionPlan};
use crate::generation::prompts::{
    FEATURE_IMAGE_PROMPT_TEMPLATE, INLINE_IMAGE_PROMPT_TEMPLATE, PLACEMENT_CTA, PLACEMENT_LEAD,
    PLACEMENT_NATURAL, SECTION_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::CONTENT_WRITER_SYSTEM;
use crate::llm_client::TextGenerator;

/// Assembles the full ordered block list for a post draft.
///
/// One gateway call per planned section. Never fails as a whole: per-section
/// gateway errors degrade to template paragraphs, so the returned list
/// always matches the plan's cardinality.
pub async fn assemble(
    keyword: &str,
    plan: &[SectionPlan],
    company: &CompanyContext,
    generator: &dyn TextGenerator,
) -> Vec<ContentBlock> {
    let num_body_sections = plan
        .iter()
        .filter(|s| s.role == SectionRole::Body)
        .count();

    let mut blocks = Vec::with_capacity(plan.len() * 2 + 2);

    // Feature image goes before the H1.
    blocks.push(ContentBlock::ImagePlaceholder {
        id: Uuid::new_v4(),
        prompt: FEATURE_IMAGE_PROMPT_TEMPLATE.replace("{keyword}", keyword),
        alt_text: keyword.to_string(),
        role: ImageRole::Feature,
    });

    let mut body_sections_done = 0;

    for section in plan {
        let heading_level = match section.role {
            SectionRole::Intro => 1,
            SectionRole::Body | SectionRole::Conclusion => 2,
        };
        blocks.push(ContentBlock::Heading {
            level: heading_level,
            text: section.heading_text.clone(),
        });

        let text = generate_section_text(keyword, section, company, generator).await;
        blocks.push(ContentBlock::Paragraph {
            text,
            role: section.role,
        });

        if section.role == SectionRole::Body {
            body_sections_done += 1;
            if body_sections_done == 2 && num_body_sections >= 2 {
                blocks.push(ContentBlock::ImagePlaceholder {
                    id: Uuid::new_v4(),
                    prompt: INLINE_IMAGE_PROMPT_TEMPLATE.replace("{keyword}", keyword),
                    alt_text: format!("{keyword} in progress"),
                    role: ImageRole::Inline,
                });
            }
        }
    }

    blocks
}

/// Regenerates the paragraph block at `index`, replacing exactly that one
/// block and leaving all others untouched.
///
/// Gateway failure degrades to the template paragraph, same as assembly.
pub async fn regenerate_block(
    blocks: &mut [ContentBlock],
    index: usize,
    keyword: &str,
    company: &CompanyContext,
    generator: &dyn TextGenerator,
) -> Result<(), AppError> {
    let role = match blocks.get(index) {
        Some(ContentBlock::Paragraph { role, .. }) => *role,
        Some(_) => {
            return Err(AppError::Validation(format!(
                "Block {index} is not a paragraph — only paragraphs can be regenerated"
            )))
        }
        None => {
            return Err(AppError::NotFound(format!(
                "Block index {index} out of range"
            )))
        }
    };

    // Reconstruct a single-section plan from the surrounding blocks: the
    // preceding heading names the section, the current text sizes it.
    let heading_text = blocks[..index]
        .iter()
        .rev()
        .find_map(|b| match b {
            ContentBlock::Heading { text, .. } => Some(text.clone()),
            _ => None,
        })
        .unwrap_or_else(|| keyword.to_string());

    let current_words = blocks[index]
        .paragraph_text()
        .map(|t| t.split_whitespace().count())
        .unwrap_or(0);

    let section = SectionPlan {
        role,
        heading_text,
        target_word_count: current_words.max(100) as u32,
        keyword_requirement: match role {
            SectionRole::Intro => KeywordPlacement::LeadParagraph,
            SectionRole::Body => KeywordPlacement::NaturalRepetition,
            SectionRole::Conclusion => KeywordPlacement::CallToAction,
        },
    };

    let text = generate_section_text(keyword, &section, company, generator).await;
    blocks[index] = ContentBlock::Paragraph { text, role };

    Ok(())
}

/// One gateway call for one section; falls back to the template paragraph
/// on any gateway error.
async fn generate_section_text(
    keyword: &str,
    section: &SectionPlan,
    company: &CompanyContext,
    generator: &dyn TextGenerator,
) -> String {
    let prompt = build_section_prompt(keyword, section, company);

    match generator.generate(&prompt, CONTENT_WRITER_SYSTEM).await {
        Ok(generated) => {
            info!(
                "Generated {:?} section '{}': {} words (target {})",
                section.role, section.heading_text, generated.word_count, section.target_word_count
            );
            generated.text
        }
        Err(e) => {
            warn!(
                "Gateway failed for {:?} section '{}': {e} — using template fallback",
                section.role, section.heading_text
            );
            fallback_paragraph(keyword, section.role, company)
        }
    }
}

/// Fills the section prompt template for one planned section.
fn build_section_prompt(keyword: &str, section: &SectionPlan, company: &CompanyContext) -> String {
    let placement = match section.keyword_requirement {
        KeywordPlacement::LeadParagraph => PLACEMENT_LEAD,
        KeywordPlacement::NaturalRepetition => PLACEMENT_NATURAL,
        KeywordPlacement::CallToAction => PLACEMENT_CTA,
    }
    .replace("{keyword}", keyword);

    let services = if company.services.is_empty() {
        "general services".to_string()
    } else {
        company.services.join(", ")
    };

    SECTION_PROMPT_TEMPLATE
        .replace("{heading}", &section.heading_text)
        .replace("{keyword}", keyword)
        .replace("{target_words}", &section.target_word_count.to_string())
        .replace("{placement_instruction}", &placement)
        .replace("{company_name}", &company.name)
        .replace("{services}", &services)
}

/// Deterministic template paragraph used when the gateway fails.
/// Keyword and company name are interpolated so a degraded draft still
/// carries its focus phrase — quality loss shows up in the SEO score, not
/// as a pipeline error.
fn fallback_paragraph(keyword: &str, role: SectionRole, company: &CompanyContext) -> String {
    let service = company
        .services
        .first()
        .map(String::as_str)
        .unwrap_or("our services");

    match role {
        SectionRole::Intro => format!(
            "If you are researching {keyword}, you are in the right place. \
             At {company}, we help customers make confident decisions about \
             {keyword} every day. This guide walks through what matters most, \
             from planning and costs to choosing the right provider.",
            keyword = keyword,
            company = company.name,
        ),
        SectionRole::Body => format!(
            "There is a lot to weigh when it comes to {keyword}. The right \
             approach depends on your property, your budget, and your goals. \
             The team at {company} draws on years of experience with {service} \
             to guide you through each step and avoid the common pitfalls.",
            keyword = keyword,
            company = company.name,
            service = service,
        ),
        SectionRole::Conclusion => format!(
            "Ready to take the next step with {keyword}? {company} is here to \
             help. Contact us today for a free consultation and find out how \
             {service} can work for you.",
            keyword = keyword,
            company = company.name,
            service = service,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::planner::plan;
    use crate::llm_client::{Generated, GenerationError};
    use async_trait::async_trait;

    /// Gateway double that always fails — exercises the fallback path.
    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _system: &str,
        ) -> Result<Generated, GenerationError> {
            Err(GenerationError::Exhausted { attempts: 2 })
        }
    }

    /// Gateway double that echoes a fixed sentence.
    struct StaticGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for StaticGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _system: &str,
        ) -> Result<Generated, GenerationError> {
            Ok(Generated {
                text: self.0.to_string(),
                word_count: self.0.split_whitespace().count(),
            })
        }
    }

    fn company() -> CompanyContext {
        CompanyContext {
            name: "Helios Home Energy".to_string(),
            services: vec!["solar panel installation".to_string(), "roofing".to_string()],
            website: Some("https://helios.example".to_string()),
        }
    }

    fn paragraph_count(blocks: &[ContentBlock]) -> usize {
        blocks
            .iter()
            .filter(|b| matches!(b, ContentBlock::Paragraph { .. }))
            .count()
    }

    fn image_count(blocks: &[ContentBlock], role: ImageRole) -> usize {
        blocks
            .iter()
            .filter(|b| matches!(b, ContentBlock::ImagePlaceholder { role: r, .. } if *r == role))
            .count()
    }

    #[tokio::test]
    async fn test_fallback_completeness_when_gateway_always_fails() {
        let sections = plan("solar panel installation", 2500, 4);
        let blocks = assemble(
            "solar panel installation",
            &sections,
            &company(),
            &FailingGenerator,
        )
        .await;

        assert!(!blocks.is_empty());
        // One paragraph per planned section, in plan order
        assert_eq!(paragraph_count(&blocks), sections.len());
        assert_eq!(image_count(&blocks, ImageRole::Feature), 1);
        assert_eq!(image_count(&blocks, ImageRole::Inline), 1);
    }

    #[tokio::test]
    async fn test_fallback_paragraphs_carry_keyword_and_company() {
        let sections = plan("solar panel installation", 1500, 2);
        let blocks = assemble(
            "solar panel installation",
            &sections,
            &company(),
            &FailingGenerator,
        )
        .await;

        for text in blocks.iter().filter_map(|b| b.paragraph_text()) {
            assert!(text.contains("solar panel installation"));
            assert!(text.contains("Helios Home Energy"));
        }
    }

    #[tokio::test]
    async fn test_block_order_feature_then_h1_then_intro() {
        let sections = plan("roof repair", 1200, 3);
        let blocks =
            assemble("roof repair", &sections, &company(), &StaticGenerator("Some text here.")).await;

        assert!(matches!(
            blocks[0],
            ContentBlock::ImagePlaceholder {
                role: ImageRole::Feature,
                ..
            }
        ));
        assert!(matches!(blocks[1], ContentBlock::Heading { level: 1, .. }));
        assert!(matches!(
            blocks[2],
            ContentBlock::Paragraph {
                role: SectionRole::Intro,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_heading_immediately_precedes_each_body_paragraph() {
        let sections = plan("roof repair", 2000, 4);
        let blocks =
            assemble("roof repair", &sections, &company(), &StaticGenerator("Body words.")).await;

        for (i, block) in blocks.iter().enumerate() {
            if matches!(
                block,
                ContentBlock::Paragraph {
                    role: SectionRole::Body,
                    ..
                }
            ) {
                assert!(
                    matches!(blocks[i - 1], ContentBlock::Heading { .. }),
                    "body paragraph at {i} not preceded by heading"
                );
            }
        }
    }

    #[tokio::test]
    async fn test_inline_image_after_second_body_section() {
        let sections = plan("roof repair", 2000, 3);
        let blocks =
            assemble("roof repair", &sections, &company(), &StaticGenerator("Body words.")).await;

        let inline_pos = blocks
            .iter()
            .position(|b| {
                matches!(
                    b,
                    ContentBlock::ImagePlaceholder {
                        role: ImageRole::Inline,
                        ..
                    }
                )
            })
            .expect("inline image placeholder missing");

        // The block just before the inline image is the second body paragraph
        let body_paragraphs_before = blocks[..inline_pos]
            .iter()
            .filter(|b| {
                matches!(
                    b,
                    ContentBlock::Paragraph {
                        role: SectionRole::Body,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(body_paragraphs_before, 2);
    }

    #[tokio::test]
    async fn test_no_inline_image_with_single_body_section() {
        let sections = plan("roof repair", 800, 1);
        let blocks =
            assemble("roof repair", &sections, &company(), &StaticGenerator("Body words.")).await;
        assert_eq!(image_count(&blocks, ImageRole::Inline), 0);
        assert_eq!(image_count(&blocks, ImageRole::Feature), 1);
    }

    #[tokio::test]
    async fn test_regenerate_block_replaces_exactly_one() {
        let sections = plan("roof repair", 1500, 2);
        let mut blocks =
            assemble("roof repair", &sections, &company(), &StaticGenerator("Original text.")).await;
        let before = blocks.clone();

        let index = blocks
            .iter()
            .position(|b| {
                matches!(
                    b,
                    ContentBlock::Paragraph {
                        role: SectionRole::Body,
                        ..
                    }
                )
            })
            .unwrap();

        regenerate_block(
            &mut blocks,
            index,
            "roof repair",
            &company(),
            &StaticGenerator("Fresh replacement text for this section."),
        )
        .await
        .unwrap();

        for (i, (old, new)) in before.iter().zip(blocks.iter()).enumerate() {
            if i == index {
                assert_ne!(old, new);
            } else {
                assert_eq!(old, new, "block {i} changed unexpectedly");
            }
        }
    }

    #[tokio::test]
    async fn test_regenerate_block_rejects_non_paragraph() {
        let sections = plan("roof repair", 1500, 2);
        let mut blocks =
            assemble("roof repair", &sections, &company(), &StaticGenerator("Text.")).await;

        // Block 0 is the feature image placeholder
        let result =
            regenerate_block(&mut blocks, 0, "roof repair", &company(), &StaticGenerator("x")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_regenerate_block_out_of_range() {
        let mut blocks = Vec::new();
        let result =
            regenerate_block(&mut blocks, 9, "roof repair", &company(), &StaticGenerator("x")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_section_prompt_embeds_keyword_budget_and_company() {
        let sections = plan("solar panel installation", 2500, 4);
        let prompt = build_section_prompt("solar panel installation", &sections[1], &company());

        assert!(prompt.contains("solar panel installation"));
        assert!(prompt.contains(&sections[1].target_word_count.to_string()));
        assert!(prompt.contains("Helios Home Energy"));
        assert!(prompt.contains("Do NOT keyword-stuff"));
    }

    #[test]
    fn test_intro_prompt_uses_lead_placement() {
        let sections = plan("solar panel installation", 2500, 4);
        let prompt = build_section_prompt("solar panel installation", &sections[0], &company());
        assert!(prompt.contains("first 20 words"));
    }

    #[test]
    fn test_conclusion_prompt_uses_cta_placement() {
        let sections = plan("solar panel installation", 2500, 4);
        let prompt =
            build_section_prompt("solar panel installation", sections.last().unwrap(), &company());
        assert!(prompt.contains("call to action"));
    }
}
