// All LLM prompt constants for the generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Section prompt template. Replace `{heading}`, `{keyword}`,
/// `{target_words}`, `{placement_instruction}`, `{company_name}`,
/// `{services}` before sending.
pub const SECTION_PROMPT_TEMPLATE: &str = r#"Write one section of a blog post.

Section heading: {heading}
Focus keyword: {keyword}
Target length: approximately {target_words} words.

KEYWORD PLACEMENT RULE:
{placement_instruction}

COMPANY:
Name: {company_name}
Services: {services}
You MUST mention the company by name at least once in this section and
reference at least one of its listed services where it reads naturally.
Never invent services that are not listed.

Write the section body text only. Do not repeat the heading. Do not use
markdown formatting."#;

/// Placement instruction for the introduction.
pub const PLACEMENT_LEAD: &str = "Use the exact phrase \"{keyword}\" within \
    the first 20 words of the section. This is the article opening — hook \
    the reader immediately.";

/// Placement instruction for body sections.
pub const PLACEMENT_NATURAL: &str = "Repeat the exact phrase \"{keyword}\" \
    one or two times where it reads naturally. Do NOT keyword-stuff.";

/// Placement instruction for the conclusion.
pub const PLACEMENT_CTA: &str = "Use the exact phrase \"{keyword}\" at least \
    once and close with a clear call to action inviting the reader to \
    contact the company.";

/// System prompt for meta optimization — enforces JSON-only output.
pub const META_SYSTEM: &str = "You are an expert SEO strategist. \
    You optimize page titles, meta descriptions, and URL slugs. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Meta optimization prompt template. Replace `{keyword}`, `{company_name}`,
/// `{draft_h1}`, `{draft_meta_title}`, `{draft_meta_description}` before
/// sending.
pub const META_PROMPT_TEMPLATE: &str = r#"Optimize the SEO meta fields for a blog post.

Focus keyword: {keyword}
Company name: {company_name}

Current drafts:
H1: {draft_h1}
Meta title: {draft_meta_title}
Meta description: {draft_meta_description}

Return a JSON object with this EXACT schema (no extra fields):
{
  "h1": "...",
  "meta_title": "...",
  "meta_description": "...",
  "slug": "..."
}

Rules:
- "h1" and "meta_title" MUST contain the focus keyword verbatim and be at
  most 60 characters long.
- "meta_description" MUST contain the focus keyword and be between 140 and
  160 characters long.
- "slug" MUST be the keyword in lowercase with hyphens instead of spaces,
  no other characters, at most 50 characters."#;

/// Feature image prompt template. Replace `{keyword}`.
pub const FEATURE_IMAGE_PROMPT_TEMPLATE: &str =
    "Professional photograph illustrating {keyword}, wide banner composition, \
     natural lighting, no text overlay";

/// Inline image prompt template. Replace `{keyword}`.
pub const INLINE_IMAGE_PROMPT_TEMPLATE: &str =
    "Detailed photograph of {keyword} in progress, editorial style, \
     natural lighting, no text overlay";
