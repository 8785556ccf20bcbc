//! Typed HTML rendering for content blocks.
//!
//! One rendering function per block variant (match over the tagged union).
//! Inline style constants live in the table below — never repeated inline
//! at call sites.

use std::collections::HashMap;

use uuid::Uuid;

use crate::content::{CompanyContext, ContentBlock};
use crate::generation::meta_optimizer::generate_slug;

// ────────────────────────────────────────────────────────────────────────────
// Style table
// ────────────────────────────────────────────────────────────────────────────

const H1_STYLE: &str = "font-size:32px;line-height:1.25;margin:24px 0 16px;";
const H2_STYLE: &str = "font-size:24px;line-height:1.3;margin:24px 0 12px;";
const H3_STYLE: &str = "font-size:20px;line-height:1.35;margin:20px 0 10px;";
const PARAGRAPH_STYLE: &str = "font-size:17px;line-height:1.7;margin:0 0 16px;";
const IMAGE_STYLE: &str = "max-width:100%;height:auto;border-radius:8px;margin:16px 0;";
const RELATED_LIST_STYLE: &str = "font-size:16px;line-height:1.6;margin:0 0 12px 20px;";

// ────────────────────────────────────────────────────────────────────────────
// Block rendering
// ────────────────────────────────────────────────────────────────────────────

/// Renders one block to an HTML fragment.
///
/// Image placeholders resolve through `image_refs` (block id → uploaded
/// URL). An unresolved placeholder returns `None` and is omitted from the
/// output — never rendered as a broken reference.
pub fn render_block(
    block: &ContentBlock,
    image_refs: &HashMap<Uuid, String>,
) -> Option<String> {
    match block {
        ContentBlock::Heading { level, text } => {
            let (tag, style) = match level {
                1 => ("h1", H1_STYLE),
                2 => ("h2", H2_STYLE),
                _ => ("h3", H3_STYLE),
            };
            Some(format!(
                "<{tag} style=\"{style}\">{}</{tag}>",
                escape_html(text)
            ))
        }
        ContentBlock::Paragraph { text, .. } => Some(format!(
            "<p style=\"{PARAGRAPH_STYLE}\">{}</p>",
            escape_html(text)
        )),
        ContentBlock::ImagePlaceholder { id, alt_text, .. } => {
            let url = image_refs.get(id)?;
            Some(format!(
                "<img src=\"{}\" alt=\"{}\" style=\"{IMAGE_STYLE}\" />",
                escape_html(url),
                escape_html(alt_text)
            ))
        }
    }
}

/// Renders the full block list in document order, then appends the two
/// related sections. Pure — same inputs, same markup.
pub fn render_html_body(
    blocks: &[ContentBlock],
    keyword: &str,
    company: &CompanyContext,
    image_refs: &HashMap<Uuid, String>,
) -> String {
    let mut html = blocks
        .iter()
        .filter_map(|b| render_block(b, image_refs))
        .collect::<Vec<_>>()
        .join("\n");

    html.push('\n');
    html.push_str(&render_related_links(company));
    html.push('\n');
    html.push_str(&render_related_content(keyword, company));
    html
}

/// Related-services link list — a pure function of the company branding.
pub fn render_related_links(company: &CompanyContext) -> String {
    let base = company.website.as_deref().unwrap_or("").trim_end_matches('/');

    let items = company
        .services
        .iter()
        .map(|service| {
            format!(
                "<li><a href=\"{base}/services/{}\">{}</a></li>",
                generate_slug(service),
                escape_html(service)
            )
        })
        .collect::<Vec<_>>()
        .join("");

    format!(
        "<h2 style=\"{H2_STYLE}\">Our Services</h2>\
         <ul style=\"{RELATED_LIST_STYLE}\">{items}</ul>"
    )
}

/// Related-content teaser links — a pure function of keyword + branding.
pub fn render_related_content(keyword: &str, company: &CompanyContext) -> String {
    let base = company.website.as_deref().unwrap_or("").trim_end_matches('/');
    let slug = generate_slug(keyword);
    let display = escape_html(keyword);

    format!(
        "<h2 style=\"{H2_STYLE}\">Keep Reading</h2>\
         <ul style=\"{RELATED_LIST_STYLE}\">\
         <li><a href=\"{base}/blog/{slug}-cost\">How much does {display} cost?</a></li>\
         <li><a href=\"{base}/blog/{slug}-checklist\">Your {display} checklist</a></li>\
         </ul>"
    )
}

/// Minimal HTML escaping for text interpolated into markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
