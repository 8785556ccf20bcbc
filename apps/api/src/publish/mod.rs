//! Publication Adapter — maps assembled blocks + meta + branding onto the
//! WordPress draft-document shape.

pub mod handlers;
pub mod meta_fields;
pub mod render;
pub mod wordpress;

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::content::{CompanyContext, ContentBlock, ImageRole, MetaData};

/// The document shape consumed by the publishing service.
#[derive(Debug, Clone, Serialize)]
pub struct PublishPayload {
    pub title: String,
    pub html_body: String,
    pub excerpt: String,
    pub slug: String,
    pub meta_fields: Map<String, Value>,
    pub featured_image_ref: Option<String>,
}

/// Builds the publish payload. Pure — rendering order is block order, image
/// placeholders resolve through `image_refs` or are omitted.
pub fn build_publish_payload(
    blocks: &[ContentBlock],
    meta: &MetaData,
    keyword: &str,
    company: &CompanyContext,
    image_refs: &HashMap<Uuid, String>,
) -> PublishPayload {
    let featured_image_ref = blocks.iter().find_map(|b| match b {
        ContentBlock::ImagePlaceholder {
            id,
            role: ImageRole::Feature,
            ..
        } => image_refs.get(id).cloned(),
        _ => None,
    });

    PublishPayload {
        title: meta.h1.clone(),
        html_body: render::render_html_body(blocks, keyword, company, image_refs),
        excerpt: meta.meta_description.clone(),
        slug: meta.slug.clone(),
        meta_fields: meta_fields::plugin_meta_fields(meta, keyword),
        featured_image_ref,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SectionRole;

    fn company() -> CompanyContext {
        CompanyContext {
            name: "Helios Home Energy".to_string(),
            services: vec!["solar panel installation".to_string()],
            website: Some("https://helios.example".to_string()),
        }
    }

    fn meta() -> MetaData {
        MetaData {
            h1: "Solar Panel Installation".to_string(),
            meta_title: "Solar Panel Installation | Helios".to_string(),
            meta_description: "A full guide to going solar.".to_string(),
            slug: "solar-panel-installation".to_string(),
        }
    }

    #[test]
    fn test_payload_title_and_excerpt_come_from_meta() {
        let payload = build_publish_payload(
            &[],
            &meta(),
            "solar panel installation",
            &company(),
            &HashMap::new(),
        );
        assert_eq!(payload.title, "Solar Panel Installation");
        assert_eq!(payload.excerpt, "A full guide to going solar.");
        assert_eq!(payload.slug, "solar-panel-installation");
        assert!(payload.featured_image_ref.is_none());
    }

    #[test]
    fn test_featured_image_ref_resolves_feature_placeholder() {
        let feature_id = Uuid::new_v4();
        let inline_id = Uuid::new_v4();
        let blocks = vec![
            ContentBlock::ImagePlaceholder {
                id: feature_id,
                prompt: "p".to_string(),
                alt_text: "a".to_string(),
                role: ImageRole::Feature,
            },
            ContentBlock::Paragraph {
                text: "Intro.".to_string(),
                role: SectionRole::Intro,
            },
            ContentBlock::ImagePlaceholder {
                id: inline_id,
                prompt: "p".to_string(),
                alt_text: "a".to_string(),
                role: ImageRole::Inline,
            },
        ];
        let mut refs = HashMap::new();
        refs.insert(feature_id, "https://cdn.example/feature.jpg".to_string());
        refs.insert(inline_id, "https://cdn.example/inline.jpg".to_string());

        let payload =
            build_publish_payload(&blocks, &meta(), "solar panel installation", &company(), &refs);
        assert_eq!(
            payload.featured_image_ref.as_deref(),
            Some("https://cdn.example/feature.jpg")
        );
        // Both images also render inline in the body
        assert!(payload.html_body.contains("feature.jpg"));
        assert!(payload.html_body.contains("inline.jpg"));
    }
}
