//! SEO plugin meta-field mapping.
//!
//! WordPress installs differ in which SEO plugin owns the meta box, so the
//! publish payload carries the same title/description/keyword triple under
//! all three supported plugin namespaces. Pure data-shape transform — no
//! decision logic.

use serde_json::{json, Map, Value};

use crate::content::MetaData;

/// Maps the draft meta onto Yoast, Rank Math, and All in One SEO fields.
pub fn plugin_meta_fields(meta: &MetaData, keyword: &str) -> Map<String, Value> {
    let mut fields = Map::new();

    // Yoast SEO
    fields.insert("_yoast_wpseo_title".to_string(), json!(meta.meta_title));
    fields.insert(
        "_yoast_wpseo_metadesc".to_string(),
        json!(meta.meta_description),
    );
    fields.insert("_yoast_wpseo_focuskw".to_string(), json!(keyword));

    // Rank Math
    fields.insert("rank_math_title".to_string(), json!(meta.meta_title));
    fields.insert(
        "rank_math_description".to_string(),
        json!(meta.meta_description),
    );
    fields.insert("rank_math_focus_keyword".to_string(), json!(keyword));

    // All in One SEO
    fields.insert("_aioseo_title".to_string(), json!(meta.meta_title));
    fields.insert(
        "_aioseo_description".to_string(),
        json!(meta.meta_description),
    );
    fields.insert("_aioseo_keywords".to_string(), json!(keyword));

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> MetaData {
        MetaData {
            h1: "Solar Panel Installation".to_string(),
            meta_title: "Solar Panel Installation | Helios".to_string(),
            meta_description: "desc".to_string(),
            slug: "solar-panel-installation".to_string(),
        }
    }

    #[test]
    fn test_all_three_plugin_namespaces_present() {
        let fields = plugin_meta_fields(&meta(), "solar panel installation");

        for key in [
            "_yoast_wpseo_title",
            "_yoast_wpseo_metadesc",
            "_yoast_wpseo_focuskw",
            "rank_math_title",
            "rank_math_description",
            "rank_math_focus_keyword",
            "_aioseo_title",
            "_aioseo_description",
            "_aioseo_keywords",
        ] {
            assert!(fields.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_titles_match_across_namespaces() {
        let fields = plugin_meta_fields(&meta(), "solar panel installation");
        assert_eq!(fields["_yoast_wpseo_title"], fields["rank_math_title"]);
        assert_eq!(fields["rank_math_title"], fields["_aioseo_title"]);
        assert_eq!(
            fields["rank_math_focus_keyword"],
            Value::String("solar panel installation".to_string())
        );
    }
}
