//! Front-matter handling for chapter files.
//!
//! A chapter may start with a YAML block delimited by `---` lines. Only the
//! layout keys are consumed here; when present they win over the manifest's
//! same-named fields. A block that does not parse is treated as absent.

use crate::manifest::{ChapterSpec, LayoutMode};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml_ng::Value;
use tracing::{debug, warn};

static RE_FRONTMATTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^---\s*([\s\S]*?)\s*---\s*").unwrap());

/// Layout keys parsed from a chapter's front matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterMeta {
    pub layout: Option<LayoutMode>,
    pub force_new_page_before: Option<bool>,
    pub page_break_after: Option<bool>,
}

impl ChapterMeta {
    pub fn is_empty(&self) -> bool {
        self.layout.is_none()
            && self.force_new_page_before.is_none()
            && self.page_break_after.is_none()
    }

    /// Apply these keys on top of the manifest record.
    pub fn apply_to(&self, spec: &ChapterSpec) -> ChapterSpec {
        let mut merged = spec.clone();
        if let Some(layout) = self.layout {
            merged.layout = layout;
        }
        if let Some(force) = self.force_new_page_before {
            merged.force_page_break_before = force;
        }
        if let Some(after) = self.page_break_after {
            merged.page_break_after = after;
        }
        merged
    }

    fn from_yaml(block: &str) -> Self {
        let value: Value = match serde_yaml_ng::from_str(block) {
            Ok(value) => value,
            Err(err) => {
                warn!("Ignoring malformed front matter: {err}");
                return ChapterMeta::default();
            }
        };
        let Value::Mapping(map) = value else {
            debug!("Front matter is not a mapping; ignoring");
            return ChapterMeta::default();
        };

        let field = |key: &str| map.get(key);
        ChapterMeta {
            layout: field("layout")
                .and_then(Value::as_str)
                .map(LayoutMode::parse),
            force_new_page_before: field("force_new_page_before").and_then(lenient_bool),
            page_break_after: field("page_break_after").and_then(lenient_bool),
        }
    }
}

fn lenient_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Split a chapter into its front matter and the Markdown body.
pub fn split_frontmatter(text: &str) -> (ChapterMeta, &str) {
    match RE_FRONTMATTER.captures(text) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0, |m| m.end());
            let block = caps.get(1).map_or("", |m| m.as_str());
            (ChapterMeta::from_yaml(block), &text[whole..])
        }
        None => (ChapterMeta::default(), text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAPTER: &str = "---\nstatus: \"\"\nid: \"\"\nlayout: \"A4\"\nforce_new_page_before: true\npage_break_after: true\nvisible_in_viewer: true\n---\n\n# Heading\n\nBody.\n";

    #[test]
    fn splits_block_and_body() {
        let (meta, body) = split_frontmatter(CHAPTER);
        assert_eq!(meta.layout, Some(LayoutMode::Paged));
        assert_eq!(meta.force_new_page_before, Some(true));
        assert_eq!(meta.page_break_after, Some(true));
        assert!(body.starts_with("# Heading"));
    }

    #[test]
    fn text_without_block_is_untouched() {
        let (meta, body) = split_frontmatter("# Plain\n");
        assert!(meta.is_empty());
        assert_eq!(body, "# Plain\n");
    }

    #[test]
    fn malformed_yaml_yields_empty_meta_but_strips_block() {
        let (meta, body) = split_frontmatter("---\nlayout: [unclosed\n---\nBody");
        assert!(meta.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn metadata_overrides_manifest_fields_only_when_present() {
        let mut spec = ChapterSpec::new("2.1", "2.1.md");
        spec.page_break_after = true;

        let meta = ChapterMeta {
            layout: Some(LayoutMode::Paged),
            force_new_page_before: Some(true),
            page_break_after: None,
        };
        let merged = meta.apply_to(&spec);
        assert_eq!(merged.layout, LayoutMode::Paged);
        assert!(merged.force_page_break_before);
        assert!(merged.page_break_after);
    }

    #[test]
    fn string_booleans_are_accepted() {
        let (meta, _) = split_frontmatter("---\npage_break_after: \"yes\"\n---\n");
        assert_eq!(meta.page_break_after, Some(true));
    }
}
