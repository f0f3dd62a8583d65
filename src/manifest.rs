//! Chapter manifest model.
//!
//! The manifest is a JSON array of chapter records. Only `id` and `file` are
//! required; everything else has a default. Records that cannot be used are
//! skipped with a warning instead of failing the whole manifest.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Authoring progress of a chapter, shown as a pill in the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChapterStatus {
    Done,
    InProgress,
    #[default]
    NotStarted,
}

impl ChapterStatus {
    /// Case- and space-insensitive parse; unknown values map to `NotStarted`.
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim().to_ascii_lowercase();
        match value.as_str() {
            "done" => ChapterStatus::Done,
            "in progress" | "in_progress" => ChapterStatus::InProgress,
            _ => ChapterStatus::NotStarted,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChapterStatus::Done => "done",
            ChapterStatus::InProgress => "in progress",
            ChapterStatus::NotStarted => "not started",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ChapterStatus::Done => "done",
            ChapterStatus::InProgress => "in_progress",
            ChapterStatus::NotStarted => "not_started",
        }
    }
}

/// How a chapter's content is laid out in the document view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// One flowing container per chapter.
    #[default]
    Default,
    /// Fixed-height "A4" page containers.
    Paged,
}

impl LayoutMode {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "paged" | "a4" => LayoutMode::Paged,
            _ => LayoutMode::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChapterSpec {
    pub id: String,
    pub title: String,
    pub description: String,
    pub file: String,
    pub status: ChapterStatus,
    pub layout: LayoutMode,
    pub force_page_break_before: bool,
    pub page_break_after: bool,
    pub visible: bool,
}

impl ChapterSpec {
    /// Minimal visible chapter with default layout, mostly useful for tests.
    pub fn new(id: impl Into<String>, file: impl Into<String>) -> Self {
        ChapterSpec {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            file: file.into(),
            status: ChapterStatus::NotStarted,
            layout: LayoutMode::Default,
            force_page_break_before: false,
            page_break_after: false,
            visible: true,
        }
    }

    pub fn major(&self) -> &str {
        self.id.split('.').next().unwrap_or_default()
    }

    pub fn minor(&self) -> &str {
        self.id.split('.').nth(1).unwrap_or_default()
    }

    /// `major.0` chapters head their group in the menu.
    pub fn is_group_parent(&self) -> bool {
        self.minor() == "0"
    }
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    visible_in_viewer: Option<bool>,
    #[serde(default)]
    layout: Option<String>,
    #[serde(default)]
    force_new_page_before: Option<bool>,
    #[serde(default)]
    page_break_after: Option<bool>,
}

impl ManifestEntry {
    fn into_spec(self) -> Option<ChapterSpec> {
        let id = match self.id? {
            serde_json::Value::String(id) => id.trim().to_string(),
            serde_json::Value::Number(number) => number.to_string(),
            _ => return None,
        };
        let file = self.file?.trim().to_string();
        if id.is_empty() || file.is_empty() {
            return None;
        }
        Some(ChapterSpec {
            id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            file,
            status: self
                .status
                .as_deref()
                .map(ChapterStatus::parse)
                .unwrap_or_default(),
            layout: self
                .layout
                .as_deref()
                .map(LayoutMode::parse)
                .unwrap_or_default(),
            force_page_break_before: self.force_new_page_before.unwrap_or(false),
            page_break_after: self.page_break_after.unwrap_or(false),
            visible: self.visible_in_viewer.unwrap_or(true),
        })
    }
}

/// Parse manifest JSON. A document that is not an array yields no chapters.
pub fn parse_manifest(json: &str) -> Result<Vec<ChapterSpec>> {
    let value: serde_json::Value =
        serde_json::from_str(json).context("manifest is not valid JSON")?;
    let serde_json::Value::Array(entries) = value else {
        warn!("Manifest root is not an array; treating as empty");
        return Ok(Vec::new());
    };

    let mut seen = HashSet::new();
    let mut chapters = Vec::with_capacity(entries.len());
    for (position, raw) in entries.into_iter().enumerate() {
        let entry = match serde_json::from_value::<ManifestEntry>(raw) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(position, "Skipping malformed manifest entry: {err}");
                continue;
            }
        };
        let Some(spec) = entry.into_spec() else {
            warn!(position, "Skipping manifest entry without id or file");
            continue;
        };
        if !seen.insert(spec.id.clone()) {
            warn!(position, id = %spec.id, "Skipping duplicate chapter id");
            continue;
        }
        chapters.push(spec);
    }
    debug!(chapters = chapters.len(), "Parsed manifest");
    Ok(chapters)
}

/// Chapters the viewer shows, in manifest order.
pub fn visible_chapters(chapters: &[ChapterSpec]) -> Vec<ChapterSpec> {
    chapters.iter().filter(|c| c.visible).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_ignores_case_and_separator() {
        assert_eq!(ChapterStatus::parse(" In Progress "), ChapterStatus::InProgress);
        assert_eq!(ChapterStatus::parse("IN_PROGRESS"), ChapterStatus::InProgress);
        assert_eq!(ChapterStatus::parse("Done"), ChapterStatus::Done);
        assert_eq!(ChapterStatus::parse("not started"), ChapterStatus::NotStarted);
        assert_eq!(ChapterStatus::parse("whatever"), ChapterStatus::NotStarted);
    }

    #[test]
    fn a4_layout_means_paged() {
        assert_eq!(LayoutMode::parse("A4"), LayoutMode::Paged);
        assert_eq!(LayoutMode::parse("paged"), LayoutMode::Paged);
        assert_eq!(LayoutMode::parse("flow"), LayoutMode::Default);
    }

    #[test]
    fn parses_entries_with_defaults() {
        let chapters = parse_manifest(
            r#"[
                {"id": "1.0", "file": "1.0_intro.md", "title": "Intro", "status": "done"},
                {"id": "1.1", "file": "1.1_goal.md", "visible_in_viewer": false,
                 "layout": "A4", "force_new_page_before": true, "page_break_after": true}
            ]"#,
        )
        .expect("manifest");

        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, "Intro");
        assert_eq!(chapters[0].status, ChapterStatus::Done);
        assert!(chapters[0].visible);
        assert_eq!(chapters[0].layout, LayoutMode::Default);

        assert!(!chapters[1].visible);
        assert_eq!(chapters[1].layout, LayoutMode::Paged);
        assert!(chapters[1].force_page_break_before);
        assert!(chapters[1].page_break_after);
        assert_eq!(chapters[1].status, ChapterStatus::NotStarted);
    }

    #[test]
    fn skips_unusable_and_duplicate_entries() {
        let chapters = parse_manifest(
            r#"[
                {"id": "1.0"},
                {"file": "orphan.md"},
                {"id": "2.0", "file": "a.md"},
                {"id": "2.0", "file": "b.md"},
                "not an object",
                {"id": 3, "file": "c.md"}
            ]"#,
        )
        .expect("manifest");

        let ids: Vec<_> = chapters.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["2.0", "3"]);
        assert_eq!(chapters[0].file, "a.md");
    }

    #[test]
    fn non_array_manifest_is_empty() {
        assert!(parse_manifest(r#"{"chapters": []}"#).expect("object").is_empty());
        assert!(parse_manifest("not json").is_err());
    }

    #[test]
    fn dotted_id_splits_into_major_and_minor() {
        let spec = ChapterSpec::new("3.2", "x.md");
        assert_eq!(spec.major(), "3");
        assert_eq!(spec.minor(), "2");
        assert!(!spec.is_group_parent());
        assert!(ChapterSpec::new("3.0", "x.md").is_group_parent());
    }
}
