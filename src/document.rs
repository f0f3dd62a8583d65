//! The render pass: manifest, chapter text, blocks, pages, registry.
//!
//! Chapters are loaded one at a time in manifest order. A chapter that
//! cannot be fetched is left out of the document and reported as a
//! diagnostic; it stays in the menu so the reader can see it exists.

use crate::content::{ContentSource, render_blocks};
use crate::frontmatter::split_frontmatter;
use crate::manifest::{ChapterSpec, parse_manifest, visible_chapters};
use crate::pagination::{Measure, Page, PageGeometry, paginate};
use crate::registry::PageRegistry;
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::{info, warn};

/// Outcome of the last render pass as shown to the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerStatus {
    Ready,
    ManifestUnavailable(String),
    NoChapters,
    NoVisibleChapters,
}

impl ViewerStatus {
    pub fn message(&self) -> String {
        match self {
            ViewerStatus::Ready => "Ready".to_string(),
            ViewerStatus::ManifestUnavailable(reason) => {
                format!("Could not load the chapter manifest: {reason}")
            }
            ViewerStatus::NoChapters => "The manifest lists no chapters.".to_string(),
            ViewerStatus::NoVisibleChapters => "No chapters are marked visible.".to_string(),
        }
    }

    pub fn is_ready(&self) -> bool {
        *self == ViewerStatus::Ready
    }
}

impl fmt::Display for ViewerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub chapter_id: String,
    pub message: String,
}

/// One rendered chapter: the manifest record merged with its front matter.
#[derive(Debug, Clone)]
pub struct ChapterSection {
    pub spec: ChapterSpec,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone)]
pub struct Document {
    /// Visible chapters in manifest order, including ones that failed to load.
    pub chapters: Vec<ChapterSpec>,
    pub sections: Vec<ChapterSection>,
    pub registry: PageRegistry,
    pub diagnostics: Vec<Diagnostic>,
    /// Hex SHA-256 over chapter ids and their source text.
    pub revision: String,
    pub status: ViewerStatus,
}

impl Document {
    fn with_status(status: ViewerStatus) -> Self {
        Document {
            chapters: Vec::new(),
            sections: Vec::new(),
            registry: PageRegistry::new(),
            diagnostics: Vec::new(),
            revision: String::new(),
            status,
        }
    }

    pub fn visible_ids(&self) -> Vec<String> {
        self.chapters.iter().map(|c| c.id.clone()).collect()
    }

    pub fn page_count(&self) -> usize {
        self.sections.iter().map(|s| s.pages.len()).sum()
    }

    pub fn section(&self, chapter_id: &str) -> Option<&ChapterSection> {
        self.sections.iter().find(|s| s.spec.id == chapter_id)
    }

    /// Re-run pagination over the already rendered blocks, e.g. after the
    /// page geometry changed. The registry is rebuilt from scratch.
    pub fn repaginate<M, G>(&mut self, measure: &M, geometry: &G)
    where
        M: Measure + ?Sized,
        G: PageGeometry + ?Sized,
    {
        self.registry.clear();
        for section in &mut self.sections {
            let nodes = std::mem::take(&mut section.pages)
                .into_iter()
                .flat_map(|page| page.nodes)
                .collect();
            section.pages = paginate(&section.spec, nodes, measure, geometry);
            self.registry.replace_chapter(&section.spec.id, &section.pages);
        }
        info!(pages = self.page_count(), "Repaginated document");
    }
}

/// Load the manifest and every visible chapter, then paginate.
pub fn build_document<M, G>(
    source: &dyn ContentSource,
    manifest_file: &str,
    measure: &M,
    geometry: &G,
) -> Document
where
    M: Measure + ?Sized,
    G: PageGeometry + ?Sized,
{
    let manifest_text = match source.fetch(manifest_file) {
        Ok(text) => text,
        Err(err) => {
            warn!(source = %source.describe(), "Manifest unavailable: {err}");
            return Document::with_status(ViewerStatus::ManifestUnavailable(err.to_string()));
        }
    };
    let chapters = match parse_manifest(&manifest_text) {
        Ok(chapters) => chapters,
        Err(err) => {
            warn!("Manifest unreadable: {err:#}");
            return Document::with_status(ViewerStatus::ManifestUnavailable(format!("{err:#}")));
        }
    };
    if chapters.is_empty() {
        return Document::with_status(ViewerStatus::NoChapters);
    }
    let visible = visible_chapters(&chapters);
    if visible.is_empty() {
        return Document::with_status(ViewerStatus::NoVisibleChapters);
    }

    let mut document = Document::with_status(ViewerStatus::Ready);
    let mut hasher = Sha256::new();
    for spec in &visible {
        hasher.update(spec.id.as_bytes());
        hasher.update([0u8]);

        let text = match source.fetch(&spec.file) {
            Ok(text) => text,
            Err(err) => {
                warn!(chapter = %spec.id, file = %spec.file, "Skipping chapter: {err}");
                document.diagnostics.push(Diagnostic {
                    chapter_id: spec.id.clone(),
                    message: err.to_string(),
                });
                continue;
            }
        };
        hasher.update(text.as_bytes());
        hasher.update([0u8]);

        let (meta, body) = split_frontmatter(&text);
        let merged = meta.apply_to(spec);
        let nodes = render_blocks(body);
        let pages = paginate(&merged, nodes, measure, geometry);
        document.registry.replace_chapter(&merged.id, &pages);
        document.sections.push(ChapterSection {
            spec: merged,
            pages,
        });
    }

    document.chapters = visible;
    document.revision = format!("{:x}", hasher.finalize());
    info!(
        chapters = document.sections.len(),
        pages = document.page_count(),
        skipped = document.diagnostics.len(),
        "Built document"
    );
    document
}
