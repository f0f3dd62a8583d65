//! Index of page anchors per chapter.
//!
//! The registry is the only place the navigation layer looks up "where is
//! chapter X" and "which chapter owns page Y". Chapters keep document order;
//! a chapter whose content failed to load is simply absent.

use crate::pagination::Page;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAnchor {
    pub id: String,
    pub chapter_id: String,
    /// 1-based.
    pub page_index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
    chapters: Vec<(String, Vec<PageAnchor>)>,
    owners: HashMap<String, String>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.chapters.clear();
        self.owners.clear();
    }

    /// Record (or re-record) the pages of one chapter. A chapter that is new
    /// to the registry is appended; an existing one keeps its position.
    pub fn replace_chapter(&mut self, chapter_id: &str, pages: &[Page]) {
        let anchors: Vec<PageAnchor> = pages
            .iter()
            .map(|page| PageAnchor {
                id: page.anchor_id(),
                chapter_id: chapter_id.to_string(),
                page_index: page.page_index,
            })
            .collect();

        if let Some(slot) = self.chapters.iter_mut().find(|(id, _)| id == chapter_id) {
            for old in &slot.1 {
                self.owners.remove(&old.id);
            }
            slot.1 = anchors.clone();
        } else {
            self.chapters.push((chapter_id.to_string(), anchors.clone()));
        }
        for anchor in anchors {
            self.owners.insert(anchor.id, chapter_id.to_string());
        }
        debug!(chapter = chapter_id, pages = pages.len(), "Registered chapter pages");
    }

    pub fn anchors_for(&self, chapter_id: &str) -> &[PageAnchor] {
        self.chapters
            .iter()
            .find(|(id, _)| id == chapter_id)
            .map(|(_, anchors)| anchors.as_slice())
            .unwrap_or(&[])
    }

    pub fn first_anchor(&self, chapter_id: &str) -> Option<&PageAnchor> {
        self.anchors_for(chapter_id).first()
    }

    pub fn chapter_for_page(&self, anchor_id: &str) -> Option<&str> {
        self.owners.get(anchor_id).map(String::as_str)
    }

    pub fn contains_chapter(&self, chapter_id: &str) -> bool {
        self.chapters.iter().any(|(id, _)| id == chapter_id)
    }

    /// Chapter ids in document order.
    pub fn chapter_ids(&self) -> impl Iterator<Item = &str> {
        self.chapters.iter().map(|(id, _)| id.as_str())
    }

    /// All anchors in document order.
    pub fn anchors(&self) -> impl Iterator<Item = &PageAnchor> {
        self.chapters.iter().flat_map(|(_, anchors)| anchors.iter())
    }

    pub fn page_count(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}
