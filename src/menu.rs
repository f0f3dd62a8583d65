//! Chapter menu model.
//!
//! Chapters are grouped by the major part of their id. The `major.0`
//! chapter heads its group; the remaining chapters are listed under it in
//! manifest order. A group with no `major.0` chapter gets a generated
//! heading instead.

use crate::manifest::{ChapterSpec, ChapterStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub chapter_id: String,
    pub title: String,
    pub description: String,
    pub status: ChapterStatus,
}

impl MenuEntry {
    fn from_spec(spec: &ChapterSpec) -> Self {
        let title = if spec.title.trim().is_empty() {
            spec.id.clone()
        } else {
            spec.title.clone()
        };
        MenuEntry {
            chapter_id: spec.id.clone(),
            title,
            description: spec.description.clone(),
            status: spec.status,
        }
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    pub fn css_modifier(&self) -> String {
        format!("chapter-entry--{}", self.status.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGroup {
    pub major: String,
    pub parent: Option<MenuEntry>,
    pub children: Vec<MenuEntry>,
}

impl MenuGroup {
    /// Generated heading for groups without a parent chapter.
    pub fn heading(&self) -> Option<String> {
        match self.parent {
            Some(_) => None,
            None => Some(format!("Chapter {}", self.major)),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &MenuEntry> {
        self.parent.iter().chain(self.children.iter())
    }
}

/// Group visible chapters for the menu, in order of first appearance.
pub fn build_menu(chapters: &[ChapterSpec]) -> Vec<MenuGroup> {
    let mut groups: Vec<MenuGroup> = Vec::new();
    for spec in chapters.iter().filter(|c| c.visible) {
        let major = spec.major();
        let position = match groups.iter().position(|g| g.major == major) {
            Some(position) => position,
            None => {
                groups.push(MenuGroup {
                    major: major.to_string(),
                    parent: None,
                    children: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[position];
        let entry = MenuEntry::from_spec(spec);
        if spec.is_group_parent() && group.parent.is_none() {
            group.parent = Some(entry);
        } else {
            group.children.push(entry);
        }
    }
    groups
}
