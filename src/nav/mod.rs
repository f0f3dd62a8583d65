//! Navigation synchronizer.
//!
//! Keeps one committed "current chapter" consistent across three inputs:
//! the scroll position (scroll-spy), the chapter menu and the URL fragment.
//! The fragment is only ever written as the result of a commit, and reading
//! it back selects with [`Origin::Hash`], which is a no-op when it already
//! names the current chapter. That ordering is what prevents a
//! scroll → fragment → scroll loop.
//!
//! Hovering a menu entry previews a chapter by scrolling to it without
//! committing; leaving the entry scrolls back. While a preview is active,
//! scroll-spy commits are suppressed so the preview scroll cannot steal the
//! selection.

mod fragment;
mod messages;
mod state;
mod update;

pub use fragment::{format_fragment, parse_fragment};
pub use messages::NavEvent;
pub use state::{Mode, NavigationState};
pub use update::{Effect, Origin, ScrollBehavior, pick_active_page};

use crate::config::ViewerConfig;
use crate::registry::PageRegistry;

#[derive(Debug, Clone, PartialEq)]
pub struct NavConfig {
    /// Distance of the scroll-spy line from the top of the viewport.
    pub anchor_line_px: f32,
    pub fragment_key: String,
}

impl NavConfig {
    pub fn from_config(config: &ViewerConfig) -> Self {
        NavConfig {
            anchor_line_px: config.anchor_line_offset(),
            fragment_key: config.fragment_key.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    state: NavigationState,
    config: NavConfig,
    visible_ids: Vec<String>,
    restored_from_fragment: bool,
}

impl Navigator {
    pub fn new(config: NavConfig, visible_ids: Vec<String>, fragment: Option<&str>) -> Self {
        let state = NavigationState::initial(&visible_ids, fragment, &config.fragment_key);
        let restored_from_fragment = fragment
            .and_then(|raw| parse_fragment(raw, &config.fragment_key))
            .is_some_and(|id| state.is_current(&id));
        Navigator {
            state,
            config,
            visible_ids,
            restored_from_fragment,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_chapter(&self) -> Option<&str> {
        self.state.current_chapter_id.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn is_visible(&self, chapter_id: &str) -> bool {
        self.visible_ids.iter().any(|id| id == chapter_id)
    }

    /// Effects to apply once the document is on screen: highlight the
    /// initial chapter and, when it came from the fragment, jump to it.
    pub fn initial_effects(&mut self, registry: &PageRegistry) -> Vec<Effect> {
        let mut effects = Vec::new();
        let Some(current) = self.state.current_chapter_id.clone() else {
            return effects;
        };
        if self.restored_from_fragment {
            self.push_scroll(registry, &current, ScrollBehavior::Instant, &mut effects);
        }
        effects.push(Effect::Highlight(current));
        effects
    }

    /// Replace the visible chapter set after a rebuild. A current chapter
    /// that disappeared falls back to the first visible one.
    pub fn set_visible(&mut self, visible_ids: Vec<String>) {
        self.visible_ids = visible_ids;
        let keep = self
            .state
            .current_chapter_id
            .as_deref()
            .is_some_and(|id| self.is_visible(id));
        if !keep {
            self.state.current_chapter_id = self.visible_ids.first().cloned();
        }
        let stale_preview = self
            .state
            .pending_hover_chapter_id
            .as_deref()
            .is_some_and(|id| !self.is_visible(id));
        if stale_preview {
            self.state.pending_hover_chapter_id = None;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::layout::{PageRect, Viewport};
    use crate::manifest::{ChapterSpec, LayoutMode};
    use crate::pagination::paginate;
    use crate::pagination::tests::{SyntheticHeights, nodes};

    pub(crate) const IDS: [&str; 6] = ["1.0", "1.1", "2.0", "2.1", "3.0", "3.1"];

    pub(crate) fn registry() -> PageRegistry {
        let mut registry = PageRegistry::new();
        for id in IDS {
            let mut spec = ChapterSpec::new(id, format!("{id}.md"));
            spec.layout = LayoutMode::Paged;
            let pages = paginate(&spec, nodes(3), &SyntheticHeights(vec![60.0; 3]), &100.0_f32);
            registry.replace_chapter(id, &pages);
        }
        registry
    }

    pub(crate) fn config() -> NavConfig {
        NavConfig {
            anchor_line_px: 88.0,
            fragment_key: "chapter".to_string(),
        }
    }

    pub(crate) fn navigator(fragment: Option<&str>) -> Navigator {
        Navigator::new(
            config(),
            IDS.iter().map(|id| id.to_string()).collect(),
            fragment,
        )
    }

    pub(crate) fn rect(chapter_id: &str, page_index: usize, top: f32, height: f32) -> PageRect {
        PageRect {
            anchor_id: crate::pagination::anchor_id(chapter_id, page_index),
            chapter_id: chapter_id.to_string(),
            top,
            height,
        }
    }

    pub(crate) fn viewport(pages: Vec<PageRect>) -> Viewport {
        Viewport { pages }
    }

    #[test]
    fn fragment_selects_initial_chapter() {
        let mut nav = navigator(Some("#chapter=1.1"));
        assert_eq!(nav.current_chapter(), Some("1.1"));
        assert_eq!(nav.mode(), Mode::Idle);
        assert_eq!(
            nav.initial_effects(&registry()),
            vec![
                Effect::ScrollTo {
                    anchor: "chapter-1.1".into(),
                    behavior: ScrollBehavior::Instant,
                },
                Effect::Highlight("1.1".into()),
            ]
        );
    }

    #[test]
    fn unknown_fragment_falls_back_to_first_chapter() {
        let mut nav = navigator(Some("#chapter=9.9"));
        assert_eq!(nav.current_chapter(), Some("1.0"));
        assert_eq!(nav.initial_effects(&registry()), vec![Effect::Highlight("1.0".into())]);

        let nav = navigator(None);
        assert_eq!(nav.current_chapter(), Some("1.0"));
    }

    #[test]
    fn no_visible_chapters_means_no_selection() {
        let mut nav = Navigator::new(config(), Vec::new(), Some("#chapter=1.0"));
        assert_eq!(nav.current_chapter(), None);
        assert!(nav.initial_effects(&registry()).is_empty());
    }

    #[test]
    fn set_visible_drops_vanished_selection() {
        let mut nav = navigator(Some("#chapter=2.1"));
        nav.set_visible(vec!["1.0".into(), "2.1".into()]);
        assert_eq!(nav.current_chapter(), Some("2.1"));
        nav.set_visible(vec!["3.0".into()]);
        assert_eq!(nav.current_chapter(), Some("3.0"));
    }
}
