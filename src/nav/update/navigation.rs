use super::super::Navigator;
use super::super::fragment::format_fragment;
use super::{Effect, Origin, ScrollBehavior};
use crate::registry::PageRegistry;
use tracing::{debug, info};

impl Navigator {
    pub(super) fn handle_select(
        &mut self,
        registry: &PageRegistry,
        chapter_id: &str,
        origin: Origin,
        effects: &mut Vec<Effect>,
    ) {
        if !self.is_visible(chapter_id) {
            debug!(chapter = chapter_id, ?origin, "Ignoring selection of unknown chapter");
            return;
        }

        match origin {
            Origin::Menu => {
                self.commit(chapter_id, effects);
                self.push_scroll(registry, chapter_id, ScrollBehavior::Smooth, effects);
                if self.state.panel_open {
                    self.state.panel_open = false;
                    effects.push(Effect::SetPanelOpen(false));
                }
            }
            Origin::Hash => {
                if self.state.is_current(chapter_id) {
                    return;
                }
                self.commit(chapter_id, effects);
                self.push_scroll(registry, chapter_id, ScrollBehavior::Instant, effects);
            }
            Origin::ScrollSpy => {
                if self.state.is_current(chapter_id) {
                    return;
                }
                self.commit(chapter_id, effects);
            }
        }
        info!(chapter = chapter_id, ?origin, "Selected chapter");
    }

    /// Make `chapter_id` current: drop any preview, write the fragment and
    /// move the highlight.
    fn commit(&mut self, chapter_id: &str, effects: &mut Vec<Effect>) {
        self.state.current_chapter_id = Some(chapter_id.to_string());
        self.state.pending_hover_chapter_id = None;
        effects.push(Effect::WriteFragment(format_fragment(
            &self.config.fragment_key,
            chapter_id,
        )));
        effects.push(Effect::Highlight(chapter_id.to_string()));
    }

    /// Scroll to the chapter's first page and remember the target. Chapters
    /// that failed to load have no anchor, so nothing moves.
    pub(in crate::nav) fn push_scroll(
        &mut self,
        registry: &PageRegistry,
        chapter_id: &str,
        behavior: ScrollBehavior,
        effects: &mut Vec<Effect>,
    ) {
        match registry.first_anchor(chapter_id) {
            Some(anchor) => {
                self.state.pending_scroll_target = Some(anchor.id.clone());
                effects.push(Effect::ScrollTo {
                    anchor: anchor.id.clone(),
                    behavior,
                });
            }
            None => debug!(chapter = chapter_id, "No page anchor; not scrolling"),
        }
    }
}
