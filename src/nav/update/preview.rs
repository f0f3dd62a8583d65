use super::super::Navigator;
use super::{Effect, ScrollBehavior};
use crate::registry::PageRegistry;
use tracing::debug;

impl Navigator {
    pub(super) fn handle_preview(
        &mut self,
        registry: &PageRegistry,
        chapter_id: &str,
        effects: &mut Vec<Effect>,
    ) {
        if !self.is_visible(chapter_id) {
            return;
        }
        self.state.pending_hover_chapter_id = Some(chapter_id.to_string());
        self.push_scroll(registry, chapter_id, ScrollBehavior::Instant, effects);
        debug!(chapter = chapter_id, "Previewing chapter");
    }

    pub(super) fn handle_cancel_preview(
        &mut self,
        registry: &PageRegistry,
        effects: &mut Vec<Effect>,
    ) {
        if self.state.pending_hover_chapter_id.take().is_none() {
            return;
        }
        if let Some(current) = self.state.current_chapter_id.clone() {
            self.push_scroll(registry, &current, ScrollBehavior::Instant, effects);
        }
        debug!("Preview cancelled");
    }

    pub(super) fn handle_toggle_panel(
        &mut self,
        registry: &PageRegistry,
        effects: &mut Vec<Effect>,
    ) {
        if self.state.panel_open {
            self.handle_close_panel(registry, effects);
        } else {
            self.state.panel_open = true;
            effects.push(Effect::SetPanelOpen(true));
        }
    }

    pub(super) fn handle_close_panel(
        &mut self,
        registry: &PageRegistry,
        effects: &mut Vec<Effect>,
    ) {
        if self.state.panel_open {
            self.state.panel_open = false;
            effects.push(Effect::SetPanelOpen(false));
        }
        self.handle_cancel_preview(registry, effects);
    }
}
