use super::super::fragment::parse_fragment;
use super::super::{NavEvent, NavigationState, Navigator};
use super::{Effect, Origin};
use crate::layout::Viewport;
use crate::registry::PageRegistry;

impl Navigator {
    pub fn reduce(&mut self, registry: &PageRegistry, event: NavEvent) -> Vec<Effect> {
        let mut effects = Vec::new();

        match event {
            NavEvent::MenuClick(id) => self.handle_select(registry, &id, Origin::Menu, &mut effects),
            NavEvent::MenuHover(id) => self.handle_preview(registry, &id, &mut effects),
            NavEvent::MenuLeave => self.handle_cancel_preview(registry, &mut effects),
            NavEvent::ScrollTick(viewport) => self.handle_scroll(registry, &viewport, &mut effects),
            NavEvent::HashChange(raw) => {
                if let Some(id) = parse_fragment(&raw, &self.config.fragment_key) {
                    self.handle_select(registry, &id, Origin::Hash, &mut effects);
                }
            }
            NavEvent::TogglePanel => self.handle_toggle_panel(registry, &mut effects),
            NavEvent::ClosePanel => self.handle_close_panel(registry, &mut effects),
        }

        effects
    }

    /// Pure form of [`Self::reduce`]: the next state and its effects, with
    /// `self` left untouched.
    pub fn transition(
        &self,
        registry: &PageRegistry,
        event: NavEvent,
    ) -> (NavigationState, Vec<Effect>) {
        let mut next = self.clone();
        let effects = next.reduce(registry, event);
        (next.state, effects)
    }

    pub fn select_chapter(
        &mut self,
        registry: &PageRegistry,
        chapter_id: &str,
        origin: Origin,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.handle_select(registry, chapter_id, origin, &mut effects);
        effects
    }

    pub fn preview_chapter(&mut self, registry: &PageRegistry, chapter_id: &str) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.handle_preview(registry, chapter_id, &mut effects);
        effects
    }

    pub fn cancel_preview(&mut self, registry: &PageRegistry) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.handle_cancel_preview(registry, &mut effects);
        effects
    }

    pub fn on_scroll(&mut self, registry: &PageRegistry, viewport: &Viewport) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.handle_scroll(registry, viewport, &mut effects);
        effects
    }

    pub fn close_panel(&mut self, registry: &PageRegistry) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.handle_close_panel(registry, &mut effects);
        effects
    }
}
