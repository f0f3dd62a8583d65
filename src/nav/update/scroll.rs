use super::super::Navigator;
use super::{Effect, Origin};
use crate::layout::{PageRect, Viewport};
use crate::registry::PageRegistry;
use tracing::trace;

impl Navigator {
    pub(super) fn handle_scroll(
        &mut self,
        registry: &PageRegistry,
        viewport: &Viewport,
        effects: &mut Vec<Effect>,
    ) {
        if let Some(target) = self.state.pending_scroll_target.take() {
            trace!(%target, "Programmatic scroll settled; scroll-spy skipped");
            return;
        }
        if self.state.pending_hover_chapter_id.is_some() {
            trace!("Scroll-spy suppressed during preview");
            return;
        }
        let Some(page) = pick_active_page(&viewport.pages, self.config.anchor_line_px) else {
            return;
        };
        let Some(chapter_id) = registry.chapter_for_page(&page.anchor_id) else {
            trace!(anchor = %page.anchor_id, "Scrolled page is not registered");
            return;
        };
        if !self.state.is_current(chapter_id) {
            self.handle_select(registry, chapter_id, Origin::ScrollSpy, effects);
        }
    }
}

/// The page that owns the anchor line `line` (viewport coordinates).
///
/// A page spanning the line wins. Past the end of the document the last page
/// wins; otherwise the page whose top edge is closest to the line. Pages
/// without positive height are ignored.
pub fn pick_active_page(pages: &[PageRect], line: f32) -> Option<&PageRect> {
    let mut candidates = pages
        .iter()
        .filter(|page| page.height > 0.0 && page.top.is_finite())
        .peekable();
    candidates.peek()?;

    let mut nearest: Option<(&PageRect, f32)> = None;
    let mut last = None;
    let mut all_above = true;
    for page in candidates {
        if page.top <= line && line <= page.bottom() {
            return Some(page);
        }
        if page.bottom() >= line {
            all_above = false;
        }
        let distance = (page.top - line).abs();
        if nearest.is_none_or(|(_, best)| distance < best) {
            nearest = Some((page, distance));
        }
        last = Some(page);
    }

    if all_above {
        last
    } else {
        nearest.map(|(page, _)| page)
    }
}
