//! Vertical placement of page containers in the scrollable document.
//!
//! Paged chapters use the fixed page height; default chapters grow with
//! their content. The resulting rects are what the scroll-spy sees.

use crate::config::ViewerConfig;
use crate::document::Document;
use crate::manifest::LayoutMode;
use crate::pagination::Measure;

/// Vertical gap between consecutive page containers.
pub const PAGE_GAP_PX: f32 = 24.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PageRect {
    pub anchor_id: String,
    pub chapter_id: String,
    pub top: f32,
    pub height: f32,
}

impl PageRect {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Page rects relative to the top edge of the visible area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewport {
    pub pages: Vec<PageRect>,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    rects: Vec<PageRect>,
    total_height: f32,
    header_height_px: f32,
    viewport_height_px: f32,
}

impl DocumentLayout {
    pub fn compute<M>(document: &Document, measure: &M, config: &ViewerConfig) -> Self
    where
        M: Measure + ?Sized,
    {
        let padding = config.page_padding_vertical_px.max(0.0);
        let mut rects = Vec::with_capacity(document.page_count());
        let mut cursor = config.header_height_px.max(0.0);

        for section in &document.sections {
            for page in &section.pages {
                let height = match page.layout {
                    LayoutMode::Paged => config.page_height_px,
                    LayoutMode::Default => measure.measure(&page.nodes) + 2.0 * padding,
                };
                rects.push(PageRect {
                    anchor_id: page.anchor_id(),
                    chapter_id: page.chapter_id.clone(),
                    top: cursor,
                    height,
                });
                cursor += height.max(0.0) + PAGE_GAP_PX;
            }
        }

        DocumentLayout {
            rects,
            total_height: cursor,
            header_height_px: config.header_height_px.max(0.0),
            viewport_height_px: config.page_height_px.max(1.0),
        }
    }

    pub fn rects(&self) -> &[PageRect] {
        &self.rects
    }

    pub fn total_height(&self) -> f32 {
        self.total_height
    }

    fn max_scroll(&self) -> f32 {
        (self.total_height - self.viewport_height_px).max(0.0)
    }

    /// Page rects as seen with the document scrolled to `scroll_top`.
    pub fn viewport_at(&self, scroll_top: f32) -> Viewport {
        let scroll_top = scroll_top.clamp(0.0, self.max_scroll());
        Viewport {
            pages: self
                .rects
                .iter()
                .map(|rect| PageRect {
                    top: rect.top - scroll_top,
                    ..rect.clone()
                })
                .collect(),
        }
    }

    /// Scroll offset that brings `anchor_id` just below the sticky header.
    pub fn scroll_offset_for(&self, anchor_id: &str) -> Option<f32> {
        self.rects
            .iter()
            .find(|rect| rect.anchor_id == anchor_id)
            .map(|rect| (rect.top - self.header_height_px).clamp(0.0, self.max_scroll()))
    }
}
