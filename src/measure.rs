//! Height estimation for content blocks.
//!
//! Without a live layout engine we approximate the rendered height of a block
//! from its plain text: wrap it to the configured content width using an
//! average glyph width, multiply by the line height and add the spacing
//! between blocks. Each block is estimated on its own and a page's height is
//! the sum, which keeps the estimate monotonic as blocks are appended.

use crate::config::ViewerConfig;
use crate::content::{BlockKind, ContentNode};
use crate::pagination::Measure;

/// Average advance of a proportional glyph relative to the font size.
const PROPORTIONAL_GLYPH_RATIO: f32 = 0.52;
const MONOSPACE_GLYPH_RATIO: f32 = 0.6;
const RULE_HEIGHT_PX: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct TextMeasure {
    content_width_px: f32,
    font_size_px: f32,
    line_height: f32,
    block_spacing_px: f32,
    image_height_px: f32,
}

impl TextMeasure {
    pub fn from_config(config: &ViewerConfig) -> Self {
        TextMeasure {
            content_width_px: config.content_width_px.max(1.0),
            font_size_px: config.font_size_px.max(1.0),
            line_height: config.line_height.max(0.8),
            block_spacing_px: config.block_spacing_px.max(0.0),
            image_height_px: config.image_height_px.max(0.0),
        }
    }

    /// Estimated height of a single block including its trailing spacing.
    pub fn node_height(&self, node: &ContentNode) -> f32 {
        match node.kind {
            BlockKind::Image => self.image_height_px + self.block_spacing_px,
            BlockKind::Rule => RULE_HEIGHT_PX + self.block_spacing_px,
            kind => {
                let scale = font_scale(kind);
                let glyph_ratio = if kind == BlockKind::Code {
                    MONOSPACE_GLYPH_RATIO
                } else {
                    PROPORTIONAL_GLYPH_RATIO
                };
                let font_px = self.font_size_px * scale;
                let columns = (self.content_width_px / (font_px * glyph_ratio)).max(8.0);
                let lines = wrapped_lines(&node.text, columns);
                lines as f32 * font_px * self.line_height + self.block_spacing_px
            }
        }
    }
}

impl Measure for TextMeasure {
    fn measure(&self, nodes: &[ContentNode]) -> f32 {
        nodes.iter().map(|node| self.node_height(node)).sum()
    }
}

fn font_scale(kind: BlockKind) -> f32 {
    match kind {
        BlockKind::Heading(1) => 2.0,
        BlockKind::Heading(2) => 1.5,
        BlockKind::Heading(3) => 1.25,
        BlockKind::Heading(_) => 1.1,
        BlockKind::Code => 0.9,
        _ => 1.0,
    }
}

/// Count display lines after soft-wrapping each hard line to `columns`.
fn wrapped_lines(text: &str, columns: f32) -> usize {
    let columns = columns.floor().max(1.0) as usize;
    let mut total = 0usize;
    for line in text.lines() {
        let width = line.chars().count();
        total += width.div_ceil(columns).max(1);
    }
    total.max(1)
}
