use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use tracing::{debug, warn};

/// Coarse classification of a top-level block, used for height estimation
/// and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    List,
    Code,
    Table,
    Quote,
    Image,
    Rule,
    Html,
}

/// One top-level HTML block of a chapter. Pagination moves whole nodes
/// between pages and never looks inside them.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentNode {
    /// Position within the chapter's node sequence.
    pub ordinal: usize,
    pub kind: BlockKind,
    pub html: String,
    /// Plain-text rendering without hard wrapping.
    pub text: String,
}

/// Render Markdown into top-level blocks, in document order.
pub fn render_blocks(markdown: &str) -> Vec<ContentNode> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES;

    let mut nodes = Vec::new();
    let mut pending: Vec<Event<'_>> = Vec::new();
    let mut kind = BlockKind::Html;
    let mut depth = 0usize;

    for event in Parser::new_ext(markdown, options) {
        let closes_block = match &event {
            Event::Start(tag) => {
                if depth == 0 {
                    kind = block_kind(tag);
                }
                depth += 1;
                false
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                depth == 0
            }
            standalone if depth == 0 => {
                kind = if matches!(standalone, Event::Rule) {
                    BlockKind::Rule
                } else {
                    BlockKind::Html
                };
                true
            }
            _ => false,
        };
        pending.push(event);
        if closes_block {
            flush_block(&mut nodes, &mut pending, kind);
        }
    }

    if !pending.is_empty() {
        warn!(events = pending.len(), "Unbalanced Markdown events at end of chapter");
        flush_block(&mut nodes, &mut pending, kind);
    }

    debug!(blocks = nodes.len(), "Rendered Markdown blocks");
    nodes
}

fn flush_block(nodes: &mut Vec<ContentNode>, pending: &mut Vec<Event<'_>>, kind: BlockKind) {
    let kind = if kind == BlockKind::Paragraph && is_image_only(pending) {
        BlockKind::Image
    } else {
        kind
    };

    let mut markup = String::new();
    html::push_html(&mut markup, pending.drain(..));

    // Very large width so the text carries no hard wraps; measurement wraps it.
    let text = match html2text::from_read(markup.as_bytes(), 10_000) {
        Ok(plain) => plain.trim_end().to_string(),
        Err(err) => {
            warn!(ordinal = nodes.len(), "html2text failed: {err}");
            markup.clone()
        }
    };

    nodes.push(ContentNode {
        ordinal: nodes.len(),
        kind,
        html: markup,
        text,
    });
}

fn block_kind(tag: &Tag<'_>) -> BlockKind {
    match tag {
        Tag::Heading { level, .. } => BlockKind::Heading(heading_rank(*level)),
        Tag::Paragraph | Tag::FootnoteDefinition(_) => BlockKind::Paragraph,
        Tag::List(_) => BlockKind::List,
        Tag::CodeBlock(_) => BlockKind::Code,
        Tag::Table(_) => BlockKind::Table,
        Tag::BlockQuote(_) => BlockKind::Quote,
        _ => BlockKind::Html,
    }
}

fn heading_rank(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn is_image_only(events: &[Event<'_>]) -> bool {
    let mut images = 0usize;
    let mut inside = 0usize;
    for event in events {
        match event {
            Event::Start(Tag::Image { .. }) => {
                images += 1;
                inside += 1;
            }
            Event::End(TagEnd::Image) => inside = inside.saturating_sub(1),
            Event::Text(text) | Event::Code(text) if inside == 0 && !text.trim().is_empty() => {
                return false;
            }
            _ => {}
        }
    }
    images > 0
}
