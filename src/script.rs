//! Replay of recorded navigation events against a built document.
//!
//! A script is one command per line; lines starting with `#` are comments. Scroll commands
//! are queued on a [`FrameGate`] like real scroll events and only reach the
//! navigator on the next `frame`. Programmatic scrolls (the `ScrollTo`
//! effect) move the simulated viewport and queue a scroll event too, the
//! way a browser reports them. `resize` changes the page height and
//! queues a pagination pass that runs on the next `frame`, once per frame.
//!
//! ```text
//! hash #chapter=1.1
//! scroll 2400
//! scroll 2500
//! resize 900
//! frame
//! hover 3.0
//! leave
//! click 2.0
//! ```

use crate::config::ViewerConfig;
use crate::document::Document;
use crate::frame::FrameGate;
use crate::layout::DocumentLayout;
use crate::nav::{Effect, NavEvent, NavigationState, Navigator};
use crate::pagination::Measure;
use anyhow::{Context, Result, bail};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Click(String),
    Hover(String),
    Leave,
    Hash(String),
    Panel,
    Close,
    Scroll(f32),
    Resize(f32),
    Frame,
}

impl ScriptCommand {
    fn parse(line: &str) -> Result<Self> {
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };
        let need_arg = |what: &str| -> Result<String> {
            if arg.is_empty() {
                bail!("`{verb}` needs {what}");
            }
            Ok(arg.to_string())
        };
        let command = match verb {
            "click" => ScriptCommand::Click(need_arg("a chapter id")?),
            "hover" => ScriptCommand::Hover(need_arg("a chapter id")?),
            "leave" => ScriptCommand::Leave,
            "hash" => ScriptCommand::Hash(need_arg("a fragment")?),
            "panel" => ScriptCommand::Panel,
            "close" => ScriptCommand::Close,
            "scroll" => {
                let raw = need_arg("a pixel offset")?;
                let offset: f32 = raw
                    .parse()
                    .with_context(|| format!("invalid scroll offset `{raw}`"))?;
                ScriptCommand::Scroll(offset)
            }
            "resize" => {
                let raw = need_arg("a page height")?;
                let height: f32 = raw
                    .parse()
                    .with_context(|| format!("invalid page height `{raw}`"))?;
                if height.is_nan() || height <= 0.0 {
                    bail!("page height must be positive, got `{raw}`");
                }
                ScriptCommand::Resize(height)
            }
            "frame" => ScriptCommand::Frame,
            other => bail!("unknown command `{other}`"),
        };
        Ok(command)
    }
}

/// Parse a script into commands tagged with their 1-based line numbers.
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_script(text: &str) -> Result<Vec<(usize, ScriptCommand)>> {
    let mut commands = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command = ScriptCommand::parse(line).with_context(|| format!("line {}", idx + 1))?;
        commands.push((idx + 1, command));
    }
    Ok(commands)
}

/// Effects produced by one script line.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayStep {
    pub line: usize,
    pub command: ScriptCommand,
    pub effects: Vec<Effect>,
}

/// Simulated host: viewport, address bar and highlight.
pub struct ReplaySession<'a> {
    document: Document,
    layout: DocumentLayout,
    measure: &'a dyn Measure,
    config: ViewerConfig,
    navigator: Navigator,
    gate: FrameGate,
    scroll_top: f32,
    fragment: Option<String>,
    highlighted: Option<String>,
    repaginations: usize,
}

impl<'a> ReplaySession<'a> {
    pub fn new(
        document: Document,
        measure: &'a dyn Measure,
        config: ViewerConfig,
        navigator: Navigator,
    ) -> Self {
        let layout = DocumentLayout::compute(&document, measure, &config);
        let mut session = ReplaySession {
            document,
            layout,
            measure,
            config,
            navigator,
            gate: FrameGate::new(),
            scroll_top: 0.0,
            fragment: None,
            highlighted: None,
            repaginations: 0,
        };
        let initial = session.navigator.initial_effects(&session.document.registry);
        session.apply(&initial);
        session
    }

    pub fn run(&mut self, commands: Vec<(usize, ScriptCommand)>) -> Vec<ReplayStep> {
        commands
            .into_iter()
            .map(|(line, command)| {
                let effects = self.step(&command);
                ReplayStep {
                    line,
                    command,
                    effects,
                }
            })
            .collect()
    }

    pub fn step(&mut self, command: &ScriptCommand) -> Vec<Effect> {
        let registry = &self.document.registry;
        let effects = match command {
            ScriptCommand::Click(id) => self.navigator.reduce(registry, NavEvent::MenuClick(id.clone())),
            ScriptCommand::Hover(id) => self.navigator.reduce(registry, NavEvent::MenuHover(id.clone())),
            ScriptCommand::Leave => self.navigator.reduce(registry, NavEvent::MenuLeave),
            ScriptCommand::Hash(raw) => {
                self.fragment = Some(raw.clone());
                self.navigator.reduce(registry, NavEvent::HashChange(raw.clone()))
            }
            ScriptCommand::Panel => self.navigator.reduce(registry, NavEvent::TogglePanel),
            ScriptCommand::Close => self.navigator.reduce(registry, NavEvent::ClosePanel),
            ScriptCommand::Scroll(offset) => {
                self.scroll_top = *offset;
                self.gate.request_scroll(*offset);
                Vec::new()
            }
            ScriptCommand::Resize(height) => {
                self.config.page_height_px = *height;
                self.gate.request_layout();
                Vec::new()
            }
            ScriptCommand::Frame => self.run_frame(),
        };
        self.apply(&effects);
        effects
    }

    /// Drain the frame gate: at most one pagination pass, then at most one
    /// scroll-spy evaluation at the latest offset.
    fn run_frame(&mut self) -> Vec<Effect> {
        let work = self.gate.take();
        if work.layout {
            self.relayout();
        }
        let Some(offset) = work.scroll else {
            return Vec::new();
        };
        let viewport = self.layout.viewport_at(offset);
        self.navigator
            .reduce(&self.document.registry, NavEvent::ScrollTick(viewport))
    }

    fn relayout(&mut self) {
        let budget = self.config.page_content_budget();
        self.document.repaginate(self.measure, &budget);
        self.layout = DocumentLayout::compute(&self.document, self.measure, &self.config);
        self.repaginations += 1;
        info!(
            page_height = self.config.page_height_px,
            pages = self.document.page_count(),
            "Applied resize"
        );
    }

    fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::ScrollTo { anchor, .. } => {
                    if let Some(offset) = self.layout.scroll_offset_for(anchor) {
                        self.scroll_top = offset;
                        self.gate.request_scroll(offset);
                    }
                }
                Effect::WriteFragment(fragment) => self.fragment = Some(fragment.clone()),
                Effect::Highlight(id) => self.highlighted = Some(id.clone()),
                Effect::SetPanelOpen(open) => debug!(open, "Panel visibility changed"),
            }
        }
    }

    pub fn state(&self) -> &NavigationState {
        self.navigator.state()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    /// Pagination passes run since the session started.
    pub fn repaginations(&self) -> usize {
        self.repaginations
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ChapterSection, ViewerStatus};
    use crate::manifest::{ChapterSpec, LayoutMode};
    use crate::nav::{NavConfig, pick_active_page};
    use crate::pagination::paginate;
    use crate::pagination::tests::{SyntheticHeights, nodes};
    use crate::registry::PageRegistry;

    fn heights() -> SyntheticHeights {
        SyntheticHeights(vec![60.0; 4])
    }

    /// Chapters 1.0 and 1.1 are paged with one 60px block per page. The last
    /// chapter, 2.0, uses `last_layout` with `last_blocks` blocks.
    fn document(last_layout: LayoutMode, last_blocks: usize) -> Document {
        let heights = heights();
        let mut registry = PageRegistry::new();
        let mut sections = Vec::new();
        for (id, layout, blocks) in [
            ("1.0", LayoutMode::Paged, 4),
            ("1.1", LayoutMode::Paged, 4),
            ("2.0", last_layout, last_blocks),
        ] {
            let mut spec = ChapterSpec::new(id, format!("{id}.md"));
            spec.layout = layout;
            let pages = paginate(&spec, nodes(blocks), &heights, &100.0_f32);
            registry.replace_chapter(id, &pages);
            sections.push(ChapterSection { spec, pages });
        }
        Document {
            chapters: sections.iter().map(|s| s.spec.clone()).collect(),
            sections,
            registry,
            diagnostics: Vec::new(),
            revision: String::new(),
            status: ViewerStatus::Ready,
        }
    }

    fn session<'a>(
        measure: &'a SyntheticHeights,
        document: Document,
        fragment: Option<&str>,
    ) -> ReplaySession<'a> {
        let config = ViewerConfig::default();
        let navigator = Navigator::new(NavConfig::from_config(&config), document.visible_ids(), fragment);
        ReplaySession::new(document, measure, config, navigator)
    }

    #[test]
    fn parses_commands_and_reports_bad_lines() {
        let commands =
            parse_script("# warm up\nhash #chapter=1.1\n\nscroll 120.5\nresize 900\nframe\nclick 2.0\n")
                .expect("script");
        assert_eq!(
            commands,
            vec![
                (2, ScriptCommand::Hash("#chapter=1.1".into())),
                (4, ScriptCommand::Scroll(120.5)),
                (5, ScriptCommand::Resize(900.0)),
                (6, ScriptCommand::Frame),
                (7, ScriptCommand::Click("2.0".into())),
            ]
        );

        let err = parse_script("frame\njump 3").expect_err("unknown verb");
        assert!(format!("{err:#}").contains("line 2"));
        assert!(parse_script("scroll far").is_err());
        assert!(parse_script("click").is_err());
        assert!(parse_script("resize 0").is_err());
        assert!(parse_script("resize NaN").is_err());
    }

    #[test]
    fn scroll_bursts_reach_the_navigator_once_per_frame() {
        let heights = heights();
        let mut session = session(&heights, document(LayoutMode::Paged, 4), None);
        let target = session.layout().scroll_offset_for("chapter-2.0").expect("anchor");

        assert!(session.step(&ScriptCommand::Scroll(10.0)).is_empty());
        assert!(session.step(&ScriptCommand::Scroll(target)).is_empty());
        let effects = session.step(&ScriptCommand::Frame);

        assert_eq!(session.state().current_chapter_id.as_deref(), Some("2.0"));
        assert_eq!(session.fragment(), Some("#chapter=2.0"));
        assert_eq!(session.highlighted(), Some("2.0"));
        assert!(effects.iter().all(|e| !matches!(e, Effect::ScrollTo { .. })));
        assert!(session.step(&ScriptCommand::Frame).is_empty());
    }

    #[test]
    fn click_scroll_settles_without_feedback() {
        let heights = heights();
        let mut session = session(&heights, document(LayoutMode::Paged, 4), None);

        session.step(&ScriptCommand::Click("1.1".into()));
        let expected = session.layout().scroll_offset_for("chapter-1.1").expect("anchor");
        assert_eq!(session.scroll_top(), expected);
        assert!(session.step(&ScriptCommand::Frame).is_empty());

        let echo = session.step(&ScriptCommand::Hash("#chapter=1.1".into()));
        assert!(echo.is_empty());
        assert_eq!(session.state().current_chapter_id.as_deref(), Some("1.1"));
    }

    #[test]
    fn click_on_short_last_chapter_survives_clamped_scroll() {
        let heights = heights();
        let mut session = session(&heights, document(LayoutMode::Default, 1), None);

        let click = session.step(&ScriptCommand::Click("2.0".into()));
        assert!(click.contains(&Effect::WriteFragment("#chapter=2.0".into())));

        // The scroll is clamped at the bottom, so 1.1 sits under the line.
        let line = NavConfig::from_config(&ViewerConfig::default()).anchor_line_px;
        let viewport = session.layout().viewport_at(session.scroll_top());
        let under_line = pick_active_page(&viewport.pages, line).map(|p| p.chapter_id.clone());
        assert_eq!(under_line.as_deref(), Some("1.1"));

        assert!(session.step(&ScriptCommand::Frame).is_empty());
        assert_eq!(session.state().current_chapter_id.as_deref(), Some("2.0"));
        assert_eq!(session.fragment(), Some("#chapter=2.0"));
        assert_eq!(session.highlighted(), Some("2.0"));

        // A reader scroll afterwards is tracked again.
        session.step(&ScriptCommand::Scroll(0.0));
        session.step(&ScriptCommand::Frame);
        assert_eq!(session.state().current_chapter_id.as_deref(), Some("1.0"));
    }

    #[test]
    fn hover_scroll_does_not_commit() {
        let heights = heights();
        let mut session = session(&heights, document(LayoutMode::Paged, 4), Some("#chapter=1.1"));
        assert_eq!(session.highlighted(), Some("1.1"));

        let steps = session.run(vec![
            (1, ScriptCommand::Hover("2.0".into())),
            (2, ScriptCommand::Frame),
            (3, ScriptCommand::Leave),
            (4, ScriptCommand::Frame),
        ]);
        assert!(steps.iter().all(|s| s.effects.iter().all(|e| matches!(e, Effect::ScrollTo { .. }))));
        assert_eq!(session.state().current_chapter_id.as_deref(), Some("1.1"));
        assert_eq!(session.highlighted(), Some("1.1"));
    }

    #[test]
    fn resize_burst_repaginates_once_per_frame() {
        let heights = heights();
        let mut session = session(&heights, document(LayoutMode::Paged, 4), None);
        assert_eq!(session.document().page_count(), 12);

        assert!(session.step(&ScriptCommand::Resize(500.0)).is_empty());
        assert!(session.step(&ScriptCommand::Resize(300.0)).is_empty());
        assert_eq!(session.repaginations(), 0);

        session.step(&ScriptCommand::Frame);
        assert_eq!(session.repaginations(), 1);
        // 300px pages leave a 148px budget: two 60px blocks per page.
        assert_eq!(session.document().page_count(), 6);
        assert_eq!(session.document().registry.anchors_for("1.1").len(), 2);
        assert!(session.layout().rects().iter().all(|r| r.height == 300.0));

        session.step(&ScriptCommand::Frame);
        assert_eq!(session.repaginations(), 1);
    }
}
