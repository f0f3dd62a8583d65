use super::fragment::parse_fragment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    /// A hovered menu entry has temporarily moved the view.
    PreviewActive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub current_chapter_id: Option<String>,
    pub pending_hover_chapter_id: Option<String>,
    pub panel_open: bool,
    /// Anchor of the last programmatic scroll. The next scroll tick is that
    /// scroll settling and is not read as the reader's position.
    pub pending_scroll_target: Option<String>,
}

impl NavigationState {
    /// The fragment's chapter when it names a visible one, else the first
    /// visible chapter.
    pub fn initial(visible_ids: &[String], fragment: Option<&str>, key: &str) -> Self {
        let requested = fragment
            .and_then(|raw| parse_fragment(raw, key))
            .filter(|id| visible_ids.contains(id));
        NavigationState {
            current_chapter_id: requested.or_else(|| visible_ids.first().cloned()),
            pending_hover_chapter_id: None,
            panel_open: false,
            pending_scroll_target: None,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.pending_hover_chapter_id.is_some() {
            Mode::PreviewActive
        } else {
            Mode::Idle
        }
    }

    pub fn is_current(&self, chapter_id: &str) -> bool {
        self.current_chapter_id.as_deref() == Some(chapter_id)
    }
}
