mod navigation;
mod preview;
mod reducer;
mod scroll;

pub use scroll::pick_active_page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Describes work the host performs after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScrollTo {
        anchor: String,
        behavior: ScrollBehavior,
    },
    WriteFragment(String),
    Highlight(String),
    SetPanelOpen(bool),
}

/// What caused a chapter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Menu,
    Hash,
    ScrollSpy,
}
