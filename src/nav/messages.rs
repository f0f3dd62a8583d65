use crate::layout::Viewport;

/// Inputs to the navigation synchronizer.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    MenuClick(String),
    MenuHover(String),
    MenuLeave,
    ScrollTick(Viewport),
    /// Raw fragment as found in the address bar, with or without `#`.
    HashChange(String),
    TogglePanel,
    ClosePanel,
}
