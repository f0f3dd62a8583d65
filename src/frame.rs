//! Per-frame coalescing of scroll and resize work.
//!
//! Scroll events arrive far faster than the scroll-spy needs to run, and a
//! burst of resize events should trigger a single re-pagination. The gate
//! keeps at most one pending scroll position (latest wins) and one pending
//! layout pass; the host drains both once per animation frame with
//! [`FrameGate::take`].

use tracing::trace;

/// Work accumulated since the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameWork {
    /// Latest scroll offset reported during the frame.
    pub scroll: Option<f32>,
    pub layout: bool,
}

impl FrameWork {
    pub fn is_empty(&self) -> bool {
        self.scroll.is_none() && !self.layout
    }
}

#[derive(Debug, Clone, Default)]
pub struct FrameGate {
    pending_scroll: Option<f32>,
    pending_layout: bool,
    absorbed: u64,
}

impl FrameGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a scroll-spy evaluation. Returns `true` when this request
    /// schedules a new frame, `false` when it was absorbed by a pending one.
    pub fn request_scroll(&mut self, scroll_top: f32) -> bool {
        let scheduled = self.is_idle();
        if self.pending_scroll.replace(scroll_top).is_some() {
            self.absorbed += 1;
            trace!(scroll_top, "Scroll request coalesced");
        }
        scheduled
    }

    /// Queue a pagination pass. Same return contract as [`Self::request_scroll`].
    pub fn request_layout(&mut self) -> bool {
        let scheduled = self.is_idle();
        if self.pending_layout {
            self.absorbed += 1;
            trace!("Layout request coalesced");
        }
        self.pending_layout = true;
        scheduled
    }

    /// Drain pending work for this frame.
    pub fn take(&mut self) -> FrameWork {
        FrameWork {
            scroll: self.pending_scroll.take(),
            layout: std::mem::take(&mut self.pending_layout),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pending_scroll.is_none() && !self.pending_layout
    }

    /// Requests absorbed into an already-pending one since creation.
    pub fn absorbed(&self) -> u64 {
        self.absorbed
    }
}
