//! Render scheduling for the map canvas
//!
//! The map has no autonomous animation, so continuous redraws are only needed
//! while the pointer is over the canvas. Outside of that window a redraw is
//! requested once per structural change (tile added/removed, resize, load).

/// Host capability for asking the windowing layer for another frame
pub trait RedrawRequester {
    fn request_redraw(&self);
}

/// Decides when the canvas needs to be drawn
#[derive(Debug, Default)]
pub struct RenderScheduler {
    running: bool,
    pending: bool,
    renders: u64,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the hover-gated redraw loop
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop the hover-gated redraw loop
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a one-off render is waiting to be presented
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Schedule one render regardless of the loop state
    pub fn render(&mut self) {
        self.pending = true;
        self.renders += 1;
    }

    /// Number of explicit renders scheduled so far
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Called once per host frame. Requests another frame while the loop runs
    /// or a render is pending, and returns whether one was requested.
    pub fn frame(&mut self, requester: &dyn RedrawRequester) -> bool {
        let wanted = self.running || self.pending;
        self.pending = false;
        if wanted {
            requester.request_redraw();
        }
        wanted
    }
}
