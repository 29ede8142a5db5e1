//! The winit-backed frame clock.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use winit::window::Window;

use veld_viewport::{FrameClock, FrameRequest, frame_request_from_id};

/// Frame clock driving the viewport from the window's redraw cycle.
///
/// `request` maps to [`Window::request_redraw`]. winit cannot retract a
/// requested redraw, so `cancel` only drops the handle; the viewport's
/// lifecycle guard turns the late `RedrawRequested` into a no-op.
#[derive(Clone)]
pub struct WinitFrameClock {
    window: Arc<Window>,
    next_id: Rc<Cell<u64>>,
}

impl WinitFrameClock {
    /// Create a clock for the given window.
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_id: Rc::new(Cell::new(0)),
        }
    }
}

impl FrameClock for WinitFrameClock {
    fn request(&self) -> FrameRequest {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.window.request_redraw();
        frame_request_from_id(id)
    }

    fn cancel(&self, _request: FrameRequest) {
        // Nothing to retract; the viewport's state check covers the
        // already-scheduled redraw.
    }
}
