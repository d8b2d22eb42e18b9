use std::sync::Arc;

use log::debug;
use winit::window::Window;

/// Something that can deliver the next animation tick.
pub trait FrameScheduler {
    fn request_next_tick(&mut self);

    /// Stop delivering ticks, later requests are ignored.
    fn cancel(&mut self);
}

/// Ticks are winit redraw requests on the owning window.
pub struct RedrawScheduler {
    window: Arc<Window>,
    cancelled: bool,
}

impl RedrawScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            cancelled: false,
        }
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_next_tick(&mut self) {
        if !self.cancelled {
            self.window.request_redraw();
        }
    }

    fn cancel(&mut self) {
        debug!("Redraw scheduler cancelled");
        self.cancelled = true;
    }
}
