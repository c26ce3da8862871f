use constellation_core::error::SurfaceError;
use constellation_core::scheduler::{FrameHost, FrameTicket};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// `requestAnimationFrame`-backed frame host.
///
/// One persistent callback is reused for every frame; the ticket for the
/// outstanding request is parked here until the callback claims it.
pub struct RafHost {
    window: Window,
    callback: Option<Closure<dyn FnMut(f64)>>,
    pending_ticket: Option<FrameTicket>,
}

impl RafHost {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
            pending_ticket: None,
        }
    }

    pub fn set_callback(&mut self, callback: Closure<dyn FnMut(f64)>) {
        self.callback = Some(callback);
    }

    /// Claim the ticket of the request that just fired.
    pub fn take_ticket(&mut self) -> Option<FrameTicket> {
        self.pending_ticket.take()
    }
}

impl FrameHost for RafHost {
    type Handle = i32;

    fn request_frame(&mut self, ticket: FrameTicket) -> Result<i32, SurfaceError> {
        let callback = self
            .callback
            .as_ref()
            .ok_or_else(|| SurfaceError::Registration("animation frame callback".into()))?;
        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|_| SurfaceError::Registration("requestAnimationFrame".into()))?;
        self.pending_ticket = Some(ticket);
        Ok(id)
    }

    fn cancel_frame(&mut self, handle: i32) {
        let _ = self.window.cancel_animation_frame(handle);
        self.pending_ticket = None;
    }
}
