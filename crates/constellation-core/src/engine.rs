use crate::canvas::Canvas;
use crate::error::SurfaceError;
use crate::field::Field;
use crate::scheduler::{FrameHost, FrameScheduler, FrameTicket};

/// A field driven by a frame scheduler: one tick per honored frame callback.
pub struct Engine<H> {
    field: Field,
    scheduler: FrameScheduler<H>,
}

impl<H> Engine<H> {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            scheduler: FrameScheduler::new(),
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn scheduler(&self) -> &FrameScheduler<H> {
        &self.scheduler
    }

    pub fn start<F: FrameHost<Handle = H>>(&mut self, host: &mut F) -> Result<(), SurfaceError> {
        self.scheduler.start(host)
    }

    pub fn stop<F: FrameHost<Handle = H>>(&mut self, host: &mut F) {
        self.scheduler.stop(host);
    }

    /// Handle a fired frame callback. Runs a tick and schedules the next
    /// frame only if `ticket` belongs to the live run; returns whether it did.
    pub fn on_frame<F: FrameHost<Handle = H>>(
        &mut self,
        ticket: FrameTicket,
        host: &mut F,
        canvas: &mut dyn Canvas,
    ) -> Result<bool, SurfaceError> {
        if !self.scheduler.begin_frame(ticket) {
            return Ok(false);
        }
        self.field.tick(canvas);
        self.scheduler.finish_frame(host)?;
        Ok(true)
    }
}
