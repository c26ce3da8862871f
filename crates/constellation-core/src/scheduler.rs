//! Frame loop state machine.
//!
//! The platform callback (`requestAnimationFrame` in the browser) is hidden
//! behind [`FrameHost`]. Every request carries a [`FrameTicket`]; a ticket is
//! only honored if it belongs to the current run, so a callback queued before
//! `stop()` or before a restart never runs a pass.

use crate::error::SurfaceError;

/// Identifies the run a frame request belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct FrameTicket {
    generation: u64,
}

/// Platform side of the loop: schedules and cancels one display-refresh callback.
pub trait FrameHost {
    /// Platform handle used to cancel a pending request.
    type Handle;

    /// Schedule one callback that will hand `ticket` back to the scheduler.
    fn request_frame(&mut self, ticket: FrameTicket) -> Result<Self::Handle, SurfaceError>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SchedulerState {
    Stopped,
    Running,
}

pub struct FrameScheduler<H> {
    state: SchedulerState,
    generation: u64,
    pending: Option<H>,
    frames: u64,
}

impl<H> Default for FrameScheduler<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> FrameScheduler<H> {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Stopped,
            generation: 0,
            pending: None,
            frames: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Passes run since creation.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Start (or restart) the loop and schedule the first frame.
    ///
    /// Any pending request from a previous run is cancelled and its ticket
    /// invalidated, so at most one loop is ever live.
    pub fn start<F>(&mut self, host: &mut F) -> Result<(), SurfaceError>
    where
        F: FrameHost<Handle = H>,
    {
        self.cancel_pending(host);
        self.generation += 1;
        self.state = SchedulerState::Running;
        self.schedule(host)
    }

    /// Stop the loop. Idempotent; leaves nothing scheduled.
    pub fn stop<F>(&mut self, host: &mut F)
    where
        F: FrameHost<Handle = H>,
    {
        self.cancel_pending(host);
        if self.state == SchedulerState::Running {
            self.generation += 1;
        }
        self.state = SchedulerState::Stopped;
    }

    /// Called when a scheduled callback fires. Returns whether a pass may run.
    pub fn begin_frame(&mut self, ticket: FrameTicket) -> bool {
        if self.state != SchedulerState::Running || ticket.generation != self.generation {
            return false;
        }
        // The request this ticket came from has been consumed.
        self.pending = None;
        self.frames += 1;
        true
    }

    /// Schedule the next frame after a pass has run.
    pub fn finish_frame<F>(&mut self, host: &mut F) -> Result<(), SurfaceError>
    where
        F: FrameHost<Handle = H>,
    {
        if self.state != SchedulerState::Running || self.pending.is_some() {
            return Ok(());
        }
        self.schedule(host)
    }

    fn schedule<F>(&mut self, host: &mut F) -> Result<(), SurfaceError>
    where
        F: FrameHost<Handle = H>,
    {
        let ticket = FrameTicket {
            generation: self.generation,
        };
        match host.request_frame(ticket) {
            Ok(handle) => {
                self.pending = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.state = SchedulerState::Stopped;
                Err(err)
            }
        }
    }

    fn cancel_pending<F>(&mut self, host: &mut F)
    where
        F: FrameHost<Handle = H>,
    {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
    }
}
