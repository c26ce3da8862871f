#![allow(dead_code)]

use constellation_core::canvas::Canvas;
use constellation_core::error::SurfaceError;
use constellation_core::palette::Color;
use constellation_core::particle::Particle;
use constellation_core::scheduler::{FrameHost, FrameTicket};
use glam::Vec2;

// ---------------------------------------------------------------------------
// Recording canvas
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Background { color: String, size: Vec2 },
    Circle { center: Vec2, radius: f32, color: String },
    Line { from: Vec2, to: Vec2, width: f32, color: String },
}

#[derive(Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn circles(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Circle { .. })).count()
    }

    pub fn lines(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. })).count()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_background(&mut self, color: &Color, size: Vec2) {
        self.ops.push(DrawOp::Background {
            color: color.to_string(),
            size,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &Color) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: &Color) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            width,
            color: color.to_string(),
        });
    }
}

// ---------------------------------------------------------------------------
// Mock frame host
// ---------------------------------------------------------------------------

/// Records every request; the test decides when a "frame" fires.
#[derive(Default)]
pub struct MockHost {
    pub requested: Vec<FrameTicket>,
    pub cancelled: Vec<usize>,
    pub fail_next: bool,
}

impl MockHost {
    /// Ticket of the most recent request.
    pub fn last_ticket(&self) -> FrameTicket {
        *self.requested.last().expect("no frame was requested")
    }
}

impl FrameHost for MockHost {
    type Handle = usize;

    fn request_frame(&mut self, ticket: FrameTicket) -> Result<usize, SurfaceError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(SurfaceError::Registration("mock".into()));
        }
        self.requested.push(ticket);
        Ok(self.requested.len() - 1)
    }

    fn cancel_frame(&mut self, handle: usize) {
        self.cancelled.push(handle);
    }
}

// ---------------------------------------------------------------------------
// Particle helpers
// ---------------------------------------------------------------------------

pub fn steady_at(x: f32, y: f32) -> Particle {
    Particle::steady(Vec2::new(x, y), 1.0, 10.0, 0.0)
}

pub fn trail_at(x: f32, y: f32) -> Particle {
    Particle::trail(Vec2::new(x, y), 2.0, 10.0, 60, 0.0)
}
