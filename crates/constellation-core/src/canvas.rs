use crate::palette::Color;
use glam::Vec2;

/// Immediate-mode 2D drawing surface the renderer paints into.
///
/// The browser binding implements this over `CanvasRenderingContext2d`;
/// tests use recording implementations.
pub trait Canvas {
    /// Opaquely fill the whole `size` area, overwriting the previous frame.
    fn fill_background(&mut self, color: &Color, size: Vec2);

    /// Filled disc.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &Color);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: &Color);
}

/// Canvas that discards everything. Runs the simulation without a surface.
#[derive(Default, Debug, Clone, Copy)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn fill_background(&mut self, _color: &Color, _size: Vec2) {}

    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: &Color) {}

    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: &Color) {}
}
