use constellation_core::canvas::Canvas;
use constellation_core::error::SurfaceError;
use constellation_core::palette::Color;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

/// CSS custom property the page sets to the current theme's canvas background.
const BACKGROUND_PROPERTY: &str = "--current-canvas-bg";

/// `<canvas>` element plus its 2D context.
pub struct Surface {
    element: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Surface {
    pub fn find(window: &Window, canvas_id: &str) -> Result<Self, SurfaceError> {
        let document = window.document().ok_or(SurfaceError::MissingWindow)?;
        let element = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SurfaceError::MissingCanvas(canvas_id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::NotACanvas(canvas_id.to_string()))?;
        let ctx = element
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(SurfaceError::MissingContext)?;
        Ok(Self { element, ctx })
    }

    /// Match the canvas to the window's inner size and return that size.
    pub fn fit_to_window(&self, window: &Window) -> Vec2 {
        let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0)
        };
        let width = dim(window.inner_width());
        let height = dim(window.inner_height());
        self.element.set_width(width as u32);
        self.element.set_height(height as u32);
        Vec2::new(width as f32, height as f32)
    }
}

/// Read the page's canvas background color, if it defines one.
pub fn page_background(window: &Window) -> Option<String> {
    let root = window.document()?.document_element()?;
    let style = window.get_computed_style(&root).ok().flatten()?;
    let value = style.get_property_value(BACKGROUND_PROPERTY).ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl Canvas for Surface {
    fn fill_background(&mut self, color: &Color, size: Vec2) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &Color) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.begin_path();
        // arc only fails on a negative radius, which particles never have
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: &Color) {
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}
