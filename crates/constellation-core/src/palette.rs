use crate::error::ThemeError;
use crate::math::wrap_degrees;
use crate::particle::{Particle, ParticleKind};
use std::fmt;
use std::str::FromStr;

/// Page theme. Only affects colors, never physics.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn parse(name: &str) -> Result<Self, ThemeError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(ThemeError(name.to_string())),
        }
    }

    /// Background used when the page does not provide one.
    pub fn fallback_background(self) -> &'static str {
        match self {
            Theme::Dark => "#0a0a10",
            Theme::Light => "#e9ecef",
        }
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::parse(s)
    }
}

/// A fill or stroke color, formatted as a CSS color string.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    Hsla { h: f32, s: f32, l: f32, a: f32 },
    Rgba { r: u8, g: u8, b: u8, a: f32 },
    /// Any CSS color string, passed through as-is.
    Css(String),
}

impl Color {
    pub fn alpha(&self) -> Option<f32> {
        match *self {
            Color::Hsla { a, .. } | Color::Rgba { a, .. } => Some(a),
            Color::Css(_) => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Hsla { h, s, l, a } => write!(f, "hsla({h}, {s}%, {l}%, {a})"),
            Color::Rgba { r, g, b, a } => write!(f, "rgba({r},{g},{b},{a})"),
            Color::Css(css) => f.write_str(css),
        }
    }
}

fn hsla(hue: f32, shift: f32, s: f32, l: f32, a: f32) -> Color {
    Color::Hsla {
        h: wrap_degrees(hue + shift),
        s,
        l,
        a,
    }
}

/// Disc color for a particle. Trails use a contrasting hue and fade out with life.
pub fn particle_color(particle: &Particle, theme: Theme) -> Color {
    let hue = particle.base_hue;
    match (particle.kind, theme) {
        (ParticleKind::Steady { .. }, Theme::Light) => hsla(hue, 0.0, 60.0, 55.0, 0.6),
        (ParticleKind::Steady { .. }, Theme::Dark) => hsla(hue, 180.0, 80.0, 65.0, 0.7),
        (ParticleKind::Trail { .. }, Theme::Light) => {
            hsla(hue, 30.0, 90.0, 65.0, particle.fade() * 0.8)
        }
        (ParticleKind::Trail { .. }, Theme::Dark) => hsla(hue, 210.0, 100.0, 75.0, particle.fade()),
    }
}

pub fn edge_color(theme: Theme, alpha: f32) -> Color {
    match theme {
        Theme::Light => Color::Rgba { r: 50, g: 50, b: 50, a: alpha },
        Theme::Dark => Color::Rgba { r: 200, g: 200, b: 255, a: alpha },
    }
}
