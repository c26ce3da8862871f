//! Error types for the particle field.
//!
//! None of these are fatal: the browser binding logs them and keeps running
//! with the previous state or a no-op handle.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must be a non-negative finite number, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must lie in (0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown theme '{0}', expected 'light' or 'dark'")]
pub struct ThemeError(pub String);

/// Failures acquiring the drawing surface or the frame callback.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("canvas element #{0} not found")]
    MissingCanvas(String),

    #[error("element #{0} is not a canvas")]
    NotACanvas(String),

    #[error("2d rendering context unavailable")]
    MissingContext,

    #[error("no window object available")]
    MissingWindow,

    #[error("failed to register {0}")]
    Registration(String),
}
