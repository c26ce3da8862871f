//! Pointer-reactive 2D particle field: steady particles sprung to their
//! origins and linked by proximity edges, plus short-lived pointer trails.

pub mod canvas;
pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod forces;
pub mod grid;
pub mod math;
pub mod palette;
pub mod particle;
pub mod population;
pub mod render;
pub mod scheduler;
