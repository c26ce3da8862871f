use crate::error::ConfigError;

/// How connection-edge candidates are found each tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EdgeStrategy {
    /// Compare every unordered pair of steady particles.
    Pairwise,
    /// Bucket steady particles into a uniform grid and only compare neighbors.
    Grid,
}

/// Tuning constants for the particle field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub max_speed: f32,
    pub spring: f32,
    pub damping: f32,
    pub repel_strength: f32,
    /// Fraction of velocity kept (and inverted) when a steady particle leaves the viewport.
    pub bounce: f32,
    pub trail_decay: f32,
    pub reap_size: f32,
    /// Viewport area per steady particle.
    pub density_divisor: f32,
    pub trails_per_move: usize,
    /// Full width of the square box trail particles are jittered into.
    pub trail_jitter: f32,
    pub pointer_radius: f32,
    pub connect_distance: f32,
    /// Edge opacity at distance 0.
    pub edge_alpha: f32,
    pub edge_width: f32,
    pub hue_step: f32,
    pub edge_strategy: EdgeStrategy,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_speed: 1.2,
            spring: 0.008,
            damping: 0.96,
            repel_strength: 0.15,
            bounce: 0.5,
            trail_decay: 0.95,
            reap_size: 0.1,
            density_divisor: 10_000.0,
            trails_per_move: 2,
            trail_jitter: 10.0,
            pointer_radius: 120.0,
            connect_distance: 100.0,
            edge_alpha: 0.5,
            edge_width: 0.4,
            hue_step: 0.15,
            edge_strategy: EdgeStrategy::Grid,
        }
    }
}

impl FieldConfig {
    /// Check every value the simulation divides by or clamps against.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_speed", self.max_speed)?;
        positive("density_divisor", self.density_divisor)?;
        positive("pointer_radius", self.pointer_radius)?;
        positive("connect_distance", self.connect_distance)?;
        non_negative("spring", self.spring)?;
        non_negative("repel_strength", self.repel_strength)?;
        non_negative("trail_jitter", self.trail_jitter)?;
        non_negative("reap_size", self.reap_size)?;
        non_negative("edge_width", self.edge_width)?;
        non_negative("hue_step", self.hue_step)?;
        unit_interval("damping", self.damping)?;
        unit_interval("trail_decay", self.trail_decay)?;
        unit_interval("bounce", self.bounce)?;
        unit_interval("edge_alpha", self.edge_alpha)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn unit_interval(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}
