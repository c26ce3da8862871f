use crate::canvas::Canvas;
use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::forces::pointer::Pointer;
use crate::math::wrap_degrees;
use crate::palette::{Color, Theme};
use crate::particle::{Particle, ParticleInstance};
use crate::population::{reap, seed_steady, spawn_trails};
use crate::render::{Edge, Renderer};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The live particle field: particles plus the pointer, hue, theme and
/// viewport they react to.
///
/// Pointer, resize and theme calls take effect on the next [`Field::tick`].
pub struct Field {
    particles: Vec<Particle>,
    pointer: Pointer,
    hue: f32,
    theme: Theme,
    viewport: Vec2,
    /// Page-supplied background for the current theme, if any.
    background: Option<String>,
    config: FieldConfig,
    rng: SmallRng,
    renderer: Renderer,
    instances: Vec<ParticleInstance>,
    ticks: u64,
}

impl Field {
    /// Empty field with a zero viewport; call [`Field::resize`] to populate it.
    pub fn new(config: FieldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let hue = rng.gen::<f32>() * 360.0;
        Ok(Self {
            particles: Vec::new(),
            pointer: Pointer::new(config.pointer_radius),
            hue: wrap_degrees(hue),
            theme: Theme::default(),
            viewport: Vec2::ZERO,
            background: None,
            renderer: Renderer::new(&config),
            config,
            rng,
            instances: Vec::new(),
            ticks: 0,
        })
    }

    /// Set the viewport and reseed the whole population for it.
    ///
    /// Trail particles are discarded along with the old steady ones.
    /// Returns the new particle count.
    pub fn resize(&mut self, width: f32, height: f32) -> usize {
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        self.viewport = Vec2::new(sanitize(width), sanitize(height));
        self.reseed();
        self.particles.len()
    }

    fn reseed(&mut self) {
        self.particles = seed_steady(&mut self.rng, self.viewport, &self.config, self.hue);
    }

    /// Pointer moved to `(x, y)`: track it and drop a few trail particles there.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        let at = Vec2::new(x, y);
        if !at.is_finite() {
            return;
        }
        self.pointer.position = Some(at);
        spawn_trails(&mut self.particles, &mut self.rng, at, &self.config, self.hue);
    }

    /// Pointer left the surface: stop repelling.
    pub fn pointer_left(&mut self) {
        self.pointer.position = None;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Background color from the page's styling. Empty or `None` falls back
    /// to the built-in color for the current theme.
    pub fn set_background(&mut self, css: Option<String>) {
        self.background = css.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
    }

    pub fn background(&self) -> Color {
        match &self.background {
            Some(css) => Color::Css(css.clone()),
            None => Color::Css(self.theme.fallback_background().to_string()),
        }
    }

    /// Replace the tuning constants. Reseeds if population density changed.
    pub fn set_config(&mut self, config: FieldConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let reseed = config.density_divisor != self.config.density_divisor;
        self.pointer.radius = config.pointer_radius;
        self.config = config;
        if reseed {
            self.reseed();
        }
        Ok(())
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Advance the hue and every particle by one tick, without drawing or reaping.
    pub fn step(&mut self) {
        self.hue = wrap_degrees(self.hue + self.config.hue_step);

        let pointer = self.pointer;
        let hue = self.hue;
        let viewport = self.viewport;
        let config = &self.config;

        #[cfg(feature = "parallel")]
        self.particles
            .par_iter_mut()
            .for_each(|p| p.update(&pointer, hue, viewport, config));

        #[cfg(not(feature = "parallel"))]
        for p in self.particles.iter_mut() {
            p.update(&pointer, hue, viewport, config);
        }
    }

    /// One full simulate + render pass.
    pub fn tick(&mut self, canvas: &mut dyn Canvas) {
        let background = self.background();
        self.renderer.paint_background(canvas, &background, self.viewport);

        self.step();

        self.renderer
            .paint_particles(canvas, &self.particles, self.theme, &self.config);

        reap(&mut self.particles, self.config.reap_size);
        self.ticks += 1;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for embedding code that places particles by hand.
    pub fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn steady_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_steady()).count()
    }

    pub fn trail_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_trail()).count()
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Connection edges drawn by the last tick.
    pub fn last_edges(&self) -> &[Edge] {
        self.renderer.last_edges()
    }

    /// Refresh and return the instance buffer for GPU renderers.
    pub fn snapshot(&mut self) -> &[ParticleInstance] {
        self.instances.clear();
        self.instances
            .extend(self.particles.iter().map(Particle::instance));
        &self.instances
    }
}
