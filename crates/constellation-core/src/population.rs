//! Steady population sizing, trail spawning and reaping.

use crate::config::FieldConfig;
use crate::particle::Particle;
use glam::Vec2;
use rand::Rng;

/// Number of steady particles for a viewport: one per `divisor` units of area.
///
/// Degenerate viewports (zero, negative or non-finite) get no particles.
/// The area is taken in f64 so large viewports still floor exactly.
pub fn steady_target(viewport: Vec2, divisor: f32) -> usize {
    let area = f64::from(viewport.x) * f64::from(viewport.y);
    let degenerate = !(viewport.x > 0.0 && viewport.y > 0.0) || !area.is_finite();
    if degenerate || !(divisor > 0.0) {
        return 0;
    }
    (area / f64::from(divisor)).floor() as usize
}

/// A fresh steady population scattered uniformly over the viewport, at rest.
pub fn seed_steady<R: Rng>(rng: &mut R, viewport: Vec2, config: &FieldConfig, hue: f32) -> Vec<Particle> {
    let count = steady_target(viewport, config.density_divisor);
    (0..count)
        .map(|_| {
            let pos = Vec2::new(rng.gen::<f32>() * viewport.x, rng.gen::<f32>() * viewport.y);
            let size = rng.gen::<f32>() * 1.5 + 0.5;
            let density = rng.gen::<f32>() * 20.0 + 5.0;
            Particle::steady(pos, size, density, hue)
        })
        .collect()
}

/// Append `config.trails_per_move` trail particles jittered around `at`.
pub fn spawn_trails<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    at: Vec2,
    config: &FieldConfig,
    hue: f32,
) {
    particles.reserve(config.trails_per_move);
    for _ in 0..config.trails_per_move {
        let jitter = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * config.trail_jitter;
        let size = rng.gen::<f32>() * 2.5 + 1.0;
        let density = rng.gen::<f32>() * 20.0 + 5.0;
        let max_life = rng.gen_range(40..100);

        let mut trail = Particle::trail(at + jitter, size, density, max_life, hue);
        // Slight initial drift so trails spread instead of stacking
        trail.velocity = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * 0.2;
        particles.push(trail);
    }
}

/// Remove expired trail particles, preserving the order of the survivors.
///
/// Returns how many were removed.
pub fn reap(particles: &mut Vec<Particle>, reap_size: f32) -> usize {
    let before = particles.len();
    particles.retain(|p| !p.is_expired(reap_size));
    before - particles.len()
}
