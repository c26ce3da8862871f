use crate::config::FieldConfig;
use crate::forces::pointer::{compute_repulsion, Pointer};
use crate::math::clamp_speed;
use glam::Vec2;

/// Behavior branch of a particle, fixed at creation.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ParticleKind {
    /// Long-lived, sprung to `origin`, bounces off the viewport edges and
    /// takes part in connection edges.
    Steady { origin: Vec2 },
    /// Short-lived pointer trail: floats freely, shrinks every tick and is
    /// reaped once `life` reaches `max_life` or it has shrunk away.
    Trail { life: u32, max_life: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    /// Per-particle weight on pointer repulsion.
    pub density: f32,
    /// Stamped from the global hue every tick.
    pub base_hue: f32,
    pub kind: ParticleKind,
}

/// Per-particle instance record for GPU renderers: 20 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2], //  8 bytes
    pub size: f32,          //  4 bytes
    pub hue: f32,           //  4 bytes
    /// 0.0 = steady, 1.0 = trail. Trail opacity is not encoded.
    pub kind: f32, //  4 bytes
}

impl Particle {
    /// A steady particle at rest on its own origin.
    pub fn steady(position: Vec2, size: f32, density: f32, hue: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size: size.max(0.0),
            density,
            base_hue: hue,
            kind: ParticleKind::Steady { origin: position },
        }
    }

    pub fn trail(position: Vec2, size: f32, density: f32, max_life: u32, hue: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size: size.max(0.0),
            density,
            base_hue: hue,
            kind: ParticleKind::Trail { life: 0, max_life },
        }
    }

    pub fn is_trail(&self) -> bool {
        matches!(self.kind, ParticleKind::Trail { .. })
    }

    pub fn is_steady(&self) -> bool {
        matches!(self.kind, ParticleKind::Steady { .. })
    }

    /// True for a trail particle that has run out of life or shrunk below `reap_size`.
    /// Steady particles never expire.
    pub fn is_expired(&self, reap_size: f32) -> bool {
        match self.kind {
            ParticleKind::Steady { .. } => false,
            ParticleKind::Trail { life, max_life } => life >= max_life || self.size < reap_size,
        }
    }

    /// Remaining-life fraction used for trail opacity; 1.0 for steady particles.
    pub fn fade(&self) -> f32 {
        match self.kind {
            ParticleKind::Steady { .. } => 1.0,
            ParticleKind::Trail { max_life: 0, .. } => 0.0,
            ParticleKind::Trail { life, max_life } => (1.0 - life as f32 / max_life as f32).max(0.0),
        }
    }

    /// Advance this particle by one tick.
    ///
    /// `viewport` is the (width, height) used for the soft edge bounce of
    /// steady particles.
    pub fn update(&mut self, pointer: &Pointer, hue: f32, viewport: Vec2, config: &FieldConfig) {
        self.base_hue = hue;

        let mut vel = self.velocity;
        vel += compute_repulsion(self.position, self.density, config.repel_strength, pointer);

        if let ParticleKind::Steady { origin } = self.kind {
            vel += (origin - self.position) * config.spring;
        }

        vel *= config.damping;
        vel = clamp_speed(vel, config.max_speed);

        self.position += vel;

        match &mut self.kind {
            ParticleKind::Steady { .. } => {
                if self.position.x < 0.0 || self.position.x > viewport.x {
                    vel.x *= -config.bounce;
                }
                if self.position.y < 0.0 || self.position.y > viewport.y {
                    vel.y *= -config.bounce;
                }
            }
            ParticleKind::Trail { life, .. } => {
                *life = life.saturating_add(1);
                self.size *= config.trail_decay;
            }
        }

        self.velocity = vel;
    }

    pub fn instance(&self) -> ParticleInstance {
        ParticleInstance {
            position: self.position.to_array(),
            size: self.size,
            hue: self.base_hue,
            kind: if self.is_trail() { 1.0 } else { 0.0 },
        }
    }
}
