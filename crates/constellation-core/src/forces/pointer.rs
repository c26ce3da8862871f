use glam::Vec2;

/// Pointer (cursor) state as seen by the field.
///
/// `position` is `None` while the pointer is outside the interactive surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub position: Option<Vec2>,
    pub radius: f32,
}

impl Pointer {
    pub fn new(radius: f32) -> Self {
        Self {
            position: None,
            radius,
        }
    }

    pub fn is_active(&self) -> bool {
        self.position.is_some()
    }
}

/// Compute the repulsive velocity increment the pointer applies to a particle.
///
/// The push points from the pointer to the particle and scales linearly from
/// `density * strength` at the pointer down to zero at `pointer.radius`.
/// A particle sitting exactly on the pointer gets nothing, since there is no
/// direction to push it in.
pub fn compute_repulsion(pos: Vec2, density: f32, strength: f32, pointer: &Pointer) -> Vec2 {
    let Some(center) = pointer.position else {
        return Vec2::ZERO;
    };

    let away = pos - center;
    let dist = away.length();
    if dist <= 0.0 || dist >= pointer.radius {
        return Vec2::ZERO;
    }

    let force = (pointer.radius - dist) / pointer.radius * density * strength;
    away / dist * force
}
