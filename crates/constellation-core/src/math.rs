use glam::Vec2;

/// Wrap an angle in degrees into [0, 360).
pub fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Rescale `v` to length `max` if it is longer, keeping its direction.
#[inline]
pub fn clamp_speed(v: Vec2, max: f32) -> Vec2 {
    let speed = v.length();
    if speed > max {
        v / speed * max
    } else {
        v
    }
}

/// 1 at `dist == 0`, falling linearly to 0 at `dist == range` and beyond.
#[inline]
pub fn linear_falloff(dist: f32, range: f32) -> f32 {
    (1.0 - dist / range).max(0.0)
}
