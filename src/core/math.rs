// Math utilities and helper functions

use glam::{Quat, Vec3};

/// Directions shorter than this are treated as "no direction"
const DIRECTION_EPSILON: f32 = 1e-6;

/// Check if two f32 values are approximately equal
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Direction from `from` to `to` with the vertical component removed
///
/// Returns `None` when the two points share the same ground position.
pub fn flat_direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    let mut direction = to - from;
    direction.y = 0.0;
    if direction.length_squared() <= DIRECTION_EPSILON {
        None
    } else {
        Some(direction)
    }
}

/// Rotation that makes +Z point along `direction` while keeping the actor upright
pub fn look_rotation(direction: Vec3) -> Quat {
    Quat::from_rotation_y(direction.x.atan2(direction.z))
}

/// Advance `current` towards `target` by one frame of spherical interpolation
///
/// The step is `dt * turn_speed`, clamped to 1 so a long frame lands exactly
/// on the target instead of overshooting.
pub fn turn_towards(current: Quat, target: Quat, dt: f32, turn_speed: f32) -> Quat {
    let t = (dt * turn_speed).clamp(0.0, 1.0);
    current.slerp(target, t).normalize()
}

/// Angle between two rotations in radians
pub fn angle_between(a: Quat, b: Quat) -> f32 {
    a.angle_between(b)
}
