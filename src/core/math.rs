// Math utilities and helper functions
//
// Axis convention: right-handed, +Y up, -Z forward, +X right.

use glam::{Quat, Vec3};

/// Local forward direction of the body and camera
pub const FORWARD: Vec3 = Vec3::NEG_Z;

/// Local right direction of the body and camera
pub const RIGHT: Vec3 = Vec3::X;

/// World up
pub const UP: Vec3 = Vec3::Y;

/// Clamp a value between min and max.
///
/// Unlike `f32::clamp` this does not panic when `min > max`.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Rotation turning the body by `degrees` about the vertical axis.
/// Positive values turn to the right.
pub fn yaw_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_y(-degrees.to_radians())
}

/// Rotation tilting the camera by `degrees` about its local right axis.
/// Positive values look down.
pub fn pitch_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_x(-degrees.to_radians())
}

/// Wrap an angle in degrees into `[0, 360)`
pub fn wrap_degrees(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}

/// Heading of a direction in degrees, clockwise from forward when seen from above
pub fn heading_degrees(direction: Vec3) -> f32 {
    wrap_degrees(direction.x.atan2(-direction.z).to_degrees())
}
