use std::f32::consts::PI;

use glam::Vec2;

#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

#[inline]
pub fn to_degrees(radians: f32) -> f32 {
    radians * 180.0 / PI
}

/// Rotation that turns an up-pointing shape at `from` towards `to`.
///
/// Pixel space (+Y down), so positive angles turn clockwise on screen:
/// straight up is `0`, right is `π/2`, left is `-π/2`.
pub fn pointing_angle(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.x.atan2(-d.y)
}
