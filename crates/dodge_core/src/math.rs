//! Vector helpers
//!
//! Thin layer over `nalgebra::Vector3<f32>`. The world is Y-up: the ground
//! plane is X/Z.

use nalgebra::Vector3;

/// 3D vector used for positions, velocities and directions.
pub type Vec3 = Vector3<f32>;

/// Vectors shorter than this are treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f32 = 1e-6;

#[inline]
pub fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Unit vector in the direction of `v`, or zero for a degenerate vector.
#[inline]
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    v.try_normalize(NORMALIZE_EPSILON).unwrap_or_else(Vec3::zeros)
}

/// Projection onto the ground plane (y dropped).
#[inline]
pub fn horizontal(v: &Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[inline]
pub fn distance(a: &Vec3, b: &Vec3) -> f32 {
    (a - b).norm()
}

/// Linear interpolation between two points, `t` unclamped.
#[inline]
pub fn lerp(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_scalar(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Angle in degrees between two directions on the ground plane.
///
/// Returns `None` when either direction has no horizontal component.
pub fn horizontal_angle_deg(a: &Vec3, b: &Vec3) -> Option<f32> {
    let a = horizontal(a).try_normalize(NORMALIZE_EPSILON)?;
    let b = horizontal(b).try_normalize(NORMALIZE_EPSILON)?;
    Some(a.dot(&b).clamp(-1.0, 1.0).acos().to_degrees())
}
