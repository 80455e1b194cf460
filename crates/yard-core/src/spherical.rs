//! Conversions between a cartesian camera offset and spherical coordinates.
//!
//! Y is up. `polar` is measured from +Y, `azimuth` around Y starting at +Z
//! and turning towards +X.

use glam::{Vec2, Vec3};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalOffset {
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
}

impl SphericalOffset {
    pub const fn new(radius: f32, polar: f32, azimuth: f32) -> Self {
        Self {
            radius,
            polar,
            azimuth,
        }
    }
}

/// Zero-length offsets map to a zero radius with both angles at zero.
pub fn to_spherical(offset: Vec3) -> SphericalOffset {
    let radius = offset.length();
    if radius == 0.0 {
        return SphericalOffset::new(0.0, 0.0, 0.0);
    }
    SphericalOffset {
        radius,
        // atan2 keeps precision within a few ulps of either pole, where acos(y / r) reads 0
        polar: Vec2::new(offset.x, offset.z).length().atan2(offset.y),
        azimuth: offset.x.atan2(offset.z),
    }
}

pub fn to_cartesian(s: SphericalOffset) -> Vec3 {
    let (sin_polar, cos_polar) = s.polar.sin_cos();
    let (sin_az, cos_az) = s.azimuth.sin_cos();
    let ring = s.radius * sin_polar;
    Vec3::new(ring * sin_az, s.radius * cos_polar, ring * cos_az)
}

/// Clamp into the open band `(epsilon, PI - epsilon)`. The result is always
/// strictly inside, so neither bound is ever returned. `epsilon` must lie in
/// `[0, PI / 2)`.
#[inline]
pub fn clamp_polar(polar: f32, epsilon: f32) -> f32 {
    polar.clamp(next_above(epsilon), next_below(PI - epsilon))
}

/// Whether `polar` lies strictly inside `(epsilon, PI - epsilon)`.
#[inline]
pub fn polar_in_band(polar: f32, epsilon: f32) -> bool {
    polar > epsilon && polar < PI - epsilon
}

// Neighbouring floats for non-negative / positive finite inputs.
fn next_above(x: f32) -> f32 {
    f32::from_bits(x.to_bits() + 1)
}

fn next_below(x: f32) -> f32 {
    f32::from_bits(x.to_bits() - 1)
}

#[inline]
pub fn clamp_radius(radius: f32, min: f32, max: f32) -> f32 {
    radius.clamp(min, max)
}
