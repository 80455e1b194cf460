//! Camera-side state types shared with the web frontend.
//!
//! These types avoid platform-specific APIs. The controller owns a [`Camera`]
//! and mutates its pose; the renderer reads [`CameraPose`] and the matrices
//! once per frame.

use crate::constants::*;
use crate::error::ConfigurationError;
use glam::{Mat4, Vec3};

/// Position and look-at target. Only panning moves `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    #[inline]
    pub fn offset(&self) -> Vec3 {
        self.position - self.target
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.offset().length()
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: INITIAL_CAMERA_POSITION,
            target: INITIAL_CAMERA_TARGET,
        }
    }
}

/// Right-handed perspective camera with a world-space pose.
#[derive(Clone, Debug)]
pub struct Camera {
    pub pose: CameraPose,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

/// Orthonormal camera axes in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl Camera {
    pub fn new(pose: CameraPose, aspect: f32) -> Self {
        Self {
            pose,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Reject cameras the controller cannot orbit.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.pose.position.is_finite() || !self.pose.target.is_finite() {
            return Err(ConfigurationError::InvalidCamera("non-finite pose"));
        }
        if self.pose.distance() <= f32::EPSILON {
            return Err(ConfigurationError::InvalidCamera(
                "position coincides with target",
            ));
        }
        if !(self.fovy_radians > 0.0 && self.fovy_radians < std::f32::consts::PI) {
            return Err(ConfigurationError::InvalidCamera("field of view out of range"));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(ConfigurationError::InvalidCamera("aspect must be positive"));
        }
        if !(self.znear > 0.0 && self.zfar > self.znear) {
            return Err(ConfigurationError::InvalidCamera("bad clip planes"));
        }
        Ok(())
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.pose.position, self.pose.target, self.up)
    }

    /// Camera axes derived from the current pose. Looking straight along `up`
    /// falls back to world X as the right axis.
    pub fn basis(&self) -> CameraBasis {
        let forward = (self.pose.target - self.pose.position).normalize_or_zero();
        let right = forward
            .cross(self.up)
            .try_normalize()
            .unwrap_or(Vec3::X);
        let up = right.cross(forward).normalize_or_zero();
        CameraBasis { right, up, forward }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraPose::default(), 1.0)
    }
}

/// Size of the viewport surface in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigurationError> {
        let viewport = Self { width, height };
        if viewport.is_valid() {
            Ok(viewport)
        } else {
            Err(ConfigurationError::InvalidViewport { width, height })
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}
