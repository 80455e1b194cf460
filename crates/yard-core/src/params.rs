//! Runtime tuning for the orbit controller and marker placement.

use crate::constants::*;
use crate::error::ConfigurationError;
use serde::Deserialize;
use std::f32::consts::FRAC_PI_2;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrbitParams {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub dolly_base: f32,
    pub polar_epsilon: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Scale pan distance by distance-to-target so panning feels constant on screen.
    pub pan_scales_with_distance: bool,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            rotate_speed: ROTATE_SPEED,
            zoom_speed: ZOOM_SPEED,
            pan_speed: PAN_SPEED,
            dolly_base: DOLLY_BASE,
            polar_epsilon: POLAR_EPSILON,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            pan_scales_with_distance: true,
        }
    }
}

impl OrbitParams {
    /// Radius multiplier for one zoom-in step; its reciprocal zooms out.
    #[inline]
    pub fn zoom_scale(&self) -> f32 {
        self.dolly_base.powf(self.zoom_speed)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        non_negative("rotate_speed", self.rotate_speed)?;
        non_negative("zoom_speed", self.zoom_speed)?;
        non_negative("pan_speed", self.pan_speed)?;
        if !(self.dolly_base > 0.0 && self.dolly_base < 1.0) {
            return invalid("dolly_base", self.dolly_base);
        }
        if !(self.polar_epsilon > 0.0 && self.polar_epsilon < FRAC_PI_2) {
            return invalid("polar_epsilon", self.polar_epsilon);
        }
        if !(self.min_radius.is_finite() && self.min_radius > 0.0) {
            return invalid("min_radius", self.min_radius);
        }
        if !(self.max_radius.is_finite() && self.max_radius >= self.min_radius) {
            return invalid("max_radius", self.max_radius);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacementParams {
    pub click_threshold_px: f32,
    pub ground_height: f32,
    /// Half side length of the square yard; `None` makes the ground unbounded.
    pub ground_half_extent: Option<f32>,
    pub marker_icon_height: f32,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            click_threshold_px: CLICK_THRESHOLD_PX,
            ground_height: GROUND_HEIGHT,
            ground_half_extent: Some(GROUND_HALF_EXTENT),
            marker_icon_height: MARKER_ICON_HEIGHT,
        }
    }
}

impl PlacementParams {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        non_negative("click_threshold_px", self.click_threshold_px)?;
        if !self.ground_height.is_finite() {
            return invalid("ground_height", self.ground_height);
        }
        if let Some(extent) = self.ground_half_extent {
            if !(extent.is_finite() && extent > 0.0) {
                return invalid("ground_half_extent", extent);
            }
        }
        if !self.marker_icon_height.is_finite() {
            return invalid("marker_icon_height", self.marker_icon_height);
        }
        Ok(())
    }
}

/// Complete viewport configuration as supplied by the host page.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct YardConfig {
    pub orbit: OrbitParams,
    pub placement: PlacementParams,
}

impl YardConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: YardConfig =
            serde_json::from_str(json).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.orbit.validate()?;
        self.placement.validate()
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigurationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        invalid(name, value)
    }
}

fn invalid(name: &'static str, value: f32) -> Result<(), ConfigurationError> {
    Err(ConfigurationError::InvalidParam { name, value })
}
