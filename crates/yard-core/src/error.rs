//! Error taxonomy for the viewport core.
//!
//! Only [`ConfigurationError`] ever reaches a caller. [`InputError`] is built
//! by the event handlers, logged, and dropped. A missed pick is not an error
//! at all and is modelled as `Option::None`.

use thiserror::Error;

/// Fatal setup failure raised while constructing a controller or parsing
/// configuration. Never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("no camera supplied")]
    MissingCamera,
    #[error("no viewport surface supplied")]
    MissingViewport,
    #[error("invalid camera: {0}")]
    InvalidCamera(&'static str),
    #[error("invalid viewport size {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("invalid parameter `{name}` = {value}")]
    InvalidParam { name: &'static str, value: f32 },
    #[error("could not parse configuration: {0}")]
    Parse(String),
}

/// A single viewport event that could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InputError {
    #[error("non-finite {event} coordinates ({x}, {y})")]
    NonFinite { event: &'static str, x: f32, y: f32 },
}

#[inline]
pub(crate) fn finite_point(event: &'static str, x: f32, y: f32) -> Result<glam::Vec2, InputError> {
    if x.is_finite() && y.is_finite() {
        Ok(glam::Vec2::new(x, y))
    } else {
        Err(InputError::NonFinite { event, x, y })
    }
}
