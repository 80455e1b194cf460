//! Pointer and wheel driven orbit camera.
//!
//! Event handlers only accumulate into a [`PendingDelta`]. The host calls
//! [`OrbitController::update`] once per render tick, which folds the whole
//! accumulator into the camera pose and resets it.

use crate::constants::{MAX_DOLLY_EXPONENT, POLAR_SETTLE_STEPS};
use crate::error::{finite_point, ConfigurationError};
use crate::params::OrbitParams;
use crate::spherical::{
    clamp_polar, clamp_radius, polar_in_band, to_cartesian, to_spherical, SphericalOffset,
};
use crate::state::{Camera, CameraPose, Viewport};
use crate::subscription::Subscriptions;
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` code.
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => PointerButton::Primary,
            1 => PointerButton::Auxiliary,
            2 => PointerButton::Secondary,
            other => PointerButton::Other(other),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    Rotating,
    Panning,
    Dollying,
}

impl InteractionState {
    fn for_button(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => InteractionState::Rotating,
            PointerButton::Auxiliary => InteractionState::Dollying,
            PointerButton::Secondary => InteractionState::Panning,
            PointerButton::Other(_) => InteractionState::Idle,
        }
    }
}

/// Input accumulated between two render ticks.
///
/// `dolly_exponent` is the natural log of the pending radius multiplier.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PendingDelta {
    pub d_azimuth: f32,
    pub d_polar: f32,
    pub pan_offset: Vec3,
    pub dolly_exponent: f32,
}

impl PendingDelta {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Radius multiplier for this tick, bounded so it is finite and non-zero.
    pub fn dolly_scale(&self) -> f32 {
        self.dolly_exponent
            .clamp(-MAX_DOLLY_EXPONENT, MAX_DOLLY_EXPONENT)
            .exp()
    }

    fn add_dolly(&mut self, exponent: f32) {
        let next = self.dolly_exponent + exponent;
        if next.is_finite() {
            self.dolly_exponent = next;
        }
    }
}

#[derive(Default)]
pub struct OrbitControllerBuilder {
    camera: Option<Camera>,
    viewport: Option<Viewport>,
    params: OrbitParams,
}

impl OrbitControllerBuilder {
    pub fn camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn params(mut self, params: OrbitParams) -> Self {
        self.params = params;
        self
    }

    pub fn build(self) -> Result<OrbitController, ConfigurationError> {
        let mut camera = self.camera.ok_or(ConfigurationError::MissingCamera)?;
        let viewport = self.viewport.ok_or(ConfigurationError::MissingViewport)?;
        if !viewport.is_valid() {
            return Err(ConfigurationError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.params.validate()?;
        camera.aspect = viewport.aspect();
        camera.validate()?;

        let spherical = to_spherical(camera.pose.offset());
        log::info!(
            "[orbit] ready: radius={:.2} polar={:.3} azimuth={:.3} viewport={}x{}",
            spherical.radius,
            spherical.polar,
            spherical.azimuth,
            viewport.width,
            viewport.height
        );
        Ok(OrbitController {
            camera,
            viewport,
            params: self.params,
            state: InteractionState::Idle,
            last_pointer: Vec2::ZERO,
            pending: PendingDelta::default(),
            spherical,
            enabled: true,
            subscriptions: Subscriptions::new(),
        })
    }
}

pub struct OrbitController {
    camera: Camera,
    viewport: Viewport,
    params: OrbitParams,
    state: InteractionState,
    last_pointer: Vec2,
    pending: PendingDelta,
    spherical: SphericalOffset,
    enabled: bool,
    subscriptions: Subscriptions,
}

impl OrbitController {
    pub fn builder() -> OrbitControllerBuilder {
        OrbitControllerBuilder::default()
    }

    pub fn new(
        camera: Camera,
        viewport: Viewport,
        params: OrbitParams,
    ) -> Result<Self, ConfigurationError> {
        Self::builder()
            .camera(camera)
            .viewport(viewport)
            .params(params)
            .build()
    }

    pub fn on_pointer_down(&mut self, button: PointerButton, x: f32, y: f32) {
        if !self.enabled {
            return;
        }
        let pos = match finite_point("pointer-down", x, y) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("[orbit] ignoring event: {}", e);
                return;
            }
        };
        self.state = InteractionState::for_button(button);
        self.last_pointer = pos;
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if !self.enabled || self.state == InteractionState::Idle {
            return;
        }
        let pos = match finite_point("pointer-move", x, y) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("[orbit] ignoring event: {}", e);
                return;
            }
        };
        let delta = pos - self.last_pointer;
        self.last_pointer = pos;
        if !delta.is_finite() {
            log::warn!("[orbit] ignoring pointer jump {:?}", delta);
            return;
        }

        match self.state {
            InteractionState::Rotating => {
                let delta = delta * self.params.rotate_speed;
                let height = self.viewport.height;
                self.pending.d_azimuth -= TAU * delta.x / height;
                self.pending.d_polar -= TAU * delta.y / height;
            }
            InteractionState::Panning => self.pan(delta * self.params.pan_speed),
            InteractionState::Dollying => {
                // One zoom step per pixel; dragging down zooms out.
                self.pending
                    .add_dolly(-delta.y * self.params.zoom_scale().ln());
            }
            InteractionState::Idle => {}
        }
    }

    /// Ends the gesture. The pose stays where the gesture left it.
    pub fn on_pointer_up(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Positive `delta_y` zooms out, negative zooms in, one step per event.
    pub fn on_wheel(&mut self, delta_y: f32) {
        if !self.enabled {
            return;
        }
        if !delta_y.is_finite() {
            log::warn!("[orbit] ignoring non-finite wheel delta {}", delta_y);
            return;
        }
        let step = self.params.zoom_scale().ln();
        if delta_y > 0.0 {
            self.pending.add_dolly(-step);
        } else if delta_y < 0.0 {
            self.pending.add_dolly(step);
        }
    }

    fn pan(&mut self, delta: Vec2) {
        let basis = self.camera.basis();
        let mut distance = if self.params.pan_scales_with_distance {
            self.camera.pose.distance()
        } else {
            1.0
        };
        distance *= (self.camera.fovy_radians * 0.5).tan();

        let height = self.viewport.height;
        let left = basis.right * (-2.0 * delta.x * distance / height);
        let up = basis.up * (2.0 * delta.y * distance / height);
        self.pending.pan_offset += left + up;
    }

    /// Consume everything accumulated since the previous tick. Returns whether
    /// any input was pending.
    ///
    /// A pose that would not be finite is never committed; the previous pose is
    /// kept instead.
    pub fn update(&mut self) -> bool {
        let delta = std::mem::take(&mut self.pending);
        let pose = self.camera.pose;

        let mut s = to_spherical(pose.offset());
        s.azimuth += delta.d_azimuth;
        s.polar = clamp_polar(s.polar + delta.d_polar, self.params.polar_epsilon);
        s.radius = clamp_radius(
            s.radius * delta.dolly_scale(),
            self.params.min_radius,
            self.params.max_radius,
        );

        let target = pose.target + delta.pan_offset;
        match self.settle(target, s) {
            Some((position, s)) => {
                self.camera.pose = CameraPose { position, target };
                self.spherical = s;
            }
            None => log::warn!(
                "[orbit] dropping tick: no finite pose for target={:?} {:?}",
                target,
                s
            ),
        }
        !delta.is_identity()
    }

    /// Place the camera on the sphere around `target`. The angle read back from
    /// the committed `position - target` must stay off the poles, so a polar
    /// lost to rounding is pushed towards the equator until it survives.
    fn settle(&self, target: Vec3, mut s: SphericalOffset) -> Option<(Vec3, SphericalOffset)> {
        if !(target.is_finite() && s.radius.is_finite() && s.azimuth.is_finite()) {
            return None;
        }
        let eps = self.params.polar_epsilon;
        for _ in 0..POLAR_SETTLE_STEPS {
            let position = target + to_cartesian(s);
            if !position.is_finite() {
                return None;
            }
            if polar_in_band(to_spherical(position - target).polar, eps) {
                return Some((position, s));
            }
            s.polar = if s.polar < FRAC_PI_2 {
                s.polar * 2.0
            } else {
                PI - (PI - s.polar) * 2.0
            };
        }
        None
    }

    /// Resize only touches the projection; the pose is left alone.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        match Viewport::new(width, height) {
            Ok(viewport) => {
                self.viewport = viewport;
                self.camera.aspect = viewport.aspect();
            }
            Err(e) => log::warn!("[orbit] ignoring resize: {}", e),
        }
    }

    /// Disabling freezes the view: pending input is dropped and any gesture ends.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.pending = PendingDelta::default();
            self.state = InteractionState::Idle;
        }
        log::info!("[orbit] enabled={}", enabled);
    }

    pub fn register_subscription(&mut self, revoke: impl FnOnce() + 'static) {
        self.subscriptions.push(revoke);
    }

    /// Remove every registered event subscription. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        let revoked = self.subscriptions.dispose();
        self.state = InteractionState::Idle;
        if revoked > 0 {
            log::info!("[orbit] disposed {} subscriptions", revoked);
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pose(&self) -> CameraPose {
        self.camera.pose
    }

    /// Spherical offset the current pose was placed from, as of the last
    /// `update` (or construction).
    pub fn spherical(&self) -> SphericalOffset {
        self.spherical
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn pending(&self) -> &PendingDelta {
        &self.pending
    }

    pub fn params(&self) -> &OrbitParams {
        &self.params
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}
