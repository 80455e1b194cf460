use glam::Vec3;

// Shared tuning constants for the yard viewport. Everything here is a default;
// the runtime values live in `OrbitParams` / `PlacementParams`.

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 50.0, 50.0);
pub const INITIAL_CAMERA_TARGET: Vec3 = Vec3::ZERO;

// Orbit
pub const ROTATE_SPEED: f32 = 1.0;
pub const ZOOM_SPEED: f32 = 1.2;
pub const PAN_SPEED: f32 = 0.8;
pub const DOLLY_BASE: f32 = 0.95; // zoom scale = DOLLY_BASE ^ zoom_speed
pub const POLAR_EPSILON: f32 = 0.000001; // keeps polar inside (eps, pi - eps)
pub const MIN_RADIUS: f32 = 1.0;
pub const MAX_RADIUS: f32 = 1000.0;
pub const MAX_DOLLY_EXPONENT: f32 = 80.0; // |ln(scale)| applied per tick; exp() stays finite
pub const POLAR_SETTLE_STEPS: usize = 32; // attempts to move a pole-hugging pose off the pole

// Placement
pub const CLICK_THRESHOLD_PX: f32 = 5.0; // max pointer travel for a tap
pub const GROUND_HEIGHT: f32 = 0.0;
pub const GROUND_HALF_EXTENT: f32 = 50.0; // 100 x 100 yard
pub const MARKER_ICON_HEIGHT: f32 = 1.0;

// Picking
pub const PARALLEL_EPSILON: f32 = 1e-6; // |dot(dir, normal)| below this is a miss
