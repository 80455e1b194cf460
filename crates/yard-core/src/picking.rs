use crate::constants::PARALLEL_EPSILON;
use crate::state::Camera;
use glam::{Vec3, Vec4};

/// Infinite plane through `point` with unit `normal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub point: Vec3,
}

impl Plane {
    pub fn new(normal: Vec3, point: Vec3) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            point,
        }
    }

    /// Horizontal plane at the given height.
    pub fn horizontal(height: f32) -> Self {
        Self::new(Vec3::Y, Vec3::new(0.0, height, 0.0))
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::horizontal(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// World-space ray from the camera eye through a viewport pixel.
    ///
    /// Returns `None` for a degenerate viewport or non-finite input.
    pub fn from_screen(sx: f32, sy: f32, width: f32, height: f32, camera: &Camera) -> Option<Ray> {
        if !(width > 0.0 && height > 0.0) || !sx.is_finite() || !sy.is_finite() {
            return None;
        }
        let ndc_x = (2.0 * sx / width) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height);

        let inv = (camera.projection_matrix() * camera.view_matrix()).inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        if p_far.w.abs() <= f32::EPSILON {
            return None;
        }
        let far: Vec3 = p_far.truncate() / p_far.w;
        let origin = camera.pose.position;
        let direction = (far - origin).try_normalize()?;
        direction.is_finite().then_some(Ray { origin, direction })
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to `plane`, or `None` when the ray runs parallel
    /// to it or the crossing lies behind the origin.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<f32> {
        let denom = self.direction.dot(plane.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (plane.point - self.origin).dot(plane.normal) / denom;
        (t >= 0.0 && t.is_finite()).then_some(t)
    }
}

/// Screen point to world point on `plane`. A miss is an ordinary `None`.
pub fn pick(
    screen_x: f32,
    screen_y: f32,
    viewport_w: f32,
    viewport_h: f32,
    camera: &Camera,
    plane: &Plane,
) -> Option<Vec3> {
    let ray = Ray::from_screen(screen_x, screen_y, viewport_w, viewport_h, camera)?;
    let t = ray.intersect_plane(plane)?;
    Some(ray.at(t))
}
