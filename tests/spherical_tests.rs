// Host-side tests for the spherical conversion helpers.

use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::PI;
use yard_core::*;

#[test]
fn round_trip_recovers_random_offsets() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..2000 {
        let v = Vec3::new(
            rng.gen_range(-500.0..500.0),
            rng.gen_range(-500.0..500.0),
            rng.gen_range(-500.0..500.0),
        );
        if v.length() < 1e-3 {
            continue;
        }
        let back = to_cartesian(to_spherical(v));
        let tol = 1e-4 * v.length().max(1.0);
        assert!(
            (back - v).length() < tol,
            "round trip drifted: {v:?} -> {back:?}"
        );
    }
}

#[test]
fn round_trip_along_axes() {
    for v in [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y * 3.0,
        Vec3::NEG_Y * 2.0,
        Vec3::Z * 10.0,
        Vec3::NEG_Z,
    ] {
        let back = to_cartesian(to_spherical(v));
        assert!((back - v).length() < 1e-5, "{v:?} -> {back:?}");
    }
}

#[test]
fn spherical_angles_follow_y_up_convention() {
    let s = to_spherical(Vec3::new(0.0, 50.0, 50.0));
    assert!((s.radius - 70.710_68).abs() < 1e-3);
    assert!((s.polar - PI / 4.0).abs() < 1e-5);
    assert_eq!(s.azimuth, 0.0);

    let side = to_spherical(Vec3::new(5.0, 0.0, 0.0));
    assert!((side.polar - PI / 2.0).abs() < 1e-5);
    assert!((side.azimuth - PI / 2.0).abs() < 1e-5);
}

#[test]
fn zero_offset_maps_to_zero_radius() {
    let s = to_spherical(Vec3::ZERO);
    assert_eq!(s, SphericalOffset::new(0.0, 0.0, 0.0));
}

#[test]
fn clamp_polar_keeps_away_from_poles() {
    for eps in [1e-3, 1e-6] {
        for p in [-1.0, 0.0, eps, PI - eps, PI, 10.0] {
            let c = clamp_polar(p, eps);
            assert!(c > eps && c < PI - eps, "clamp_polar({p}, {eps}) = {c}");
            assert!(polar_in_band(c, eps));
        }
        assert_eq!(clamp_polar(1.0, eps), 1.0);
    }
}

#[test]
fn polar_band_excludes_its_bounds() {
    let eps = 1e-6;
    assert!(!polar_in_band(eps, eps));
    assert!(!polar_in_band(PI - eps, eps));
    assert!(!polar_in_band(0.0, eps));
    assert!(polar_in_band(PI / 2.0, eps));
}

#[test]
fn polar_near_the_pole_is_not_lost() {
    // 1e-6 rad off +Y at the default camera distance
    let s = to_spherical(Vec3::new(0.0, 70.710_68, 7.071_068e-5));
    assert!(s.polar > 5e-7 && s.polar < 2e-6, "polar {}", s.polar);
    let s = to_spherical(Vec3::new(7.071_068e-5, -70.710_68, 0.0));
    assert!(s.polar < PI && PI - s.polar < 2e-6, "polar {}", s.polar);
}

#[test]
fn clamp_radius_respects_bounds() {
    assert_eq!(clamp_radius(0.2, 1.0, 1000.0), 1.0);
    assert_eq!(clamp_radius(5000.0, 1.0, 1000.0), 1000.0);
    assert_eq!(clamp_radius(70.0, 1.0, 1000.0), 70.0);
}
