// Host-side tests for input routing, marker placement and the marker store.

use glam::{Vec2, Vec3};
use std::cell::RefCell;
use std::rc::Rc;
use yard_core::*;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn router_with(position: Vec3, placement: PlacementParams) -> InputRouter {
    init_logs();
    let viewport = Viewport::new(800.0, 600.0).unwrap();
    let pose = CameraPose {
        position,
        target: Vec3::ZERO,
    };
    let controller = OrbitController::new(
        Camera::new(pose, viewport.aspect()),
        viewport,
        OrbitParams::default(),
    )
    .unwrap();
    InputRouter::new(controller, placement).unwrap()
}

fn default_router() -> InputRouter {
    router_with(Vec3::new(0.0, 50.0, 50.0), PlacementParams::default())
}

fn tap(router: &mut InputRouter, store: &mut MarkerStore, x: f32, y: f32) -> Option<Marker> {
    router.handle(
        ViewportEvent::PointerDown {
            button: PointerButton::Primary,
            x,
            y,
        },
        store,
    );
    router.handle(
        ViewportEvent::PointerUp {
            button: PointerButton::Primary,
            x,
            y,
        },
        store,
    )
}

fn expected_hit(router: &InputRouter, x: f32, y: f32) -> Vec3 {
    let c = router.controller();
    let v = c.viewport();
    pick(x, y, v.width, v.height, c.camera(), router.ground()).unwrap()
}

#[test]
fn three_taps_place_three_sprinklers_at_pick_points() {
    let mut router = default_router();
    let mut store = MarkerStore::new();
    router.set_placement(Some(MarkerKind::Sprinkler));

    let points = [(400.0, 300.0), (300.0, 250.0), (500.0, 350.0)];
    for (x, y) in points {
        assert!(tap(&mut router, &mut store, x, y).is_some());
    }

    assert_eq!(store.len(), 3);
    for (marker, (x, y)) in store.all().iter().zip(points) {
        let hit = expected_hit(&router, x, y);
        assert_eq!(marker.kind(), MarkerKind::Sprinkler);
        assert!((marker.position() - Vec2::new(hit.x, hit.z)).length() < 1e-4);
    }
}

#[test]
fn tap_on_the_sky_adds_nothing() {
    let mut router = router_with(Vec3::new(0.0, 5.0, 50.0), PlacementParams::default());
    let mut store = MarkerStore::new();
    router.set_placement(Some(MarkerKind::Gas));
    tap(&mut router, &mut store, 400.0, 300.0);
    let before = store.len();

    assert_eq!(tap(&mut router, &mut store, 400.0, 0.0), None);
    assert_eq!(store.len(), before);
}

#[test]
fn drags_do_not_place_markers() {
    let mut router = default_router();
    let mut store = MarkerStore::new();
    router.set_placement(Some(MarkerKind::Electrical));

    router.handle(
        ViewportEvent::PointerDown {
            button: PointerButton::Primary,
            x: 100.0,
            y: 100.0,
        },
        &mut store,
    );
    router.handle(ViewportEvent::PointerMove { x: 200.0, y: 100.0 }, &mut store);
    let placed = router.handle(
        ViewportEvent::PointerUp {
            button: PointerButton::Primary,
            x: 200.0,
            y: 100.0,
        },
        &mut store,
    );
    assert_eq!(placed, None);
    assert!(store.is_empty());
    assert_eq!(router.controller().state(), InteractionState::Idle);
}

#[test]
fn small_jitter_still_counts_as_a_tap() {
    let mut router = default_router();
    let mut store = MarkerStore::new();
    router.set_placement(Some(MarkerKind::Sprinkler));
    let press = ViewportEvent::PointerDown {
        button: PointerButton::Primary,
        x: 400.0,
        y: 300.0,
    };
    router.handle(press, &mut store);
    router.handle(ViewportEvent::PointerMove { x: 402.0, y: 301.0 }, &mut store);
    let placed = router.handle(
        ViewportEvent::PointerUp {
            button: PointerButton::Primary,
            x: 402.0,
            y: 301.0,
        },
        &mut store,
    );
    assert!(placed.is_some());
    assert_eq!(store.len(), 1);
}

#[test]
fn placement_tap_with_jitter_leaves_the_camera_still() {
    let mut router = default_router();
    let mut store = MarkerStore::new();
    router.set_placement(Some(MarkerKind::Gas));
    let pose = router.controller().pose();

    router.handle(
        ViewportEvent::PointerDown {
            button: PointerButton::Primary,
            x: 400.0,
            y: 300.0,
        },
        &mut store,
    );
    for (x, y) in [(401.0, 300.0), (403.0, 302.0), (402.0, 301.0)] {
        router.handle(ViewportEvent::PointerMove { x, y }, &mut store);
        assert!(router.controller().pending().is_identity());
        router.tick();
    }
    let placed = router.handle(
        ViewportEvent::PointerUp {
            button: PointerButton::Primary,
            x: 402.0,
            y: 301.0,
        },
        &mut store,
    );
    router.tick();

    assert!(placed.is_some());
    let after = router.controller().pose();
    assert!((after.position - pose.position).length() < 1e-4);
    assert_eq!(after.target, pose.target);
}

#[test]
fn leaving_the_tap_radius_rotates_by_the_whole_travel() {
    let mut router = default_router();
    let mut store = MarkerStore::new();
    router.set_placement(Some(MarkerKind::Sprinkler));

    router.handle(
        ViewportEvent::PointerDown {
            button: PointerButton::Primary,
            x: 400.0,
            y: 300.0,
        },
        &mut store,
    );
    router.handle(ViewportEvent::PointerMove { x: 403.0, y: 300.0 }, &mut store);
    router.handle(ViewportEvent::PointerMove { x: 420.0, y: 300.0 }, &mut store);
    let expected = -std::f32::consts::TAU * 20.0 / 600.0;
    let pending = router.controller().pending().d_azimuth;
    assert!((pending - expected).abs() < 1e-6, "d_azimuth {pending}");

    // back inside the radius the gesture keeps rotating
    router.handle(ViewportEvent::PointerMove { x: 401.0, y: 300.0 }, &mut store);
    let back = -std::f32::consts::TAU * 1.0 / 600.0;
    let pending = router.controller().pending().d_azimuth;
    assert!((pending - back).abs() < 1e-6, "d_azimuth {pending}");
}

#[test]
fn without_a_placement_type_jitter_still_rotates() {
    let mut router = default_router();
    let mut store = MarkerStore::new();
    router.handle(
        ViewportEvent::PointerDown {
            button: PointerButton::Primary,
            x: 400.0,
            y: 300.0,
        },
        &mut store,
    );
    router.handle(ViewportEvent::PointerMove { x: 402.0, y: 300.0 }, &mut store);
    assert!(!router.controller().pending().is_identity());
}

#[test]
fn no_placement_type_means_no_marker() {
    let mut router = default_router();
    let mut store = MarkerStore::new();
    assert_eq!(tap(&mut router, &mut store, 400.0, 300.0), None);

    router.set_placement(Some(MarkerKind::Gas));
    router.set_placement(None);
    assert_eq!(tap(&mut router, &mut store, 400.0, 300.0), None);
    assert!(store.is_empty());
}

#[test]
fn only_primary_taps_place() {
    let mut router = default_router();
    let mut store = MarkerStore::new();
    router.set_placement(Some(MarkerKind::Sprinkler));
    for button in [PointerButton::Secondary, PointerButton::Auxiliary] {
        router.handle(ViewportEvent::PointerDown { button, x: 400.0, y: 300.0 }, &mut store);
        router.handle(ViewportEvent::PointerUp { button, x: 400.0, y: 300.0 }, &mut store);
    }
    assert!(store.is_empty());
}

#[test]
fn hits_outside_the_yard_are_rejected() {
    let mut bounded = default_router();
    let mut store = MarkerStore::new();
    bounded.set_placement(Some(MarkerKind::Sprinkler));
    assert_eq!(tap(&mut bounded, &mut store, 400.0, 10.0), None);
    assert!(store.is_empty());

    let mut open = router_with(
        Vec3::new(0.0, 50.0, 50.0),
        PlacementParams {
            ground_half_extent: None,
            ..PlacementParams::default()
        },
    );
    open.set_placement(Some(MarkerKind::Sprinkler));
    let far = tap(&mut open, &mut store, 400.0, 10.0).unwrap();
    assert!(far.position().y < -50.0);
}

#[test]
fn non_finite_release_is_ignored() {
    let mut router = default_router();
    let mut store = MarkerStore::new();
    router.set_placement(Some(MarkerKind::Sprinkler));
    router.handle(
        ViewportEvent::PointerDown {
            button: PointerButton::Primary,
            x: 400.0,
            y: 300.0,
        },
        &mut store,
    );
    let placed = router.handle(
        ViewportEvent::PointerUp {
            button: PointerButton::Primary,
            x: f32::NAN,
            y: 300.0,
        },
        &mut store,
    );
    assert_eq!(placed, None);
    assert_eq!(router.controller().state(), InteractionState::Idle);
}

#[test]
fn wheel_and_resize_reach_the_controller() {
    let mut router = default_router();
    let mut store = MarkerStore::new();
    let r0 = router.controller().pose().distance();
    router.handle(ViewportEvent::Wheel { delta_y: 120.0 }, &mut store);
    router.handle(
        ViewportEvent::Resize {
            width: 1000.0,
            height: 500.0,
        },
        &mut store,
    );
    assert!(router.tick());
    assert!(router.controller().pose().distance() > r0);
    assert_eq!(router.controller().camera().aspect, 2.0);
}

#[test]
fn observers_hear_placements_and_mode_changes() {
    let mut router = default_router();
    let mut store = MarkerStore::new();
    let seen: Rc<RefCell<Vec<LayoutEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let id = {
        let seen = seen.clone();
        router.subscribe(move |ev| seen.borrow_mut().push(*ev))
    };

    router.set_placement(Some(MarkerKind::Gas));
    router.set_placement(Some(MarkerKind::Gas));
    let marker = tap(&mut router, &mut store, 400.0, 300.0).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            LayoutEvent::PlacementChanged(Some(MarkerKind::Gas)),
            LayoutEvent::MarkerPlaced { index: 0, marker },
        ]
    );

    assert!(router.unsubscribe(id));
    assert!(!router.unsubscribe(id));
    tap(&mut router, &mut store, 410.0, 300.0);
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(store.len(), 2);
}

#[test]
fn store_exports_type_x_z_records() {
    let mut store = MarkerStore::new();
    store.append(Marker::new(MarkerKind::Sprinkler, Vec2::new(1.5, -2.0)));
    store.append(Marker::new(MarkerKind::Electrical, Vec2::new(0.0, 4.25)));

    let json: serde_json::Value = serde_json::from_str(&store.to_json().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"type": "sprinkler", "x": 1.5, "z": -2.0},
            {"type": "electrical", "x": 0.0, "z": 4.25},
        ])
    );
    assert_eq!(store.all()[1].anchor(1.0), Vec3::new(0.0, 1.0, 4.25));
}

#[test]
fn loading_a_layout_replaces_markers() {
    let mut store = MarkerStore::new();
    store.append(Marker::new(MarkerKind::Gas, Vec2::ZERO));

    let loaded = store
        .load_json(r#"[{"type":"sprinkler","x":3.0,"z":4.0},{"type":"gas","x":-1.0,"z":0.5}]"#)
        .unwrap();
    assert_eq!(loaded, 2);
    assert_eq!(store.all()[0], Marker::new(MarkerKind::Sprinkler, Vec2::new(3.0, 4.0)));

    assert!(store.load_json(r#"[{"type":"water","x":0,"z":0}]"#).is_err());
    assert_eq!(store.len(), 2, "a failed load keeps the current layout");

    store.clear();
    assert!(store.is_empty());
}

#[test]
fn marker_kinds_parse_from_ui_strings() {
    assert_eq!("sprinkler".parse::<MarkerKind>(), Ok(MarkerKind::Sprinkler));
    assert_eq!(" Electrical ".parse::<MarkerKind>(), Ok(MarkerKind::Electrical));
    assert_eq!("GAS".parse::<MarkerKind>(), Ok(MarkerKind::Gas));
    assert_eq!(
        "water".parse::<MarkerKind>(),
        Err(MarkerKindError("water".to_string()))
    );
    for kind in MarkerKind::ALL {
        assert_eq!(kind.to_string().parse::<MarkerKind>(), Ok(kind));
        assert!(!kind.label().is_empty());
    }
}

#[test]
fn invalid_placement_params_are_rejected() {
    init_logs();
    let controller = OrbitController::new(
        Camera::default(),
        Viewport::new(800.0, 600.0).unwrap(),
        OrbitParams::default(),
    )
    .unwrap();
    let params = PlacementParams {
        ground_half_extent: Some(-3.0),
        ..PlacementParams::default()
    };
    assert!(matches!(
        InputRouter::new(controller, params),
        Err(ConfigurationError::InvalidParam {
            name: "ground_half_extent",
            ..
        })
    ));
}
