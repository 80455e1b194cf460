// Host-side tests for the DOM-free viewport helpers.
// The web crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::{Vec2, Vec3};
use input::*;
use yard_core::{LayoutEvent, Marker, MarkerKind};

#[test]
fn pointer_position_is_relative_to_canvas_corner() {
    let p = pointer_local_px(250.0, 180.0, 50.0, 30.0);
    assert_eq!(p, Vec2::new(200.0, 150.0));
}

#[test]
fn pointer_position_outside_canvas_goes_negative() {
    let p = pointer_local_px(10.0, 5.0, 50.0, 30.0);
    assert!(p.x < 0.0 && p.y < 0.0);
}

#[test]
fn placement_strings_map_to_kinds() {
    assert_eq!(parse_placement(Some("sprinkler")), Ok(Some(MarkerKind::Sprinkler)));
    assert_eq!(parse_placement(Some("electrical")), Ok(Some(MarkerKind::Electrical)));
    assert_eq!(parse_placement(Some("gas")), Ok(Some(MarkerKind::Gas)));
}

#[test]
fn empty_or_none_clears_placement() {
    assert_eq!(parse_placement(None), Ok(None));
    assert_eq!(parse_placement(Some("")), Ok(None));
    assert_eq!(parse_placement(Some("  ")), Ok(None));
    assert_eq!(parse_placement(Some("None")), Ok(None));
}

#[test]
fn unknown_placement_is_an_error() {
    assert!(parse_placement(Some("water")).is_err());
}

#[test]
fn placed_marker_message_carries_record_and_label() {
    let marker = Marker::new(MarkerKind::Gas, Vec2::new(2.0, -3.5));
    let json = layout_event_json(&LayoutEvent::MarkerPlaced { index: 4, marker });
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["event"], "marker-placed");
    assert_eq!(value["index"], 4);
    assert_eq!(value["label"], "Gas Line");
    assert_eq!(value["color"], serde_json::json!([1.0, 1.0, 0.0]));
    assert_eq!(value["marker"]["type"], "gas");
    assert_eq!(value["marker"]["x"], 2.0);
    assert_eq!(value["marker"]["z"], -3.5);
    assert_eq!(marker.anchor(1.0), Vec3::new(2.0, 1.0, -3.5));
}

#[test]
fn placement_change_message_uses_ui_string() {
    let set = layout_event_json(&LayoutEvent::PlacementChanged(Some(MarkerKind::Electrical)));
    let value: serde_json::Value = serde_json::from_str(&set).unwrap();
    assert_eq!(value["event"], "placement-changed");
    assert_eq!(value["type"], "electrical");

    let cleared = layout_event_json(&LayoutEvent::PlacementChanged(None));
    let value: serde_json::Value = serde_json::from_str(&cleared).unwrap();
    assert!(value["type"].is_null());
}
