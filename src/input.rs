use glam::Vec2;
use yard_core::{LayoutEvent, MarkerKind, MarkerKindError};

// DOM-free helpers for the viewport glue, kept pure so they can be tested on the host.

/// Pointer position relative to the canvas' top-left corner, in CSS pixels.
#[inline]
pub fn pointer_local_px(client_x: f32, client_y: f32, rect_left: f32, rect_top: f32) -> Vec2 {
    Vec2::new(client_x - rect_left, client_y - rect_top)
}

/// Placement selection coming from the tool panel. Empty or `"none"` clears it.
pub fn parse_placement(kind: Option<&str>) -> Result<Option<MarkerKind>, MarkerKindError> {
    match kind.map(str::trim) {
        None | Some("") => Ok(None),
        Some(k) if k.eq_ignore_ascii_case("none") => Ok(None),
        Some(k) => k.parse().map(Some),
    }
}

/// JSON message delivered to page callbacks for each layout event.
pub fn layout_event_json(event: &LayoutEvent) -> String {
    let value = match event {
        LayoutEvent::MarkerPlaced { index, marker } => serde_json::json!({
            "event": "marker-placed",
            "index": index,
            "label": marker.kind().label(),
            "color": marker.kind().color_rgb(),
            "marker": marker.record(),
        }),
        LayoutEvent::PlacementChanged(kind) => serde_json::json!({
            "event": "placement-changed",
            "type": kind.map(MarkerKind::as_str),
        }),
    };
    value.to_string()
}
