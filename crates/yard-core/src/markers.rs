//! Placed utility markers and the append-only store that holds them.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Sprinkler,
    Electrical,
    Gas,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 3] = [MarkerKind::Sprinkler, MarkerKind::Electrical, MarkerKind::Gas];

    pub fn as_str(self) -> &'static str {
        match self {
            MarkerKind::Sprinkler => "sprinkler",
            MarkerKind::Electrical => "electrical",
            MarkerKind::Gas => "gas",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarkerKind::Sprinkler => "Sprinkler Head",
            MarkerKind::Electrical => "Electrical Line",
            MarkerKind::Gas => "Gas Line",
        }
    }

    /// Display colour used by the renderer for icons and line segments.
    pub fn color_rgb(self) -> [f32; 3] {
        match self {
            MarkerKind::Sprinkler => [0.0, 0.0, 1.0],  // blue
            MarkerKind::Electrical => [1.0, 0.65, 0.0], // orange
            MarkerKind::Gas => [1.0, 1.0, 0.0],         // yellow
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown marker type `{0}`")]
pub struct MarkerKindError(pub String);

impl FromStr for MarkerKind {
    type Err = MarkerKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarkerKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MarkerKindError(s.to_string()))
    }
}

/// A marker on the ground plane. `position` is (world x, world z).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    kind: MarkerKind,
    position: Vec2,
}

impl Marker {
    pub fn new(kind: MarkerKind, position: Vec2) -> Self {
        Self { kind, position }
    }

    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// World point where the renderer draws the marker icon.
    pub fn anchor(&self, icon_height: f32) -> Vec3 {
        Vec3::new(self.position.x, icon_height, self.position.y)
    }

    pub fn record(&self) -> MarkerRecord {
        MarkerRecord {
            kind: self.kind,
            x: self.position.x,
            z: self.position.y,
        }
    }
}

/// Flat `{type, x, z}` shape handed to whatever saves the layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    #[serde(rename = "type")]
    pub kind: MarkerKind,
    pub x: f32,
    pub z: f32,
}

impl From<MarkerRecord> for Marker {
    fn from(r: MarkerRecord) -> Self {
        Marker::new(r.kind, Vec2::new(r.x, r.z))
    }
}

#[derive(Clone, Debug, Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the new marker.
    pub fn append(&mut self, marker: Marker) -> usize {
        self.markers.push(marker);
        self.markers.len() - 1
    }

    pub fn all(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn records(&self) -> Vec<MarkerRecord> {
        self.markers.iter().map(Marker::record).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.records())
    }

    /// Replace the contents with a previously saved layout. Non-finite
    /// coordinates are skipped; returns how many markers were loaded.
    pub fn load_records(&mut self, records: impl IntoIterator<Item = MarkerRecord>) -> usize {
        self.clear();
        for r in records {
            if r.x.is_finite() && r.z.is_finite() {
                self.append(r.into());
            } else {
                log::warn!("[markers] skipping {} marker at ({}, {})", r.kind, r.x, r.z);
            }
        }
        self.markers.len()
    }

    pub fn load_json(&mut self, json: &str) -> serde_json::Result<usize> {
        let records: Vec<MarkerRecord> = serde_json::from_str(json)?;
        Ok(self.load_records(records))
    }
}
