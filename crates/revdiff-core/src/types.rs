//! Core types for drawing revisions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::DiffError;

/// Stable object identifier, unique within a revision.
///
/// Stored canonically as a string; integer ids in source documents are
/// accepted and normalized on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        ObjectId(s.to_string())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(i64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Num(n) => ObjectId(n.to_string()),
            Raw::Str(s) => ObjectId(s),
        })
    }
}

/// Kind of geometric construction object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ObjectKind {
    Wall,
    Door,
    Window,
    /// Any kind the engine does not recognize normalizes here.
    #[default]
    Other,
}

impl From<String> for ObjectKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "wall" => ObjectKind::Wall,
            "door" => ObjectKind::Door,
            "window" => ObjectKind::Window,
            _ => ObjectKind::Other,
        }
    }
}

/// A 2D point, serialized as a `[x, y]` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// One geometric entity in a drawing revision.
///
/// `points` holds at least one point for a valid object (a single point for
/// point-like fixtures, a polyline for walls); `Revision::validate` enforces
/// this at the parse boundary. Attributes are opaque to the diff engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingObject {
    pub id: ObjectId,
    #[serde(rename = "type", default)]
    pub kind: ObjectKind,
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl DrawingObject {
    pub fn new(id: impl Into<String>, kind: ObjectKind, points: Vec<Point>) -> Self {
        Self {
            id: ObjectId(id.into()),
            kind,
            points,
            attributes: HashMap::new(),
        }
    }
}

/// One snapshot of a drawing: an ordered sequence of objects.
///
/// Object order carries no semantic meaning; only presence and identity do.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision {
    pub objects: Vec<DrawingObject>,
}

impl Revision {
    pub fn new(objects: Vec<DrawingObject>) -> Self {
        Self { objects }
    }

    /// Parse a revision from a JSON document and validate its geometry.
    pub fn from_json(input: &str) -> Result<Self, DiffError> {
        let revision: Revision = serde_json::from_str(input)
            .map_err(|e| DiffError::MalformedRevision(e.to_string()))?;
        revision.validate()?;
        Ok(revision)
    }

    /// Check the geometry invariant: every object has at least one point.
    pub fn validate(&self) -> Result<(), DiffError> {
        for object in &self.objects {
            if object.points.is_empty() {
                return Err(DiffError::MalformedRevision(format!(
                    "object {} has no geometry points",
                    object.id
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
