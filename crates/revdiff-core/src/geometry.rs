//! Centroids, shape signatures and displacement

use crate::types::{DrawingObject, Point};

/// Structural fingerprint of an object's geometry: point count plus the
/// ordered lengths of consecutive segments. A point fixture is count 1 with
/// no segments.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSignature {
    pub point_count: usize,
    pub segment_lengths: Vec<f64>,
}

impl ShapeSignature {
    pub fn of(object: &DrawingObject) -> Self {
        let segment_lengths = object
            .points
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .collect();
        Self {
            point_count: object.points.len(),
            segment_lengths,
        }
    }

    /// Compatible shapes have equal point counts. Only compatible pairs can
    /// be measured for displacement; incompatible pairs are structurally
    /// different regardless of position.
    pub fn compatible(&self, other: &Self) -> bool {
        self.point_count == other.point_count
    }
}

/// Arithmetic mean of an object's geometry points.
///
/// Geometry has at least one point (enforced by `Revision::validate`).
pub fn centroid(object: &DrawingObject) -> Point {
    let n = object.points.len().max(1) as f64;
    let (sum_x, sum_y) = object
        .points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sum_x / n, sum_y / n)
}

/// Euclidean distance between centroids, defined only for shape-compatible
/// objects. `None` means the pair cannot be measured and the caller must
/// branch on compatibility instead.
pub fn displacement(a: &DrawingObject, b: &DrawingObject) -> Option<f64> {
    let sig_a = ShapeSignature::of(a);
    let sig_b = ShapeSignature::of(b);
    if !sig_a.compatible(&sig_b) {
        return None;
    }
    Some(centroid(a).distance(&centroid(b)))
}
