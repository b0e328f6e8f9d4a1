//! Change classification for matched and unmatched objects

use crate::config::DiffConfig;
use crate::geometry::{centroid, ShapeSignature};
use crate::matcher::match_revisions;
use crate::summary::summarize;
use crate::types::{DrawingObject, Revision};
use serde::{Deserialize, Serialize};

/// A matched pair whose centroid displacement exceeded the move threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovedObject {
    pub before: DrawingObject,
    pub after: DrawingObject,
    pub displacement: f64,
    /// Always false: a shape change is surfaced as removed + added, never
    /// as a move, so only identity-preserving moves reach this entry.
    pub shape_changed: bool,
}

/// Classified differences between two revisions.
///
/// Every object from either input revision lands in exactly one of
/// added / removed / moved (as before- or after-side) / unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffResult {
    pub added: Vec<DrawingObject>,
    pub removed: Vec<DrawingObject>,
    pub moved: Vec<MovedObject>,
    pub unchanged_count: usize,
    pub summary: String,
}

/// Compare two revisions and classify every object.
///
/// Pure and deterministic: identical inputs always produce an identical
/// result. Matching is by id only (see `match_revisions`); a matched pair
/// with incompatible shapes is a replacement, surfaced as removed + added.
pub fn compute_diff(a: &Revision, b: &Revision, config: &DiffConfig) -> DiffResult {
    let partition = match_revisions(a, b);

    let mut added = partition.only_in_b;
    let mut removed = partition.only_in_a;
    let mut moved = Vec::new();
    let mut unchanged_count = 0;

    for (before, after) in partition.matched {
        let sig_before = ShapeSignature::of(&before);
        let sig_after = ShapeSignature::of(&after);

        if !sig_before.compatible(&sig_after) {
            // Shape change is a replacement, not a move.
            removed.push(before);
            added.push(after);
            continue;
        }

        let d = centroid(&before).distance(&centroid(&after));
        if d <= config.move_epsilon {
            unchanged_count += 1;
        } else {
            moved.push(MovedObject {
                before,
                after,
                displacement: d,
                shape_changed: false,
            });
        }
    }

    let summary = summarize(added.len(), removed.len(), moved.len());
    DiffResult {
        added,
        removed,
        moved,
        unchanged_count,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ObjectKind, Point};

    fn wall(id: &str, points: Vec<Point>) -> DrawingObject {
        DrawingObject::new(id, ObjectKind::Wall, points)
    }

    fn segment(id: &str, x: f64) -> DrawingObject {
        wall(id, vec![Point::new(x, 0.0), Point::new(x, 5.0)])
    }

    #[test]
    fn test_identical_revisions_are_unchanged() {
        let a = Revision::new(vec![segment("1", 0.0), segment("2", 10.0)]);
        let result = compute_diff(&a, &a.clone(), &DiffConfig::default());

        assert!(result.added.is_empty());
        assert!(result.removed.is_empty());
        assert!(result.moved.is_empty());
        assert_eq!(result.unchanged_count, 2);
        assert_eq!(result.summary, "No changes detected.");
    }

    #[test]
    fn test_move_threshold_is_inclusive() {
        let config = DiffConfig::with_move_epsilon(0.5);
        let a = Revision::new(vec![segment("1", 0.0)]);

        // Displacement exactly at the threshold stays unchanged.
        let at_threshold = Revision::new(vec![segment("1", 0.5)]);
        let result = compute_diff(&a, &at_threshold, &config);
        assert!(result.moved.is_empty());
        assert_eq!(result.unchanged_count, 1);

        // Just past the threshold classifies as moved.
        let past_threshold = Revision::new(vec![segment("1", 0.501)]);
        let result = compute_diff(&a, &past_threshold, &config);
        assert_eq!(result.moved.len(), 1);
        assert_eq!(result.unchanged_count, 0);
    }

    #[test]
    fn test_shape_change_precedence_over_coincident_centroids() {
        // Same centroid (0, 2.5), different point counts: replacement.
        let a = Revision::new(vec![wall(
            "1",
            vec![Point::new(0.0, 0.0), Point::new(0.0, 5.0)],
        )]);
        let b = Revision::new(vec![wall(
            "1",
            vec![Point::new(0.0, 0.0), Point::new(0.0, 2.5), Point::new(0.0, 5.0)],
        )]);

        let result = compute_diff(&a, &b, &DiffConfig::default());

        assert_eq!(result.removed.len(), 1);
        assert_eq!(result.added.len(), 1);
        assert!(result.moved.is_empty());
        assert_eq!(result.unchanged_count, 0);
    }

    #[test]
    fn test_pure_translation_keeps_shape() {
        let a = Revision::new(vec![segment("1", 0.0)]);
        let b = Revision::new(vec![segment("1", 3.0)]);

        let result = compute_diff(&a, &b, &DiffConfig::with_move_epsilon(0.5));

        assert_eq!(result.moved.len(), 1);
        assert_eq!(result.moved[0].displacement, 3.0);
        assert!(!result.moved[0].shape_changed);
        assert_eq!(result.summary, "1 objects moved.");
    }

    #[test]
    fn test_stretch_with_same_point_count_is_a_plain_move() {
        // Stretching one endpoint keeps the point count, so the pair stays
        // shape-compatible and classifies purely by displacement; only a
        // point-count change is a replacement, so shape_changed is false
        // on every moved entry.
        let a = Revision::new(vec![wall(
            "1",
            vec![Point::new(0.0, 0.0), Point::new(0.0, 5.0)],
        )]);
        let b = Revision::new(vec![wall(
            "1",
            vec![Point::new(0.0, 0.0), Point::new(0.0, 9.0)],
        )]);

        let result = compute_diff(&a, &b, &DiffConfig::with_move_epsilon(0.5));

        assert_eq!(result.moved.len(), 1);
        assert_eq!(result.moved[0].displacement, 2.0);
        assert!(!result.moved[0].shape_changed);
        assert!(result.added.is_empty());
        assert!(result.removed.is_empty());
    }

    #[test]
    fn test_partition_completeness() {
        let a = Revision::new(vec![
            segment("keep", 0.0),
            segment("move", 1.0),
            segment("drop", 2.0),
            segment("replace", 3.0),
        ]);
        let b = Revision::new(vec![
            segment("keep", 0.0),
            segment("move", 8.0),
            segment("new", 4.0),
            wall("replace", vec![Point::new(3.0, 0.0)]),
        ]);

        let result = compute_diff(&a, &b, &DiffConfig::with_move_epsilon(0.5));

        // "replace" changed point count: counted in both removed and added.
        assert_eq!(
            a.len(),
            result.removed.len() + result.moved.len() + result.unchanged_count
        );
        assert_eq!(
            b.len(),
            result.added.len() + result.moved.len() + result.unchanged_count
        );
    }

    #[test]
    fn test_identity_stable_under_reordering() {
        let a = Revision::new(vec![segment("1", 0.0), segment("2", 10.0)]);
        let b = Revision::new(vec![segment("2", 10.0), segment("1", 0.0)]);

        let result = compute_diff(&a, &b, &DiffConfig::default());

        assert_eq!(result.unchanged_count, 2);
        assert!(result.added.is_empty());
        assert!(result.removed.is_empty());
        assert!(result.moved.is_empty());
    }
}
