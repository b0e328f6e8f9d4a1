//! Identity-based pairing of objects between two revisions

use crate::types::{DrawingObject, ObjectId, Revision};
use std::collections::{HashMap, HashSet};

/// Result of pairing revision A against revision B by object id.
#[derive(Debug, Default)]
pub struct MatchPartition {
    /// Pairs whose id is present in both revisions.
    pub matched: Vec<(DrawingObject, DrawingObject)>,
    /// Objects whose id appears only in A (plus A-side duplicates).
    pub only_in_a: Vec<DrawingObject>,
    /// Objects whose id appears only in B (plus B-side duplicates).
    pub only_in_b: Vec<DrawingObject>,
}

/// Pair objects between two revisions by stable id.
///
/// Identity is authoritative: no geometric similarity is used to guess a
/// match across differing ids, which keeps results deterministic. Ids are
/// expected to be unique within a revision; when one repeats, the first
/// occurrence (in input order) participates in matching and later
/// duplicates are treated as extra unmatched objects of that revision.
pub fn match_revisions(a: &Revision, b: &Revision) -> MatchPartition {
    let mut b_first: HashMap<&ObjectId, &DrawingObject> = HashMap::new();
    for object in &b.objects {
        b_first.entry(&object.id).or_insert(object);
    }

    let mut partition = MatchPartition::default();
    let mut matched_ids: HashSet<&ObjectId> = HashSet::new();
    let mut seen_a: HashSet<&ObjectId> = HashSet::new();

    for object in &a.objects {
        if !seen_a.insert(&object.id) {
            partition.only_in_a.push(object.clone());
            continue;
        }
        match b_first.get(&object.id) {
            Some(counterpart) => {
                matched_ids.insert(&object.id);
                partition
                    .matched
                    .push((object.clone(), (*counterpart).clone()));
            }
            None => partition.only_in_a.push(object.clone()),
        }
    }

    let mut seen_b: HashSet<&ObjectId> = HashSet::new();
    for object in &b.objects {
        if !seen_b.insert(&object.id) {
            partition.only_in_b.push(object.clone());
            continue;
        }
        if !matched_ids.contains(&object.id) {
            partition.only_in_b.push(object.clone());
        }
    }

    partition
}
