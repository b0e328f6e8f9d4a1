//! Telemetry record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final outcome of one comparison job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobOutcome {
    Success,
    Failure,
}

/// Object-change counts reported by one completed job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub added: u64,
    pub removed: u64,
    pub moved: u64,
}

impl ChangeCounts {
    pub fn new(added: u64, removed: u64, moved: u64) -> Self {
        Self {
            added,
            removed,
            moved,
        }
    }

    pub fn total(&self) -> u64 {
        self.added + self.removed + self.moved
    }

    pub fn accumulate(&mut self, other: &ChangeCounts) {
        self.added += other.added;
        self.removed += other.removed;
        self.moved += other.moved;
    }
}

/// One finalized comparison job, immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub started_at: DateTime<Utc>,
    pub duration_seconds: f64,
    pub outcome: JobOutcome,
    #[serde(default)]
    pub changes: ChangeCounts,
}

/// A percentile that may not be computable yet.
///
/// "No data" is deliberately distinct from a numeric zero: a default of 0.0
/// would be indistinguishable from a genuinely fast job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Percentile {
    Value(f64),
    NoData,
}

impl Percentile {
    pub fn value(&self) -> Option<f64> {
        match self {
            Percentile::Value(v) => Some(*v),
            Percentile::NoData => None,
        }
    }
}

impl From<Option<f64>> for Percentile {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Percentile::Value(v),
            None => Percentile::NoData,
        }
    }
}

impl Serialize for Percentile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Percentile::Value(v) => serializer.serialize_f64(*v),
            Percentile::NoData => serializer.serialize_str("no data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_counts_total_and_accumulate() {
        let mut totals = ChangeCounts::default();
        totals.accumulate(&ChangeCounts::new(2, 1, 3));
        totals.accumulate(&ChangeCounts::new(1, 0, 0));
        assert_eq!(totals, ChangeCounts::new(3, 1, 3));
        assert_eq!(totals.total(), 7);
    }

    #[test]
    fn test_percentile_serialization() {
        assert_eq!(
            serde_json::to_string(&Percentile::Value(1.5)).unwrap(),
            "1.5"
        );
        assert_eq!(
            serde_json::to_string(&Percentile::NoData).unwrap(),
            "\"no data\""
        );
    }

    #[test]
    fn test_job_record_roundtrip() {
        let record = JobRecord {
            job_id: "HPI-L3-0001".to_string(),
            started_at: Utc::now(),
            duration_seconds: 1.25,
            outcome: JobOutcome::Success,
            changes: ChangeCounts::new(2, 0, 1),
        };

        let json = serde_json::to_string(&record).unwrap();
        let parsed: JobRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.job_id, record.job_id);
        assert_eq!(parsed.outcome, JobOutcome::Success);
        assert_eq!(parsed.changes, record.changes);
    }
}
