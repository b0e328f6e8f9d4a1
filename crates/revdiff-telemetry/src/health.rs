//! Anomaly detection over metrics snapshots

use crate::recorder::MetricsSnapshot;
use serde::Serialize;

/// Thresholds for the health verdict.
#[derive(Debug, Clone)]
pub struct HealthThresholds {
    /// Flag when failed / completed exceeds this fraction.
    pub failure_rate: f64,
    /// Flag when running / (running + completed) exceeds this fraction.
    pub stalled_jobs: f64,
    /// Flag when the last job's change total exceeds this multiple of the
    /// historical per-job average.
    pub spike_multiplier: f64,
}

impl HealthThresholds {
    pub fn new() -> Self {
        Self {
            failure_rate: 0.1,
            stalled_jobs: 0.2,
            spike_multiplier: 10.0,
        }
    }
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Health verdict plus the list of triggered reasons.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub reasons: Vec<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Evaluate a snapshot against thresholds.
///
/// Stateless and re-derivable from any snapshot; never mutates aggregator
/// state. Ratios are undefined (and not flagged) until enough jobs exist:
/// failure rate needs at least one completed job, spike detection at least
/// two. "Healthy with no data yet" is a valid verdict, distinct from
/// degraded.
pub fn evaluate(snapshot: &MetricsSnapshot, thresholds: &HealthThresholds) -> HealthReport {
    let mut reasons = Vec::new();
    let completed = snapshot.completed();

    if completed > 0 {
        let failure_rate = snapshot.jobs_failed as f64 / completed as f64;
        if failure_rate > thresholds.failure_rate {
            reasons.push(format!("high failure rate: {:.1}%", failure_rate * 100.0));
        }
    }

    let in_flight_or_done = snapshot.jobs_running + completed;
    if in_flight_or_done > 0 {
        let stalled_ratio = snapshot.jobs_running as f64 / in_flight_or_done as f64;
        if stalled_ratio > thresholds.stalled_jobs {
            reasons.push(format!(
                "high stalled-job ratio: {:.1}%",
                stalled_ratio * 100.0
            ));
        }
    }

    if completed >= 2 {
        if let Some(last) = snapshot.last_job_changes {
            let average = snapshot.totals.total() as f64 / completed as f64;
            if average > 0.0 && last as f64 > thresholds.spike_multiplier * average {
                reasons.push(format!(
                    "change spike: last job changed {} objects vs {:.1} per-job average",
                    last, average
                ));
            }
        }
    }

    let status = if reasons.is_empty() {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };
    HealthReport { status, reasons }
}
