//! In-process job telemetry: bounded latency tracking and anomaly detection

mod health;
mod recorder;
mod types;

pub use health::{evaluate, HealthReport, HealthStatus, HealthThresholds};
pub use recorder::{
    JobGuard, MetricsSnapshot, PercentileSet, Recorder, DEFAULT_DURATION_CAPACITY,
};
pub use types::{ChangeCounts, JobOutcome, JobRecord, Percentile};
