//! Bounded in-process metrics aggregation

use crate::types::{ChangeCounts, JobOutcome, Percentile};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Default capacity of the duration ring buffer.
pub const DEFAULT_DURATION_CAPACITY: usize = 1000;

/// Mutable aggregator state, guarded by the recorder's single lock.
#[derive(Debug, Default)]
struct MetricsState {
    /// Most recent completed-job durations in seconds, oldest first.
    durations: VecDeque<f64>,
    success: u64,
    failure: u64,
    running: u64,
    totals: ChangeCounts,
    last_job_changes: Option<u64>,
}

/// The p50/p95/p99 latency summary of a snapshot.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PercentileSet {
    pub p50: Percentile,
    pub p95: Percentile,
    pub p99: Percentile,
}

/// Point-in-time copy of the aggregator, taken under one lock acquisition
/// so percentiles and counts describe the same instant.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub percentiles: PercentileSet,
    pub jobs_success: u64,
    pub jobs_failed: u64,
    pub jobs_running: u64,
    pub totals: ChangeCounts,
    /// Change total of the most recently completed job, for spike detection.
    pub last_job_changes: Option<u64>,
}

impl MetricsSnapshot {
    pub fn completed(&self) -> u64 {
        self.jobs_success + self.jobs_failed
    }
}

/// Process-scoped telemetry aggregator.
///
/// State is instance-owned and reset on restart by design; there is no
/// cross-process coordination. All reads and writes are serialized through
/// one mutex, and nothing inside the critical sections blocks on I/O.
#[derive(Debug)]
pub struct Recorder {
    state: Mutex<MetricsState>,
    capacity: usize,
}

impl Recorder {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(MetricsState::default()),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, MetricsState> {
        // Updates cannot panic mid-write, so state behind a poisoned lock
        // is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark a job as in flight.
    pub fn record_start(&self, job_id: &str) {
        let mut state = self.lock();
        state.running += 1;
        tracing::debug!(job_id, running = state.running, "job started");
    }

    /// Record a completed job: duration, outcome and change counts.
    ///
    /// Safe under concurrent invocation from many in-flight jobs. The
    /// duration buffer holds at most `capacity` entries, oldest evicted.
    pub fn record_finish(
        &self,
        job_id: &str,
        duration_seconds: f64,
        outcome: JobOutcome,
        changes: ChangeCounts,
    ) {
        let mut state = self.lock();
        state.running = state.running.saturating_sub(1);
        match outcome {
            JobOutcome::Success => state.success += 1,
            JobOutcome::Failure => state.failure += 1,
        }
        state.durations.push_back(duration_seconds);
        while state.durations.len() > self.capacity {
            state.durations.pop_front();
        }
        state.totals.accumulate(&changes);
        state.last_job_changes = Some(changes.total());
        tracing::debug!(job_id, duration_seconds, ?outcome, "job finished");
    }

    /// Begin a scoped job: increments `running` and returns a guard that
    /// guarantees a matching finish on every exit path.
    pub fn start_job(&self, job_id: impl Into<String>) -> JobGuard<'_> {
        let job_id = job_id.into();
        self.record_start(&job_id);
        JobGuard {
            recorder: self,
            job_id,
            started: Instant::now(),
            finished: false,
        }
    }

    /// The `p`-th percentile of recorded durations, `p` in [0, 100].
    ///
    /// `None` when no job has completed yet. Sorting the buffer per query
    /// is deliberate: the buffer is small and queries are rare relative to
    /// completions.
    pub fn percentile(&self, p: f64) -> Option<f64> {
        let sorted = {
            let state = self.lock();
            sorted_durations(&state)
        };
        percentile_of(&sorted, p)
    }

    /// Immutable copy of counts, totals and p50/p95/p99, all taken under a
    /// single lock acquisition.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let state = self.lock();
        let sorted = sorted_durations(&state);
        MetricsSnapshot {
            percentiles: PercentileSet {
                p50: percentile_of(&sorted, 50.0).into(),
                p95: percentile_of(&sorted, 95.0).into(),
                p99: percentile_of(&sorted, 99.0).into(),
            },
            jobs_success: state.success,
            jobs_failed: state.failure,
            jobs_running: state.running,
            totals: state.totals,
            last_job_changes: state.last_job_changes,
        }
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_CAPACITY)
    }
}

fn sorted_durations(state: &MetricsState) -> Vec<f64> {
    let mut sorted: Vec<f64> = state.durations.iter().copied().collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

fn percentile_of(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 100.0);
    let idx = ((p / 100.0) * sorted.len() as f64).floor() as i64 - 1;
    let idx = idx.max(0) as usize;
    Some(sorted[idx.min(sorted.len() - 1)])
}

/// Scoped running-count increment for one job.
///
/// Call `finish` with the real outcome; dropping an unfinished guard (early
/// return, panic, timeout path) records a failure with the elapsed time, so
/// `running` can never stay inflated.
#[derive(Debug)]
pub struct JobGuard<'a> {
    recorder: &'a Recorder,
    job_id: String,
    started: Instant,
    finished: bool,
}

impl JobGuard<'_> {
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Finish the job, returning the measured duration in seconds.
    pub fn finish(mut self, outcome: JobOutcome, changes: ChangeCounts) -> f64 {
        let duration = self.elapsed_seconds();
        self.finished = true;
        self.recorder
            .record_finish(&self.job_id, duration, outcome, changes);
        duration
    }
}

impl Drop for JobGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.recorder.record_finish(
                &self.job_id,
                self.elapsed_seconds(),
                JobOutcome::Failure,
                ChangeCounts::default(),
            );
        }
    }
}
