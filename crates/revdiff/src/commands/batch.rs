//! Batch comparison via a bounded worker pool feeding shared telemetry

use anyhow::Context;
use chrono::Utc;
use revdiff_core::{compute_diff, DiffConfig, DiffResult};
use revdiff_telemetry::{
    evaluate, ChangeCounts, HealthReport, HealthThresholds, JobOutcome, JobRecord,
    MetricsSnapshot, Recorder,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::thread;

use super::diff::load_revision;

#[derive(Debug, Deserialize)]
struct Manifest {
    pairs: Vec<PairSpec>,
}

#[derive(Debug, Deserialize)]
struct PairSpec {
    id: String,
    a: PathBuf,
    b: PathBuf,
}

/// Per-job output file: the finalized job record plus its diff.
#[derive(Debug, Serialize)]
struct ResultRecord {
    #[serde(flatten)]
    job: JobRecord,
    diff: DiffResult,
}

#[derive(Debug, Serialize)]
struct BatchReport {
    processed: usize,
    metrics: MetricsSnapshot,
    health: HealthReport,
}

pub fn run(
    manifest_path: &str,
    concurrency: usize,
    out_dir: &str,
    epsilon: Option<f64>,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(manifest_path)
        .with_context(|| format!("reading manifest {}", manifest_path))?;
    let manifest: Manifest =
        serde_json::from_str(&raw).with_context(|| format!("parsing manifest {}", manifest_path))?;
    if manifest.pairs.is_empty() {
        anyhow::bail!("manifest has no pairs");
    }

    let results_dir = Path::new(out_dir).join("results");
    std::fs::create_dir_all(&results_dir)
        .with_context(|| format!("creating results directory {}", results_dir.display()))?;

    let config = match epsilon {
        Some(e) => DiffConfig::with_move_epsilon(e),
        None => DiffConfig::default(),
    };
    let recorder = Recorder::default();
    let processed = manifest.pairs.len();
    let workers = concurrency.clamp(1, processed);
    tracing::info!(pairs = processed, workers, "starting batch");

    let queue = Mutex::new(manifest.pairs.into_iter());
    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| loop {
                let next = queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .next();
                let Some(pair) = next else { break };
                process_pair(&pair, &config, &recorder, &results_dir);
            });
        }
    });

    let metrics = recorder.snapshot();
    let health = evaluate(&metrics, &HealthThresholds::default());
    let report = BatchReport {
        processed,
        metrics,
        health,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn process_pair(pair: &PairSpec, config: &DiffConfig, recorder: &Recorder, results_dir: &Path) {
    // Capture the job id before touching any input, so every failure path
    // can report it.
    let started_at = Utc::now();
    let guard = recorder.start_job(pair.id.as_str());

    let diff = match compare_pair(pair, config) {
        Ok(diff) => diff,
        Err(e) => {
            tracing::warn!(job_id = %pair.id, error = ?e, "job failed");
            // Dropping the guard records the failure with the elapsed time.
            return;
        }
    };
    let changes = ChangeCounts::new(
        diff.added.len() as u64,
        diff.removed.len() as u64,
        diff.moved.len() as u64,
    );

    // Finish before persisting, so the result file carries the same
    // duration the telemetry buffer recorded.
    let duration = guard.finish(JobOutcome::Success, changes);
    tracing::info!(job_id = %pair.id, duration_seconds = duration, "job succeeded");

    let record = ResultRecord {
        job: JobRecord {
            job_id: pair.id.clone(),
            started_at,
            duration_seconds: duration,
            outcome: JobOutcome::Success,
            changes,
        },
        diff,
    };
    if let Err(e) = write_record(&record, results_dir) {
        tracing::warn!(job_id = %pair.id, error = ?e, "failed to write result file");
    }
}

fn compare_pair(pair: &PairSpec, config: &DiffConfig) -> anyhow::Result<DiffResult> {
    let revision_a = load_revision(&pair.a)?;
    let revision_b = load_revision(&pair.b)?;
    Ok(compute_diff(&revision_a, &revision_b, config))
}

fn write_record(record: &ResultRecord, results_dir: &Path) -> anyhow::Result<()> {
    let path = results_dir.join(format!("{}.json", record.job.job_id));
    std::fs::write(&path, serde_json::to_string_pretty(record)?)
        .with_context(|| format!("writing result file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_revision(path: &Path, body: &str) {
        fs::write(path, body).unwrap();
    }

    #[test]
    fn test_batch_processes_pairs_and_records_failures() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        write_revision(&a, r#"[{"id": 1, "type": "wall", "points": [[0, 0], [0, 5]]}]"#);
        write_revision(&b, r#"[{"id": 1, "type": "wall", "points": [[3, 0], [3, 5]]}]"#);

        let manifest_path = dir.path().join("manifest.json");
        let manifest = serde_json::json!({
            "pairs": [
                {"id": "ok-job", "a": a, "b": b},
                {"id": "bad-job", "a": dir.path().join("missing.json"), "b": b}
            ]
        });
        fs::write(&manifest_path, manifest.to_string()).unwrap();

        let out = dir.path().to_str().unwrap().to_string();
        run(manifest_path.to_str().unwrap(), 2, &out, Some(0.5)).unwrap();

        // The good pair produced a result file with the job envelope.
        let result_path = dir.path().join("results").join("ok-job.json");
        let record: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&result_path).unwrap()).unwrap();
        assert_eq!(record["job_id"], "ok-job");
        assert_eq!(record["outcome"], "success");
        assert_eq!(record["diff"]["moved"].as_array().unwrap().len(), 1);
        assert!(record["diff"]["summary"]
            .as_str()
            .unwrap()
            .contains("1 objects moved"));

        // The bad pair never wrote a result.
        assert!(!dir.path().join("results").join("bad-job.json").exists());
    }

    #[test]
    fn test_result_file_duration_matches_recorded_duration() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        write_revision(&a, r#"[{"id": 1, "type": "wall", "points": [[0, 0], [0, 5]]}]"#);
        write_revision(&b, r#"[{"id": 1, "type": "wall", "points": [[3, 0], [3, 5]]}]"#);
        let results_dir = dir.path().join("results");
        fs::create_dir_all(&results_dir).unwrap();

        let recorder = Recorder::default();
        let pair = PairSpec {
            id: "job-1".to_string(),
            a,
            b,
        };
        process_pair(
            &pair,
            &DiffConfig::with_move_epsilon(0.5),
            &recorder,
            &results_dir,
        );

        // The persisted record and the telemetry buffer report the same
        // measured duration for the job.
        let record: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(results_dir.join("job-1.json")).unwrap(),
        )
        .unwrap();
        let file_duration = record["duration_seconds"].as_f64().unwrap();
        assert_eq!(recorder.percentile(100.0), Some(file_duration));
        assert_eq!(record["outcome"], "success");
    }

    #[test]
    fn test_empty_manifest_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("manifest.json");
        fs::write(&manifest_path, r#"{"pairs": []}"#).unwrap();

        let out = dir.path().to_str().unwrap().to_string();
        let err = run(manifest_path.to_str().unwrap(), 2, &out, None).unwrap_err();
        assert!(err.to_string().contains("no pairs"));
    }
}
