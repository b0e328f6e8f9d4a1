use anyhow::Context;
use revdiff_core::{compute_diff, DiffConfig, Revision};
use std::path::Path;

pub fn run(a: &str, b: &str, epsilon: Option<f64>) -> anyhow::Result<()> {
    let config = match epsilon {
        Some(e) => DiffConfig::with_move_epsilon(e),
        None => DiffConfig::default(),
    };

    let revision_a = load_revision(Path::new(a))?;
    let revision_b = load_revision(Path::new(b))?;

    let result = compute_diff(&revision_a, &revision_b, &config);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub(crate) fn load_revision(path: &Path) -> anyhow::Result<Revision> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading revision file {}", path.display()))?;
    Revision::from_json(&raw).with_context(|| format!("parsing revision file {}", path.display()))
}
