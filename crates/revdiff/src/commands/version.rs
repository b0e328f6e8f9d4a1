pub fn run() -> anyhow::Result<()> {
    println!("revdiff {}", env!("CARGO_PKG_VERSION"));
    println!("Drawing revision diff engine with job telemetry");
    Ok(())
}
