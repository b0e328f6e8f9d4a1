mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Diff { a, b, epsilon } => commands::diff::run(&a, &b, epsilon),
        Commands::Batch {
            manifest,
            concurrency,
            out,
            epsilon,
        } => commands::batch::run(&manifest, concurrency, &out, epsilon),
        Commands::Version => commands::version::run(),
    }
}
