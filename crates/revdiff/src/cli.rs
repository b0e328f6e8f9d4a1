use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "revdiff")]
#[command(version)]
#[command(about = "Compare drawing revisions and track job telemetry")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two revision JSON files and print the diff
    Diff {
        /// Path to revision A
        a: String,

        /// Path to revision B
        b: String,

        /// Minimum centroid displacement reported as a move
        #[arg(long)]
        epsilon: Option<f64>,
    },

    /// Process a manifest of revision pairs with a worker pool
    Batch {
        /// Path to the manifest JSON ({"pairs": [{"id", "a", "b"}]})
        manifest: String,

        /// Number of worker threads
        #[arg(short, long, default_value_t = 4)]
        concurrency: usize,

        /// Output directory for per-job result files
        #[arg(long, default_value = ".")]
        out: String,

        /// Minimum centroid displacement reported as a move
        #[arg(long)]
        epsilon: Option<f64>,
    },

    /// Print version information
    Version,
}
