//! Revision diff engine: identity matching, change classification and summaries

mod classify;
mod config;
mod error;
mod geometry;
mod matcher;
mod summary;
mod types;

pub use classify::{compute_diff, DiffResult, MovedObject};
pub use config::{DiffConfig, DEFAULT_MOVE_EPSILON};
pub use error::DiffError;
pub use geometry::{centroid, displacement, ShapeSignature};
pub use matcher::{match_revisions, MatchPartition};
pub use summary::summarize;
pub use types::{DrawingObject, ObjectId, ObjectKind, Point, Revision};
