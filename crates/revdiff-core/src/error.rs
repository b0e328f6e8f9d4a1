//! Error taxonomy for the diff engine

use thiserror::Error;

/// Errors surfaced to the caller of the diff engine.
///
/// An incompatible shape between two matched objects is not an error; it is
/// a normal classification outcome (removed + added). A partial diff over a
/// revision that failed to parse would be misleading, so parsing fails the
/// whole comparison.
#[derive(Debug, Error)]
pub enum DiffError {
    /// A revision failed to deserialize, or an object lacks required geometry.
    #[error("malformed revision: {0}")]
    MalformedRevision(String),
}
