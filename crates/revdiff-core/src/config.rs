//! Diff engine configuration

/// Default minimum centroid displacement reported as a move, in drawing units.
pub const DEFAULT_MOVE_EPSILON: f64 = 0.01;

/// Tunables for change classification.
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Minimum centroid displacement for a matched pair to classify as
    /// moved. Displacements at or below this are sub-threshold jitter and
    /// classify as unchanged.
    pub move_epsilon: f64,
}

impl DiffConfig {
    pub fn new() -> Self {
        Self {
            move_epsilon: DEFAULT_MOVE_EPSILON,
        }
    }

    pub fn with_move_epsilon(move_epsilon: f64) -> Self {
        Self { move_epsilon }
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self::new()
    }
}
