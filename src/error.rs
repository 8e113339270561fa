use thiserror::Error;

use crate::config::PathType;

/// Errors surfaced by a planning run.
///
/// Only fatal conditions are represented here. Data-quality problems (dropped
/// leftover entities, poles missing from the backbone, uncovered customers,
/// panel shortfalls) are logged and the run continues.
#[derive(Error, Debug)]
pub enum PlanError {
    /// An option value is out of range.
    #[error("configuration error: {0}")]
    Config(String),

    /// The cost table has no per-meter rate for a path type present in the graph.
    #[error("configuration error: no cost per meter for path type {0}")]
    MissingPathCost(PathType),

    /// More clusters were requested than there are entities to cluster.
    #[error("cannot split {available} entities into {requested} clusters")]
    ClusterCount { requested: usize, available: usize },

    /// Two facilities have no path between them in the cost graph.
    #[error("facility {to} is not reachable from facility {from}")]
    Unreachable { from: String, to: String },

    /// An entity's geometry has no centroid.
    #[error("entity {0} has an empty geometry")]
    EmptyGeometry(String),

    /// A representative point was requested for an empty group.
    #[error("cannot place a facility for an empty group")]
    EmptyGroup,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results carrying a [`PlanError`].
pub type Result<T> = std::result::Result<T, PlanError>;
