use thiserror::Error;

/// Top-level error type for the trace forest.
#[derive(Debug, Error)]
pub enum TraceForestError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Forest(#[from] ForestError),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors related to segment geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to forest structure and lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForestError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("node {0} is not the root of its trace")]
    NotRoot(String),

    #[error("no trace is represented by node {0}")]
    TraceNotFound(String),

    #[error("forest is corrupt: {0}")]
    Corrupt(String),
}

/// Convenience type alias for results using [`TraceForestError`].
pub type Result<T> = std::result::Result<T, TraceForestError>;
