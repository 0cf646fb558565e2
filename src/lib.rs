pub mod error;
pub mod forest;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{ForestError, GeometryError, Result, TraceForestError};
pub use forest::{ForestConfig, NodeId, TraceForest};
pub use geometry::{Segment, SegmentHandle};
