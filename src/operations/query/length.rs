use crate::error::Result;
use crate::forest::{NodeId, TraceForest};
use crate::geometry::Segment;

/// Computes the total length of every segment in a forest.
#[derive(Debug, Default)]
pub struct LinesLength;

impl LinesLength {
    /// Creates a new `LinesLength` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the query, summing segment lengths over all traces.
    ///
    /// Recomputed on every call; there is no cached total to go stale.
    #[must_use]
    pub fn execute(&self, forest: &TraceForest) -> f64 {
        forest.segments().map(Segment::length).sum()
    }
}

/// Computes the total length of the trace containing a node.
pub struct TraceLength {
    node: NodeId,
}

impl TraceLength {
    /// Creates a new `TraceLength` query.
    #[must_use]
    pub fn new(node: NodeId) -> Self {
        Self { node }
    }

    /// Executes the query, returning the trace length.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the forest.
    pub fn execute(&self, forest: &TraceForest) -> Result<f64> {
        let mut total = 0.0;
        for &id in forest.members(self.node)? {
            total += forest.node(id)?.segment().length();
        }
        Ok(total)
    }
}
