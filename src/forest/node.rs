use crate::geometry::Segment;

slotmap::new_key_type! {
    /// Unique identifier for a node in the trace forest.
    pub struct NodeId;
}

/// A union-find node wrapping one segment.
///
/// `parent` only encodes tree shape; the forest owns every node. A root
/// points at itself.
#[derive(Debug, Clone)]
pub struct ForestNode {
    pub(crate) parent: NodeId,
    pub(crate) rank: u32,
    segment: Segment,
}

impl ForestNode {
    /// Creates a node attached under `parent` with rank 0.
    ///
    /// Passing the node's own id as `parent` makes it a root.
    #[must_use]
    pub(crate) fn new(segment: Segment, parent: NodeId) -> Self {
        Self {
            parent,
            rank: 0,
            segment,
        }
    }

    /// Returns the parent node (the node itself for a root).
    #[must_use]
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Returns the union-by-rank rank, an upper bound on subtree height.
    #[must_use]
    pub fn rank(&self) -> u32 {
        self.rank
    }

    /// Returns the wrapped segment.
    #[must_use]
    pub fn segment(&self) -> &Segment {
        &self.segment
    }
}
