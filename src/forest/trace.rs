use super::node::NodeId;

/// A connected group of segments: one union-find tree.
///
/// `nodes` lists every member, the representative included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub(crate) representative: NodeId,
    pub(crate) nodes: Vec<NodeId>,
}

impl Trace {
    pub(crate) fn singleton(node: NodeId) -> Self {
        Self {
            representative: node,
            nodes: vec![node],
        }
    }

    /// Returns the current root of the trace.
    #[must_use]
    pub fn representative(&self) -> NodeId {
        self.representative
    }

    /// Returns all member nodes.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the trace has no members.
    ///
    /// A trace in a consistent forest is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `node` is a member.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }
}
