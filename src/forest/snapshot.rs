use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ForestError;
use crate::geometry::SegmentHandle;
use crate::math::Point3;

use super::node::NodeId;
use super::TraceForest;

/// Structural dump of a forest, for inspection and tests.
///
/// `index` and `parent` are positions in this dump's flattened node order.
/// They are not stable across dumps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestSnapshot {
    /// Traces in forest order.
    pub traces: Vec<TraceSnapshot>,
}

/// One trace in a [`ForestSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSnapshot {
    /// Dump position of the trace's root node.
    pub representative: usize,
    /// Every member, the representative included.
    pub nodes: Vec<NodeSnapshot>,
}

/// One node in a [`TraceSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Position of this node in the dump.
    pub index: usize,
    /// Dump position of the parent node; equals `index` for a root.
    pub parent: usize,
    /// Union-by-rank rank.
    pub rank: u32,
    /// Segment start point.
    pub start: Point3,
    /// Segment end point.
    pub end: Point3,
    /// Segment identity handle.
    pub handle: SegmentHandle,
}

impl ForestSnapshot {
    /// Captures every trace.
    ///
    /// Fails instead of dropping entries when a listed node, its parent or a
    /// representative cannot be resolved.
    pub(crate) fn capture(forest: &TraceForest) -> Result<Self, ForestError> {
        let order: HashMap<NodeId, usize> = forest
            .nodes()
            .into_iter()
            .enumerate()
            .map(|(i, id)| (id, i))
            .collect();
        let position = |id: NodeId| {
            order
                .get(&id)
                .copied()
                .ok_or_else(|| ForestError::NodeNotFound(format!("{id:?} is not listed in any trace")))
        };

        let mut traces = Vec::with_capacity(forest.trace_count());
        for trace in forest.traces() {
            let mut nodes = Vec::with_capacity(trace.len());
            for &id in trace.nodes() {
                let node = forest.node(id)?;
                nodes.push(NodeSnapshot {
                    index: position(id)?,
                    parent: position(node.parent())?,
                    rank: node.rank(),
                    start: *node.segment().start(),
                    end: *node.segment().end(),
                    handle: node.segment().handle(),
                });
            }
            traces.push(TraceSnapshot {
                representative: position(trace.representative())?,
                nodes,
            });
        }

        Ok(Self { traces })
    }

    /// Total number of nodes across all traces.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.traces.iter().map(|t| t.nodes.len()).sum()
    }
}
