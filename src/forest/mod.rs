pub mod config;
pub mod node;
pub mod snapshot;
pub mod trace;

pub use config::ForestConfig;
pub use node::{ForestNode, NodeId};
pub use snapshot::{ForestSnapshot, NodeSnapshot, TraceSnapshot};
pub use trace::Trace;

use slotmap::SlotMap;
use tracing::{debug, trace, warn};

use crate::error::{ForestError, Result};
use crate::geometry::{Segment, SegmentHandle};
use crate::operations::query::{LinesLength, Measurement};

/// Augmented disjoint-set forest grouping segments into traces.
///
/// Nodes live in an arena addressed by [`NodeId`]; each [`Trace`] keeps its
/// representative and an explicit member list alongside the union-find
/// parent links. Every node belongs to exactly one trace between calls.
#[derive(Debug, Default)]
pub struct TraceForest {
    nodes: SlotMap<NodeId, ForestNode>,
    traces: Vec<Trace>,
    config: ForestConfig,
}

impl TraceForest {
    /// Creates a new, empty forest with the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty forest with the given config.
    #[must_use]
    pub fn with_config(config: ForestConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the active config.
    #[must_use]
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    // --- Lookup ---

    /// Returns a reference to the node, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the forest.
    pub fn node(&self, id: NodeId) -> std::result::Result<&ForestNode, ForestError> {
        self.nodes.get(id).ok_or_else(|| {
            warn!(node = ?id, "unknown node");
            ForestError::NodeNotFound(format!("{id:?}"))
        })
    }

    /// Returns a mutable reference to the node, or an error if not found.
    fn node_mut(&mut self, id: NodeId) -> std::result::Result<&mut ForestNode, ForestError> {
        self.nodes.get_mut(id).ok_or_else(|| {
            warn!(node = ?id, "unknown node");
            ForestError::NodeNotFound(format!("{id:?}"))
        })
    }

    /// Returns `true` if the node is in the forest.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns `true` if the node is the root of its trace.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the forest.
    pub fn is_root(&self, id: NodeId) -> std::result::Result<bool, ForestError> {
        Ok(self.node(id)?.parent == id)
    }

    /// Follows parent links from `id` up to its root.
    ///
    /// Never mutates the forest.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the forest or the parent chain
    /// is broken.
    pub fn find_set(&self, id: NodeId) -> std::result::Result<NodeId, ForestError> {
        let mut current = id;
        let mut steps = 0usize;
        loop {
            let parent = self.node(current)?.parent;
            if parent == current {
                trace!(node = ?id, root = ?current, "find_set");
                return Ok(current);
            }
            steps += 1;
            if steps > self.nodes.len() {
                return Err(ForestError::Corrupt(format!("parent cycle above {id:?}")));
            }
            current = parent;
        }
    }

    /// Like [`find_set`](Self::find_set), compressing the path when the
    /// config asks for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the forest or the parent chain
    /// is broken.
    pub fn find_set_mut(&mut self, id: NodeId) -> std::result::Result<NodeId, ForestError> {
        let root = self.find_set(id)?;
        if self.config.path_compression {
            let mut current = id;
            while current != root {
                let node = self.node_mut(current)?;
                let next = node.parent;
                node.parent = root;
                current = next;
            }
        }
        Ok(root)
    }

    /// Returns the trace containing `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the forest.
    pub fn trace_of(&self, id: NodeId) -> std::result::Result<&Trace, ForestError> {
        let root = self.find_set(id)?;
        let index = self.trace_index(root)?;
        Ok(&self.traces[index])
    }

    /// Returns the members of the trace containing `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the forest.
    pub fn members(&self, id: NodeId) -> std::result::Result<&[NodeId], ForestError> {
        Ok(self.trace_of(id)?.nodes())
    }

    /// Finds the node wrapping the segment with the given handle.
    #[must_use]
    pub fn find_node(&self, handle: SegmentHandle) -> Option<NodeId> {
        let found = self
            .traces
            .iter()
            .flat_map(|t| t.nodes.iter().copied())
            .find(|&id| {
                self.nodes
                    .get(id)
                    .is_some_and(|n| n.segment().handle() == handle)
            });
        trace!(%handle, found = found.is_some(), "find_node");
        found
    }

    fn trace_index(&self, root: NodeId) -> std::result::Result<usize, ForestError> {
        self.traces
            .iter()
            .position(|t| t.representative == root)
            .ok_or_else(|| ForestError::TraceNotFound(format!("{root:?}")))
    }

    // --- Set-level operations ---

    /// Creates a new singleton trace holding `segment` and returns its node.
    pub fn make_set(&mut self, segment: Segment) -> NodeId {
        let handle = segment.handle();
        let id = self
            .nodes
            .insert_with_key(|key| ForestNode::new(segment, key));
        self.traces.push(Trace::singleton(id));
        debug!(node = ?id, %handle, traces = self.traces.len(), "make_set");
        id
    }

    /// Creates a node holding `segment` attached under `parent`, joining
    /// the parent's trace.
    ///
    /// Ancestors have their rank raised as needed so rank stays an upper
    /// bound on subtree height.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is not in the forest.
    pub fn make_node(&mut self, segment: Segment, parent: NodeId) -> Result<NodeId> {
        let root = self.find_set(parent)?;
        let index = self.trace_index(root)?;
        let handle = segment.handle();

        let mut current = parent;
        let mut height = 1u32;
        loop {
            let node = self.node_mut(current)?;
            node.rank = node.rank.max(height);
            if node.parent == current {
                break;
            }
            current = node.parent;
            height = height.saturating_add(1);
        }

        let id = self.nodes.insert(ForestNode::new(segment, parent));
        self.traces[index].nodes.push(id);

        debug!(node = ?id, parent = ?parent, root = ?root, %handle, "make_node");
        Ok(id)
    }

    /// Links two roots by rank and merges their traces.
    ///
    /// The lower-rank root goes under the higher-rank one; on a tie `b`
    /// becomes the parent and its rank is set to one above `a`'s. Returns
    /// the surviving root. Linking a root with itself is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if either node is missing or not a root.
    pub fn link_set(&mut self, a: NodeId, b: NodeId) -> Result<NodeId> {
        for id in [a, b] {
            if !self.is_root(id)? {
                return Err(ForestError::NotRoot(format!("{id:?}")).into());
            }
        }
        if a == b {
            return Ok(a);
        }

        let rank_a = self.node(a)?.rank;
        let rank_b = self.node(b)?.rank;
        let (parent, child) = if rank_a > rank_b { (a, b) } else { (b, a) };

        self.node_mut(child)?.parent = parent;
        if rank_a == rank_b {
            self.node_mut(parent)?.rank = rank_a.saturating_add(1);
        }
        self.link_forest(parent, child)?;

        let rank = self.node(parent)?.rank;
        debug!(
            parent = ?parent,
            child = ?child,
            rank,
            traces = self.traces.len(),
            "link_set"
        );
        Ok(parent)
    }

    /// Moves every member of `child_root`'s trace into `parent_root`'s trace.
    fn link_forest(
        &mut self,
        parent_root: NodeId,
        child_root: NodeId,
    ) -> std::result::Result<(), ForestError> {
        let child_index = self.trace_index(child_root)?;
        let child = self.traces.remove(child_index);
        let parent_index = self.trace_index(parent_root)?;
        self.traces[parent_index].nodes.extend(child.nodes);
        Ok(())
    }

    /// Merges the traces containing `a` and `b`, returning the surviving root.
    ///
    /// # Errors
    ///
    /// Returns an error if either node is not in the forest.
    pub fn union_set(&mut self, a: NodeId, b: NodeId) -> Result<NodeId> {
        let root_a = self.find_set_mut(a)?;
        let root_b = self.find_set_mut(b)?;
        self.link_set(root_a, root_b)
    }

    /// Removes the whole trace containing `id`, returning how many nodes went with it.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the forest.
    pub fn delete_set(&mut self, id: NodeId) -> Result<usize> {
        let root = self.find_set(id)?;
        let index = self.trace_index(root)?;
        let removed = self.traces.remove(index);
        for member in &removed.nodes {
            self.nodes.remove(*member);
        }
        debug!(node = ?id, root = ?root, removed = removed.nodes.len(), "delete_set");
        Ok(removed.nodes.len())
    }

    /// Removes a single node, keeping the rest of its trace connected.
    ///
    /// When the root is removed, the member at position 1 of the remaining
    /// list (position 0 if only one remains) becomes the new root and takes
    /// over the old root's children. Any other node hands its children to
    /// its own parent. An emptied trace is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the forest.
    pub fn delete_node(&mut self, id: NodeId) -> Result<()> {
        let root = self.find_set(id)?;
        let index = self.trace_index(root)?;
        let (removed_parent, removed_rank) = {
            let node = self.node(id)?;
            (node.parent, node.rank)
        };
        let remaining: Vec<NodeId> = self.traces[index]
            .nodes
            .iter()
            .copied()
            .filter(|&n| n != id)
            .collect();
        // Resolve every survivor before the first write.
        for &member in &remaining {
            self.node(member)?;
        }

        self.nodes.remove(id);

        if remaining.is_empty() {
            self.traces.remove(index);
            debug!(node = ?id, traces = self.traces.len(), "delete_node dropped trace");
            return Ok(());
        }

        let heir = if id == root {
            let new_root = remaining.get(1).copied().unwrap_or(remaining[0]);
            let node = self.node_mut(new_root)?;
            node.parent = new_root;
            node.rank = node.rank.max(removed_rank);
            new_root
        } else {
            removed_parent
        };

        for &member in &remaining {
            if member == heir {
                continue;
            }
            let node = self.node_mut(member)?;
            if node.parent == id {
                node.parent = heir;
            }
        }

        let remaining_len = remaining.len();
        let trace = &mut self.traces[index];
        trace.nodes = remaining;
        if id == root {
            trace.representative = heir;
        }

        debug!(
            node = ?id,
            was_root = id == root,
            heir = ?heir,
            remaining = remaining_len,
            "delete_node"
        );
        Ok(())
    }

    // --- Queries ---

    /// Returns every trace in creation order.
    #[must_use]
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Returns the number of traces.
    #[must_use]
    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the forest holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns all node ids, trace by trace.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeId> {
        self.traces
            .iter()
            .flat_map(|t| t.nodes.iter().copied())
            .collect()
    }

    /// Returns every segment, in the same order as [`nodes`](Self::nodes).
    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.traces
            .iter()
            .flat_map(|t| t.nodes.iter())
            .filter_map(|&id| self.nodes.get(id).map(ForestNode::segment))
    }

    /// Returns every segment handle, in the same order as [`nodes`](Self::nodes).
    #[must_use]
    pub fn lines(&self) -> Vec<SegmentHandle> {
        self.segments().map(Segment::handle).collect()
    }

    /// Sums the lengths of every segment in the forest.
    #[must_use]
    pub fn lines_length(&self) -> f64 {
        LinesLength::new().execute(self)
    }

    /// Returns the total length rounded for display.
    #[must_use]
    pub fn measurement(&self) -> Measurement {
        Measurement::new(self.lines_length(), self.config.measurement_epsilon)
    }

    /// Captures the trace structure.
    ///
    /// # Errors
    ///
    /// Returns an error if a listed node or its parent is missing from the arena.
    pub fn snapshot(&self) -> std::result::Result<ForestSnapshot, ForestError> {
        ForestSnapshot::capture(self)
    }

    /// Dumps the trace structure as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot()?)?)
    }
}

#[cfg(test)]
impl TraceForest {
    /// Hands out the raw storage so tests can break invariants on purpose.
    pub(crate) fn corrupt_for_test(
        &mut self,
        f: impl FnOnce(&mut SlotMap<NodeId, ForestNode>, &mut Vec<Trace>),
    ) {
        f(&mut self.nodes, &mut self.traces);
    }
}
