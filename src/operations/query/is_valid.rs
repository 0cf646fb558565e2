use std::collections::{HashMap, HashSet};

use crate::error::ForestError;
use crate::forest::{NodeId, TraceForest};

/// Validates the structural invariants of a forest.
///
/// Checks, in order: traces are non-empty, each representative is a root
/// listed in its own trace, every member resolves to its trace's
/// representative, traces partition the node set, and every node's rank is
/// at least the height of its subtree.
#[derive(Debug, Default)]
pub struct IsValid;

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the validation.
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::Corrupt`] describing the first violation found.
    pub fn execute(&self, forest: &TraceForest) -> Result<(), ForestError> {
        let mut seen: HashSet<NodeId> = HashSet::with_capacity(forest.len());

        for (i, trace) in forest.traces().iter().enumerate() {
            if trace.is_empty() {
                return Err(corrupt(format!("trace {i} is empty")));
            }
            let rep = trace.representative();
            if !trace.contains(rep) {
                return Err(corrupt(format!("trace {i} does not list its representative")));
            }
            if !forest.is_root(rep)? {
                return Err(corrupt(format!("representative of trace {i} is not a root")));
            }
            for &id in trace.nodes() {
                if !seen.insert(id) {
                    return Err(corrupt(format!("{id:?} is listed twice")));
                }
                if forest.find_set(id)? != rep {
                    return Err(corrupt(format!(
                        "{id:?} in trace {i} resolves to a foreign root"
                    )));
                }
            }
        }

        if seen.len() != forest.len() {
            return Err(corrupt(format!(
                "{} of {} nodes are not in any trace",
                forest.len() - seen.len(),
                forest.len()
            )));
        }

        // Height of each node's subtree: walk up from every node, recording
        // the distance at each ancestor.
        let mut heights: HashMap<NodeId, u32> = HashMap::with_capacity(seen.len());
        for &start in &seen {
            let mut current = start;
            let mut distance = 0u32;
            loop {
                let entry = heights.entry(current).or_insert(0);
                *entry = (*entry).max(distance);
                let parent = forest.node(current)?.parent();
                if parent == current {
                    break;
                }
                current = parent;
                distance += 1;
            }
        }
        for (id, height) in heights {
            let rank = forest.node(id)?.rank();
            if rank < height {
                return Err(corrupt(format!(
                    "{id:?} has rank {rank} below subtree height {height}"
                )));
            }
        }

        Ok(())
    }
}

fn corrupt(message: String) -> ForestError {
    ForestError::Corrupt(message)
}
