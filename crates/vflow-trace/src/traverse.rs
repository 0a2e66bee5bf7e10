//! Forward reachability over the value-flow graph.

use std::collections::VecDeque;

use indexmap::IndexSet;

use vflow_graph::{NodeId, ProgramGraph};

/// Collects every node reachable from `root` along outgoing flow edges.
///
/// Breadth-first: the frontier is FIFO and a node enters it at most once,
/// checked at insertion time, so the walk terminates on cyclic graphs. The
/// returned set iterates in discovery order, which reporting preserves.
///
/// No node-kind filtering happens here; root selection and reporting do
/// their own.
pub fn traverse(graph: &ProgramGraph, root: NodeId) -> IndexSet<NodeId> {
    let mut visited: IndexSet<NodeId> = IndexSet::new();
    let mut frontier: VecDeque<NodeId> = VecDeque::new();

    visited.insert(root);
    frontier.push_back(root);

    while let Some(current) = frontier.pop_front() {
        for succ in graph.flow_targets(current) {
            if visited.insert(succ) {
                frontier.push_back(succ);
            }
        }
    }

    visited
}
