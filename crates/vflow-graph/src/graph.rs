//! ProgramGraph: the value-flow representation of one analyzed program.
//!
//! [`ProgramGraph`] is the single entry point for constructing and querying
//! a value-flow graph. Nodes are [`ValueNode`]s, edges are [`FlowEdge`]
//! def-to-use dependencies. All mutations go through builder methods that
//! validate operand and endpoint references, so a built graph contains no
//! dangling links and traversal needs no error paths.
//!
//! The graph is append-only: there is no node removal. Together with the
//! operand validation in [`add_value`](ProgramGraph::add_value) this
//! guarantees operand references always point at earlier nodes, which keeps
//! cast chains finite.

use petgraph::stable_graph::StableGraph;
use petgraph::Directed;
use serde::{Deserialize, Serialize};

use crate::edge::FlowEdge;
use crate::error::GraphError;
use crate::id::{EdgeId, NodeId};
use crate::node::ValueNode;
use crate::op::ValueOp;

/// The value-flow graph for one analyzed program.
///
/// Built once by a provider, then read-only for the duration of the trace
/// pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramGraph {
    flow: StableGraph<ValueNode, FlowEdge, Directed, u32>,
}

impl ProgramGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        ProgramGraph {
            flow: StableGraph::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Builder methods
    // -----------------------------------------------------------------------

    /// Adds a value node, validating that every operand it references
    /// already exists.
    ///
    /// Returns the new [`NodeId`].
    pub fn add_value(&mut self, node: ValueNode) -> Result<NodeId, GraphError> {
        for operand in node.op.operands() {
            if self.flow.node_weight(operand.into()).is_none() {
                return Err(GraphError::OperandNotFound {
                    operand,
                    kind: node.op.kind_name(),
                });
            }
        }
        let idx = self.flow.add_node(node);
        Ok(NodeId::from(idx))
    }

    /// Adds a def-to-use flow edge between two existing nodes.
    ///
    /// Returns the new [`EdgeId`].
    pub fn add_flow_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        edge: FlowEdge,
    ) -> Result<EdgeId, GraphError> {
        if self.flow.node_weight(from.into()).is_none() {
            return Err(GraphError::NodeNotFound { id: from });
        }
        if self.flow.node_weight(to.into()).is_none() {
            return Err(GraphError::NodeNotFound { id: to });
        }
        let idx = self.flow.add_edge(from.into(), to.into(), edge);
        Ok(EdgeId(idx.index() as u32))
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// Looks up a value node by ID.
    pub fn value(&self, id: NodeId) -> Option<&ValueNode> {
        self.flow.node_weight(id.into())
    }

    /// Looks up a value node by ID, failing on unknown IDs.
    pub fn require_value(&self, id: NodeId) -> Result<&ValueNode, GraphError> {
        self.value(id).ok_or(GraphError::NodeNotFound { id })
    }

    /// Iterates over all nodes in ID order.
    ///
    /// For graphs built append-only (the only construction path) this is
    /// also insertion order, which fixes the order trace sessions fire in.
    pub fn values(&self) -> impl Iterator<Item = (NodeId, &ValueNode)> {
        self.flow
            .node_indices()
            .map(|idx| (NodeId::from(idx), &self.flow[idx]))
    }

    /// Iterates over the destinations of a node's outgoing flow edges.
    pub fn flow_targets(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.flow
            .neighbors_directed(id.into(), petgraph::Direction::Outgoing)
            .map(NodeId::from)
    }

    /// Returns the number of value nodes.
    pub fn node_count(&self) -> usize {
        self.flow.node_count()
    }

    /// Returns the number of flow edges.
    pub fn edge_count(&self) -> usize {
        self.flow.edge_count()
    }

    // -----------------------------------------------------------------------
    // Operand resolution
    // -----------------------------------------------------------------------

    /// Resolves a value through any chain of transparent cast wrappers to
    /// the underlying value node.
    ///
    /// Identity on non-cast nodes. Terminates because operand references
    /// always point at earlier nodes (see module docs).
    pub fn strip_casts(&self, id: NodeId) -> Result<NodeId, GraphError> {
        let mut current = id;
        loop {
            match self.require_value(current)?.op {
                ValueOp::Cast { inner } => current = inner,
                _ => return Ok(current),
            }
        }
    }

    /// Returns the definition node for a value: the cast-stripped node
    /// itself, since every value in this representation is defined by the
    /// node that carries it.
    pub fn definition(&self, id: NodeId) -> Result<NodeId, GraphError> {
        self.strip_casts(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::SourceLocation;
    use crate::op::ParamSite;
    use proptest::prelude::*;

    fn named(op: ValueOp, name: &str) -> ValueNode {
        ValueNode::named(op, name)
    }

    #[test]
    fn basic_graph_construction() {
        let mut graph = ProgramGraph::new();

        let addr = graph.add_value(named(ValueOp::Other, "cfg_a")).unwrap();
        let val = graph.add_value(ValueNode::new(ValueOp::Other)).unwrap();
        let store = graph
            .add_value(ValueNode::new(ValueOp::Store {
                address: addr,
                value: val,
            }))
            .unwrap();
        let use_site = graph
            .add_value(ValueNode::new(ValueOp::Load { address: addr }))
            .unwrap();

        graph.add_flow_edge(store, use_site, FlowEdge::Indirect).unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(
            graph.flow_targets(store).collect::<Vec<_>>(),
            vec![use_site]
        );
    }

    #[test]
    fn add_value_rejects_missing_operand() {
        let mut graph = ProgramGraph::new();
        let result = graph.add_value(ValueNode::new(ValueOp::Load {
            address: NodeId(99),
        }));
        match result {
            Err(GraphError::OperandNotFound { operand, kind }) => {
                assert_eq!(operand, NodeId(99));
                assert_eq!(kind, "load");
            }
            other => panic!("expected OperandNotFound, got {:?}", other),
        }
    }

    #[test]
    fn add_flow_edge_rejects_missing_endpoints() {
        let mut graph = ProgramGraph::new();
        let node = graph.add_value(ValueNode::new(ValueOp::Other)).unwrap();

        assert!(graph
            .add_flow_edge(node, NodeId(42), FlowEdge::Direct)
            .is_err());
        assert!(graph
            .add_flow_edge(NodeId(42), node, FlowEdge::Direct)
            .is_err());
    }

    #[test]
    fn values_iterates_in_insertion_order() {
        let mut graph = ProgramGraph::new();
        let a = graph.add_value(named(ValueOp::Other, "a")).unwrap();
        let b = graph.add_value(named(ValueOp::Other, "b")).unwrap();
        let c = graph.add_value(named(ValueOp::Other, "c")).unwrap();

        let order: Vec<NodeId> = graph.values().map(|(id, _)| id).collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn strip_casts_resolves_chains() {
        let mut graph = ProgramGraph::new();
        let base = graph.add_value(named(ValueOp::Other, "base")).unwrap();
        let cast1 = graph
            .add_value(ValueNode::new(ValueOp::Cast { inner: base }))
            .unwrap();
        let cast2 = graph
            .add_value(ValueNode::new(ValueOp::Cast { inner: cast1 }))
            .unwrap();

        assert_eq!(graph.strip_casts(cast2).unwrap(), base);
        assert_eq!(graph.strip_casts(cast1).unwrap(), base);
        // Identity on non-cast nodes.
        assert_eq!(graph.strip_casts(base).unwrap(), base);
        assert_eq!(graph.definition(cast2).unwrap(), base);
    }

    #[test]
    fn strip_casts_unknown_node_errors() {
        let graph = ProgramGraph::new();
        assert!(matches!(
            graph.strip_casts(NodeId(0)),
            Err(GraphError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn parameter_and_return_nodes_carry_sites() {
        let mut graph = ProgramGraph::new();
        let actual = graph
            .add_value(ValueNode::new(ValueOp::Parameter(ParamSite::Actual)))
            .unwrap();
        let formal = graph
            .add_value(ValueNode::new(ValueOp::Return(ParamSite::Formal)))
            .unwrap();

        assert_eq!(
            graph.value(actual).unwrap().op,
            ValueOp::Parameter(ParamSite::Actual)
        );
        assert_eq!(
            graph.value(formal).unwrap().op,
            ValueOp::Return(ParamSite::Formal)
        );
    }

    proptest! {
        #[test]
        fn strip_casts_terminates_at_any_depth(depth in 0usize..64) {
            let mut graph = ProgramGraph::new();
            let base = graph.add_value(named(ValueOp::Other, "base")).unwrap();
            let mut top = base;
            for _ in 0..depth {
                top = graph
                    .add_value(ValueNode::new(ValueOp::Cast { inner: top }))
                    .unwrap();
            }
            prop_assert_eq!(graph.strip_casts(top).unwrap(), base);
        }
    }

    #[test]
    fn serde_roundtrip_preserves_counts_and_links() {
        let mut graph = ProgramGraph::new();
        let addr = graph
            .add_value(named(ValueOp::Other, "cfg_a").at(SourceLocation::new("app.c", 3)))
            .unwrap();
        let val = graph.add_value(ValueNode::new(ValueOp::Other)).unwrap();
        let store = graph
            .add_value(ValueNode::new(ValueOp::Store {
                address: addr,
                value: val,
            }))
            .unwrap();
        graph.add_flow_edge(addr, store, FlowEdge::Direct).unwrap();

        let json = serde_json::to_string(&graph).unwrap();
        let back: ProgramGraph = serde_json::from_str(&json).unwrap();

        assert_eq!(back.node_count(), graph.node_count());
        assert_eq!(back.edge_count(), graph.edge_count());
        assert_eq!(
            back.value(store).unwrap().op,
            ValueOp::Store {
                address: addr,
                value: val
            }
        );
    }
}
