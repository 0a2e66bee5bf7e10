//! Graph construction and lookup errors.
//!
//! Uses `thiserror` for structured, matchable error variants. All graph
//! inconsistencies are rejected at construction time, so a built
//! [`ProgramGraph`](crate::graph::ProgramGraph) is traversal-safe.

use thiserror::Error;

use crate::id::NodeId;

/// Errors produced by the vflow-graph crate.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A node ID was not found in the graph.
    #[error("node not found: NodeId({id})", id = id.0)]
    NodeNotFound { id: NodeId },

    /// An operation references an operand node that does not exist.
    #[error("operand not found: NodeId({operand}) referenced by a {kind} node", operand = operand.0)]
    OperandNotFound { operand: NodeId, kind: &'static str },

    /// An edge failed validation.
    #[error("invalid edge: {reason}")]
    InvalidEdge { reason: String },
}
