//! Value nodes: an operation plus the source-level identity it carries.

use serde::{Deserialize, Serialize};

use crate::location::SourceLocation;
use crate::op::ValueOp;

/// A node in the value-flow graph.
///
/// Wraps the operation with the optional source variable name and source
/// location recovered from the analyzed program. Compiler-generated values
/// typically have neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueNode {
    /// The operation this node performs.
    pub op: ValueOp,
    /// Source variable name, when the value corresponds to a named variable.
    pub name: Option<String>,
    /// Source location, when debug info was available.
    pub location: Option<SourceLocation>,
}

impl ValueNode {
    /// Creates an anonymous node with no name or location.
    pub fn new(op: ValueOp) -> Self {
        ValueNode {
            op,
            name: None,
            location: None,
        }
    }

    /// Creates a node carrying a source variable name.
    pub fn named(op: ValueOp, name: impl Into<String>) -> Self {
        ValueNode {
            op,
            name: Some(name.into()),
            location: None,
        }
    }

    /// Attaches a source location.
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// The node's name as a string slice, when present.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
