//! Flow edges: directed def-to-use value-flow dependencies.

use serde::{Deserialize, Serialize};

/// A value-flow dependency from a defining node to a using node.
///
/// Direct edges connect a definition straight to its use. Indirect edges
/// carry flow that is mediated by memory (a store reaching a later load).
/// The traversal engine follows both kinds identically; the distinction is
/// kept because providers record it and diagnostics benefit from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowEdge {
    /// Definition used directly as an operand.
    Direct,
    /// Flow through memory.
    Indirect,
}

impl FlowEdge {
    /// Returns `true` for direct def-use edges.
    pub fn is_direct(&self) -> bool {
        matches!(self, FlowEdge::Direct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_and_indirect_are_distinct() {
        assert!(FlowEdge::Direct.is_direct());
        assert!(!FlowEdge::Indirect.is_direct());
        assert_ne!(FlowEdge::Direct, FlowEdge::Indirect);
    }

    #[test]
    fn serde_roundtrip() {
        for edge in [FlowEdge::Direct, FlowEdge::Indirect] {
            let json = serde_json::to_string(&edge).unwrap();
            let back: FlowEdge = serde_json::from_str(&json).unwrap();
            assert_eq!(edge, back);
        }
    }
}
