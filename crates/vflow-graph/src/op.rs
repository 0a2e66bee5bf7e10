//! The operation vocabulary for value-flow nodes.
//!
//! [`ValueOp`] is a closed enum over the operation kinds the tracer needs to
//! distinguish. Operand references are embedded in the variants that have
//! them (`Store`, `Load`, `AddressComputation`, `Cast`), so inspecting a node
//! never requires a second lookup table.
//!
//! Operand references always point at nodes added to the graph *before* the
//! referencing node ([`ProgramGraph::add_value`] validates them), which makes
//! operand chains acyclic by construction.
//!
//! [`ProgramGraph::add_value`]: crate::graph::ProgramGraph::add_value

use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// Whether a parameter or return value sits on the caller or callee side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamSite {
    /// Caller side: the argument passed at a call site, or the value a call
    /// site receives back.
    Actual,
    /// Callee side: the parameter inside the function body, or the value a
    /// `return` hands out.
    Formal,
}

/// The operation a value node performs.
///
/// Variants that consume named operands carry the operand node IDs directly.
/// `Cast` is a transparent wrapper: operand resolution strips chains of casts
/// to reach the underlying value (see [`ProgramGraph::strip_casts`]).
///
/// [`ProgramGraph::strip_casts`]: crate::graph::ProgramGraph::strip_casts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueOp {
    /// Writes `value` to the memory named by `address`.
    Store { address: NodeId, value: NodeId },
    /// Reads from the memory named by `address`.
    Load { address: NodeId },
    /// Produces a sub-object address from `base` (field/element arithmetic).
    AddressComputation { base: NodeId },
    /// Transparent type conversion of `inner`. Never a trace root; operand
    /// resolution looks through it.
    Cast { inner: NodeId },
    /// Function parameter, on the caller or callee side.
    Parameter(ParamSite),
    /// Function return value, on the caller or callee side.
    Return(ParamSite),
    /// Two-operand arithmetic or logic.
    BinaryOp,
    /// One-operand arithmetic or logic.
    UnaryOp,
    /// Comparison producing a flag value.
    Compare,
    /// SSA phi joining values from multiple predecessors.
    Phi,
    /// Any operation the tracer has no special handling for.
    Other,
}

impl ValueOp {
    /// Returns `true` for stores, the only kind that produces trace records.
    pub fn is_store(&self) -> bool {
        matches!(self, ValueOp::Store { .. })
    }

    /// Returns `true` for transparent cast wrappers.
    pub fn is_cast(&self) -> bool {
        matches!(self, ValueOp::Cast { .. })
    }

    /// The operand references this operation carries, in operand order.
    pub fn operands(&self) -> Vec<NodeId> {
        match *self {
            ValueOp::Store { address, value } => vec![address, value],
            ValueOp::Load { address } => vec![address],
            ValueOp::AddressComputation { base } => vec![base],
            ValueOp::Cast { inner } => vec![inner],
            ValueOp::Parameter(_)
            | ValueOp::Return(_)
            | ValueOp::BinaryOp
            | ValueOp::UnaryOp
            | ValueOp::Compare
            | ValueOp::Phi
            | ValueOp::Other => Vec::new(),
        }
    }

    /// Short kind name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ValueOp::Store { .. } => "store",
            ValueOp::Load { .. } => "load",
            ValueOp::AddressComputation { .. } => "address-computation",
            ValueOp::Cast { .. } => "cast",
            ValueOp::Parameter(ParamSite::Actual) => "actual-parameter",
            ValueOp::Parameter(ParamSite::Formal) => "formal-parameter",
            ValueOp::Return(ParamSite::Actual) => "actual-return",
            ValueOp::Return(ParamSite::Formal) => "formal-return",
            ValueOp::BinaryOp => "binary-op",
            ValueOp::UnaryOp => "unary-op",
            ValueOp::Compare => "compare",
            ValueOp::Phi => "phi",
            ValueOp::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_reports_both_operands_in_order() {
        let op = ValueOp::Store {
            address: NodeId(3),
            value: NodeId(5),
        };
        assert!(op.is_store());
        assert_eq!(op.operands(), vec![NodeId(3), NodeId(5)]);
    }

    #[test]
    fn operand_free_kinds_report_no_operands() {
        for op in [
            ValueOp::Parameter(ParamSite::Formal),
            ValueOp::Return(ParamSite::Actual),
            ValueOp::BinaryOp,
            ValueOp::UnaryOp,
            ValueOp::Compare,
            ValueOp::Phi,
            ValueOp::Other,
        ] {
            assert!(op.operands().is_empty(), "{:?}", op);
            assert!(!op.is_store());
            assert!(!op.is_cast());
        }
    }

    #[test]
    fn kind_names_distinguish_param_sites() {
        assert_eq!(
            ValueOp::Parameter(ParamSite::Actual).kind_name(),
            "actual-parameter"
        );
        assert_eq!(
            ValueOp::Return(ParamSite::Formal).kind_name(),
            "formal-return"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let op = ValueOp::Load {
            address: NodeId(11),
        };
        let json = serde_json::to_string(&op).unwrap();
        let back: ValueOp = serde_json::from_str(&json).unwrap();
        assert_eq!(op, back);
    }
}
