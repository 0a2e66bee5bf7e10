//! The serialized module format.
//!
//! A module file is the flat, storable form of one program module's slice
//! of the value-flow graph: a list of value declarations followed by a list
//! of edge declarations. All references are indices into the file's own
//! `values` list; the loader rebases them when merging several modules into
//! one graph.
//!
//! Operand references must point at earlier declarations (def-before-use
//! order). This mirrors the append-only construction rule of
//! [`ProgramGraph`](vflow_graph::ProgramGraph) and lets the loader build
//! the graph in a single pass.

use serde::{Deserialize, Serialize};

/// One program module's nodes and edges in declaration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleFile {
    /// Value declarations, in definition order.
    pub values: Vec<ValueDecl>,
    /// Flow edge declarations. May appear in any order.
    #[serde(default)]
    pub edges: Vec<EdgeDecl>,
}

/// One value node in declaration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueDecl {
    /// The operation, with file-local operand indices.
    pub op: OpDecl,
    /// Source variable name, when the value corresponds to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Source file from debug info.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Source line from debug info.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Operation declarations, mirroring the graph's operation vocabulary with
/// file-local `u32` references in place of node IDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpDecl {
    Store { address: u32, value: u32 },
    Load { address: u32 },
    AddressComputation { base: u32 },
    Cast { inner: u32 },
    ActualParameter,
    FormalParameter,
    ActualReturn,
    FormalReturn,
    BinaryOp,
    UnaryOp,
    Compare,
    Phi,
    Other,
}

impl OpDecl {
    /// File-local operand references, in operand order.
    pub fn local_refs(&self) -> Vec<u32> {
        match *self {
            OpDecl::Store { address, value } => vec![address, value],
            OpDecl::Load { address } => vec![address],
            OpDecl::AddressComputation { base } => vec![base],
            OpDecl::Cast { inner } => vec![inner],
            _ => Vec::new(),
        }
    }
}

/// One flow edge in declaration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeDecl {
    /// File-local index of the defining node.
    pub from: u32,
    /// File-local index of the using node.
    pub to: u32,
    /// Direct def-use or memory-mediated flow.
    #[serde(default)]
    pub kind: EdgeKindDecl,
}

/// Edge kind in declaration form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKindDecl {
    #[default]
    Direct,
    Indirect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_decl_reports_local_refs() {
        let op = OpDecl::Store {
            address: 0,
            value: 1,
        };
        assert_eq!(op.local_refs(), vec![0, 1]);
        assert!(OpDecl::Phi.local_refs().is_empty());
    }

    #[test]
    fn module_file_decodes_minimal_json() {
        let json = r#"{
            "values": [
                {"op": "other", "name": "cfg_a"},
                {"op": {"store": {"address": 0, "value": 0}}, "file": "app.c", "line": 42}
            ],
            "edges": [{"from": 0, "to": 1}]
        }"#;
        let module: ModuleFile = serde_json::from_str(json).unwrap();
        assert_eq!(module.values.len(), 2);
        assert_eq!(module.edges.len(), 1);
        assert_eq!(module.edges[0].kind, EdgeKindDecl::Direct);
        assert_eq!(module.values[0].name.as_deref(), Some("cfg_a"));
        assert_eq!(module.values[1].line, Some(42));
    }

    #[test]
    fn serde_roundtrip() {
        let module = ModuleFile {
            values: vec![
                ValueDecl {
                    op: OpDecl::Other,
                    name: Some("x".into()),
                    file: None,
                    line: None,
                },
                ValueDecl {
                    op: OpDecl::Cast { inner: 0 },
                    name: None,
                    file: None,
                    line: None,
                },
            ],
            edges: vec![EdgeDecl {
                from: 0,
                to: 1,
                kind: EdgeKindDecl::Indirect,
            }],
        };
        let json = serde_json::to_string(&module).unwrap();
        let back: ModuleFile = serde_json::from_str(&json).unwrap();
        let json2 = serde_json::to_string(&back).unwrap();
        assert_eq!(json, json2);
    }
}
