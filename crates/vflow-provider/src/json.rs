//! JSON module loader: reconstructs a [`ProgramGraph`] from module files.
//!
//! Each input file holds one [`ModuleFile`]. Files are loaded in argument
//! order and appended to a single graph; file-local references are rebased
//! by the number of nodes already present, so node IDs stay stable across
//! the merge.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use vflow_graph::{
    FlowEdge, NodeId, ParamSite, ProgramGraph, SourceLocation, ValueNode, ValueOp,
};

use crate::error::ProviderError;
use crate::module_file::{EdgeKindDecl, ModuleFile, OpDecl, ValueDecl};
use crate::traits::GraphProvider;

/// Builds program graphs from JSON module files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonModuleProvider;

impl JsonModuleProvider {
    /// Creates a provider.
    pub fn new() -> Self {
        JsonModuleProvider
    }
}

impl GraphProvider for JsonModuleProvider {
    fn build_graph(&self, modules: &[PathBuf]) -> Result<ProgramGraph, ProviderError> {
        let mut graph = ProgramGraph::new();
        for path in modules {
            let file = File::open(path).map_err(|source| ProviderError::UnreadableModule {
                path: path.clone(),
                source,
            })?;
            let module: ModuleFile = serde_json::from_reader(BufReader::new(file)).map_err(
                |source| ProviderError::InvalidFormat {
                    path: path.clone(),
                    source,
                },
            )?;
            append_module(&mut graph, &module, path)?;
        }
        Ok(graph)
    }
}

/// Appends one module's declarations to the graph, rebasing file-local
/// references past the nodes already present.
pub fn append_module(
    graph: &mut ProgramGraph,
    module: &ModuleFile,
    path: &Path,
) -> Result<(), ProviderError> {
    let offset = graph.node_count() as u32;
    let value_count = module.values.len() as u32;

    for (index, decl) in module.values.iter().enumerate() {
        // Operands must be declared before the value that uses them; this is
        // what lets the graph be built in one pass.
        for local in decl.op.local_refs() {
            if local as usize >= index {
                return Err(ProviderError::MalformedModule {
                    path: path.to_path_buf(),
                    reason: format!(
                        "value {} references operand {} which does not precede it",
                        index, local
                    ),
                });
            }
        }
        let node = node_from_decl(decl, offset);
        graph
            .add_value(node)
            .map_err(|e| ProviderError::MalformedModule {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
    }

    for edge in &module.edges {
        if edge.from >= value_count || edge.to >= value_count {
            return Err(ProviderError::MalformedModule {
                path: path.to_path_buf(),
                reason: format!(
                    "edge {} -> {} references a value outside this module",
                    edge.from, edge.to
                ),
            });
        }
        graph
            .add_flow_edge(
                NodeId(offset + edge.from),
                NodeId(offset + edge.to),
                flow_edge_from_decl(edge.kind),
            )
            .map_err(|e| ProviderError::MalformedModule {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
    }

    Ok(())
}

fn node_from_decl(decl: &ValueDecl, offset: u32) -> ValueNode {
    let mut node = ValueNode::new(op_from_decl(&decl.op, offset));
    node.name = decl.name.clone();
    // A location needs both coordinates; a file without a line (or the
    // reverse) is treated as no debug info.
    node.location = match (&decl.file, decl.line) {
        (Some(file), Some(line)) => Some(SourceLocation::new(file.clone(), line)),
        _ => None,
    };
    node
}

fn op_from_decl(op: &OpDecl, offset: u32) -> ValueOp {
    let rebase = |local: u32| NodeId(offset + local);
    match *op {
        OpDecl::Store { address, value } => ValueOp::Store {
            address: rebase(address),
            value: rebase(value),
        },
        OpDecl::Load { address } => ValueOp::Load {
            address: rebase(address),
        },
        OpDecl::AddressComputation { base } => ValueOp::AddressComputation {
            base: rebase(base),
        },
        OpDecl::Cast { inner } => ValueOp::Cast {
            inner: rebase(inner),
        },
        OpDecl::ActualParameter => ValueOp::Parameter(ParamSite::Actual),
        OpDecl::FormalParameter => ValueOp::Parameter(ParamSite::Formal),
        OpDecl::ActualReturn => ValueOp::Return(ParamSite::Actual),
        OpDecl::FormalReturn => ValueOp::Return(ParamSite::Formal),
        OpDecl::BinaryOp => ValueOp::BinaryOp,
        OpDecl::UnaryOp => ValueOp::UnaryOp,
        OpDecl::Compare => ValueOp::Compare,
        OpDecl::Phi => ValueOp::Phi,
        OpDecl::Other => ValueOp::Other,
    }
}

fn flow_edge_from_decl(kind: EdgeKindDecl) -> FlowEdge {
    match kind {
        EdgeKindDecl::Direct => FlowEdge::Direct,
        EdgeKindDecl::Indirect => FlowEdge::Indirect,
    }
}
