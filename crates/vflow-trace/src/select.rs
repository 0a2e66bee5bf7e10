//! Trace root selection: which nodes start a traversal session.
//!
//! The selector walks graph nodes in iteration order and classifies each
//! one by operation kind. Stores are the primary roots; loads and address
//! computations can be enabled as additional root kinds. In Range mode a
//! sentinel variable toggles a two-state machine and every store seen while
//! the machine is Active becomes a root.
//!
//! Kind-based filtering lives entirely here and in reporting; the
//! traversal itself stays generic.

use vflow_graph::{GraphError, NodeId, ProgramGraph, ValueNode, ValueOp};

use crate::config::{TraceConfig, TraceMode};
use crate::normalize::normalize;
use crate::registry::TargetSet;

/// Range-mode tracing state, transitioned only by sentinel detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeState {
    /// Outside a sentinel-delimited range; stores do not fire.
    Idle,
    /// Inside a range; every store fires.
    Active,
}

impl RangeState {
    fn toggled(self) -> Self {
        match self {
            RangeState::Idle => RangeState::Active,
            RangeState::Active => RangeState::Idle,
        }
    }
}

/// A selected trace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    /// The node whose classification fired the trace.
    pub trigger: NodeId,
    /// The definition node the traversal starts from.
    pub definition: NodeId,
    /// Normalized name of the matched variable, when it has one.
    pub variable: Option<String>,
}

/// Classifies nodes into trace roots for one pass.
///
/// Holds the Range-mode state machine, so one selector must be used for a
/// whole pass and nodes must be fed in graph iteration order.
pub struct RootSelector<'a> {
    graph: &'a ProgramGraph,
    targets: &'a TargetSet,
    config: &'a TraceConfig,
    range: RangeState,
}

impl<'a> RootSelector<'a> {
    /// Creates a selector with the range machine in `Idle`.
    pub fn new(graph: &'a ProgramGraph, targets: &'a TargetSet, config: &'a TraceConfig) -> Self {
        RootSelector {
            graph,
            targets,
            config,
            range: RangeState::Idle,
        }
    }

    /// Current range-mode state.
    pub fn range_state(&self) -> RangeState {
        self.range
    }

    /// Decides whether `node` starts a trace and, if so, from where.
    pub fn classify(
        &mut self,
        id: NodeId,
        node: &ValueNode,
    ) -> Result<Option<Root>, GraphError> {
        match node.op {
            ValueOp::Store { address, .. } => self.classify_store(id, address),
            ValueOp::Load { address } if self.config.trace_loads => {
                self.classify_address_match(id, address)
            }
            ValueOp::AddressComputation { base } if self.config.trace_address_computation => {
                // The computation's own declared name is what the analyst
                // recognizes; the traversal starts from the base address it
                // was derived from.
                let Some(name) = node.name() else {
                    return Ok(None);
                };
                let variable = normalize(name);
                if !self.targets.contains(&variable) {
                    return Ok(None);
                }
                Ok(Some(Root {
                    trigger: id,
                    definition: self.graph.definition(base)?,
                    variable: Some(variable),
                }))
            }
            _ => Ok(None),
        }
    }

    fn classify_store(&mut self, id: NodeId, address: NodeId) -> Result<Option<Root>, GraphError> {
        match &self.config.mode {
            TraceMode::Specific => self.classify_address_match(id, address),
            TraceMode::Range { sentinel } => {
                let resolved = self.graph.strip_casts(address)?;
                let name = self.graph.require_value(resolved)?.name();
                // Sentinel comparison is on the raw name: a numbered gate
                // variable must not collapse into unrelated stores.
                if name == Some(sentinel.as_str()) {
                    self.range = self.range.toggled();
                    return Ok(None);
                }
                if self.range == RangeState::Idle {
                    return Ok(None);
                }
                Ok(Some(Root {
                    trigger: id,
                    definition: self.graph.definition(address)?,
                    variable: name.map(normalize),
                }))
            }
        }
    }

    /// The Specific-mode rule shared by stores and loads: normalize the
    /// resolved address name and match it against the target set.
    fn classify_address_match(
        &self,
        id: NodeId,
        address: NodeId,
    ) -> Result<Option<Root>, GraphError> {
        let resolved = self.graph.strip_casts(address)?;
        let Some(name) = self.graph.require_value(resolved)?.name() else {
            return Ok(None);
        };
        let variable = normalize(name);
        if !self.targets.contains(&variable) {
            return Ok(None);
        }
        Ok(Some(Root {
            trigger: id,
            definition: self.graph.definition(address)?,
            variable: Some(variable),
        }))
    }
}
