//! The trace pass: root selection, per-root traversal, reporting.

use std::io::Write;

use tracing::debug;

use vflow_graph::ProgramGraph;

use crate::config::TraceConfig;
use crate::error::TraceError;
use crate::registry::TargetSet;
use crate::report::TraceReporter;
use crate::select::RootSelector;
use crate::traverse::traverse;

/// Counts from one completed trace pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceSummary {
    /// Traversal sessions run (roots that fired).
    pub sessions: usize,
    /// Trace records emitted across all sessions.
    pub records: usize,
}

/// Runs trace passes over one graph.
///
/// The graph, target set, and configuration are all fixed for the pass;
/// the engine holds only shared references and can be rerun.
pub struct TraceEngine<'a> {
    graph: &'a ProgramGraph,
    targets: &'a TargetSet,
    config: &'a TraceConfig,
}

impl<'a> TraceEngine<'a> {
    /// Creates an engine over a built graph.
    pub fn new(graph: &'a ProgramGraph, targets: &'a TargetSet, config: &'a TraceConfig) -> Self {
        TraceEngine {
            graph,
            targets,
            config,
        }
    }

    /// Runs one pass: scans all nodes in iteration order, runs a traversal
    /// session for each selected root, and reports every session through
    /// `reporter`.
    pub fn run<W: Write>(
        &self,
        reporter: &mut TraceReporter<W>,
    ) -> Result<TraceSummary, TraceError> {
        let mut selector = RootSelector::new(self.graph, self.targets, self.config);
        let mut summary = TraceSummary::default();

        for (id, node) in self.graph.values() {
            let Some(root) = selector.classify(id, node)? else {
                continue;
            };
            debug!(
                trigger = %root.trigger,
                definition = %root.definition,
                variable = root.variable.as_deref().unwrap_or(""),
                "trace root selected"
            );

            let visited = traverse(self.graph, root.definition);
            summary.records += reporter.report_session(self.graph, &visited)?;
            summary.sessions += 1;
        }

        debug!(
            sessions = summary.sessions,
            records = summary.records,
            "trace pass finished"
        );
        Ok(summary)
    }
}
