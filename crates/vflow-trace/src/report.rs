//! Trace record generation and output.
//!
//! For every node a traversal visits, in discovery order, the reporter
//! emits one [`TraceRecord`] if the node is a store with a named address.
//! All other kinds are visited for graph completeness but carry no
//! reportable data. Records go to the reporter's output stream; diagnostics
//! stay on the log stream so the record stream remains parseable.

use std::io::Write;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use vflow_graph::{GraphError, NodeId, ProgramGraph, ValueOp};

use crate::error::TraceError;
use crate::normalize::normalize;

/// One reported store: the written variable and, when debug info was
/// available, where the write happens in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Normalized name of the written variable.
    pub variable: String,
    /// Source file, when the store carried a location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Source line, when the store carried a location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Output format for trace records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// `variable` or `variable, file, line`, one record per line.
    Text,
    /// One JSON object per line.
    Json,
}

/// Builds the record for one visited node, or `None` when the node emits
/// nothing (not a store, or its address has no recoverable name).
pub fn record_for(graph: &ProgramGraph, id: NodeId) -> Result<Option<TraceRecord>, GraphError> {
    let node = graph.require_value(id)?;
    let ValueOp::Store { address, .. } = node.op else {
        return Ok(None);
    };

    let resolved = graph.strip_casts(address)?;
    let Some(name) = graph.require_value(resolved)?.name() else {
        // Compiler temporaries have no source name; nothing to report.
        return Ok(None);
    };

    Ok(Some(TraceRecord {
        variable: normalize(name),
        file: node.location.as_ref().map(|loc| loc.file.clone()),
        line: node.location.as_ref().map(|loc| loc.line),
    }))
}

/// Writes trace records for traversal sessions to one output stream.
pub struct TraceReporter<W: Write> {
    out: W,
    format: ReportFormat,
}

impl<W: Write> TraceReporter<W> {
    /// Creates a reporter over `out`.
    pub fn new(out: W, format: ReportFormat) -> Self {
        TraceReporter { out, format }
    }

    /// Emits records for one session's visited set, in discovery order.
    ///
    /// Returns the number of records written. Sessions are reported
    /// independently: a node reachable in several sessions is reported in
    /// each of them.
    pub fn report_session(
        &mut self,
        graph: &ProgramGraph,
        visited: &IndexSet<NodeId>,
    ) -> Result<usize, TraceError> {
        let mut emitted = 0;
        for &id in visited {
            if let Some(record) = record_for(graph, id)? {
                self.emit(&record)?;
                emitted += 1;
            }
        }
        Ok(emitted)
    }

    fn emit(&mut self, record: &TraceRecord) -> Result<(), TraceError> {
        match self.format {
            ReportFormat::Text => match (&record.file, record.line) {
                (Some(file), Some(line)) => {
                    writeln!(self.out, "{}, {}, {}", record.variable, file, line)?
                }
                _ => writeln!(self.out, "{}", record.variable)?,
            },
            ReportFormat::Json => {
                let json = serde_json::to_string(record)?;
                writeln!(self.out, "{}", json)?;
            }
        }
        Ok(())
    }

    /// Consumes the reporter, returning the output stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}
