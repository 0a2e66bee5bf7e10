//! The [`GraphProvider`] trait defining the graph construction contract.

use std::path::PathBuf;

use vflow_graph::ProgramGraph;

use crate::error::ProviderError;

/// The contract for building a value-flow graph from program module inputs.
///
/// Implementations own the whole construction pipeline; the tracer only
/// sees the finished, read-only [`ProgramGraph`]. The trait is synchronous:
/// a trace pass is a single-threaded batch run.
pub trait GraphProvider {
    /// Builds one graph covering all the given module inputs.
    fn build_graph(&self, modules: &[PathBuf]) -> Result<ProgramGraph, ProviderError>;
}
