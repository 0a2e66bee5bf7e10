//! Trace pass error types.

use thiserror::Error;

use vflow_graph::GraphError;

/// Errors produced while running a trace pass.
///
/// Graph errors here mean the provider handed over an inconsistent graph;
/// builder validation in `vflow-graph` makes that unreachable in practice,
/// but the engine propagates rather than panics.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The graph violated an invariant (dangling reference).
    #[error("graph inconsistency: {0}")]
    Graph(#[from] GraphError),

    /// A trace record could not be written to the output stream.
    #[error("cannot write trace record: {0}")]
    Output(#[from] std::io::Error),

    /// A trace record could not be encoded as JSON.
    #[error("cannot encode trace record: {0}")]
    Encode(#[from] serde_json::Error),
}
