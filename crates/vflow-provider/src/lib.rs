//! The graph provider boundary for vflow.
//!
//! The tracer does not build value-flow graphs itself; it consumes a graph
//! an external analysis produced. This crate defines that boundary:
//!
//! - [`traits`]: the [`GraphProvider`] trait -- `build_graph` turns module
//!   inputs into one [`ProgramGraph`](vflow_graph::ProgramGraph)
//! - [`module_file`]: the serialized module format (value and edge
//!   declarations with file-local references)
//! - [`json`]: [`JsonModuleProvider`], reconstructing a graph from one or
//!   more JSON module files
//! - [`error`]: [`ProviderError`] with all failure modes
//!
//! Provider failures are fatal to a trace pass: callers report them and
//! exit, there are no retries.

pub mod error;
pub mod json;
pub mod module_file;
pub mod traits;

// Re-export key types for ergonomic use.
pub use error::ProviderError;
pub use json::JsonModuleProvider;
pub use module_file::{EdgeDecl, EdgeKindDecl, ModuleFile, OpDecl, ValueDecl};
pub use traits::GraphProvider;
