//! Provider error types.
//!
//! [`ProviderError`] covers all anticipated failure modes at the provider
//! boundary: unreadable inputs, undecodable inputs, and declarations that
//! do not reconstruct into a well-formed graph.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building a program graph from module inputs.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A module input could not be opened or read.
    #[error("cannot read module {path}: {source}", path = path.display())]
    UnreadableModule {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A module input was not valid JSON for the module format.
    #[error("cannot decode module {path}: {source}", path = path.display())]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A module's declarations do not form a well-formed graph.
    #[error("malformed module {path}: {reason}", path = path.display())]
    MalformedModule { path: PathBuf, reason: String },
}
