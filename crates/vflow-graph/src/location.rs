//! Source locations recovered from the analyzed program's debug info.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A source position attached to a value node when the analyzed program
/// carried debug information. Nodes without debug info have no location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Source file path as recorded in the debug info.
    pub file: String,
    /// 1-based line number.
    pub line: u32,
}

impl SourceLocation {
    /// Creates a location from a file path and line number.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        SourceLocation {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
