//! The target registry: the set of variable names to trace.
//!
//! Loaded once at startup from a line-oriented text source, one name per
//! line, stored verbatim and in order. The registry never normalizes its
//! entries; callers decide whether to normalize candidate names before
//! calling [`TargetSet::contains`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

/// Upper bound on registry size. Exceeding it is a load-time error, never
/// a silent truncation.
pub const TARGET_CAPACITY: usize = 1000;

/// Errors produced while loading a target list.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The target source could not be opened or read. Recoverable: callers
    /// log it and continue with an empty set.
    #[error("cannot read target list: {0}")]
    Unreadable(#[from] std::io::Error),

    /// The target source holds more entries than the fixed capacity.
    /// Fatal at load time.
    #[error("target list holds more than {capacity} entries")]
    CapacityExceeded { capacity: usize },
}

/// An ordered, bounded, immutable set of target variable names.
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    entries: Vec<String>,
}

impl TargetSet {
    /// Creates an empty set. Tracing over it matches nothing.
    pub fn empty() -> Self {
        TargetSet::default()
    }

    /// Reads one entry per line from `reader`, in order.
    pub fn load(reader: impl BufRead) -> Result<Self, RegistryError> {
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if entries.len() == TARGET_CAPACITY {
                return Err(RegistryError::CapacityExceeded {
                    capacity: TARGET_CAPACITY,
                });
            }
            entries.push(line);
        }
        Ok(TargetSet { entries })
    }

    /// Opens `path` and reads it as a target list.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let file = File::open(path)?;
        Self::load(BufReader::new(file))
    }

    /// Exact string comparison against the stored entries, O(n).
    ///
    /// Called once per candidate root; the registry is small enough that a
    /// linear scan beats maintaining an index.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry == name)
    }

    /// Iterates over entries in load order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of loaded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no entries are loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
