//! Runtime trace configuration.
//!
//! The original design selected modes and optional root kinds with
//! compile-time switches; here both are plain runtime values so every
//! combination is testable in one binary.

/// Which writes start a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceMode {
    /// Trace fires once per store whose normalized address name is in the
    /// target set.
    Specific,
    /// A sentinel variable name toggles tracing on and off; while on,
    /// every store fires regardless of target membership. The sentinel is
    /// compared against the raw (non-normalized) address name.
    Range { sentinel: String },
}

/// Configuration for one trace pass. Fixed before the pass starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceConfig {
    /// The operating mode.
    pub mode: TraceMode,
    /// Also treat matching loads as trace roots.
    pub trace_loads: bool,
    /// Also treat matching address computations as trace roots.
    pub trace_address_computation: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            mode: TraceMode::Specific,
            trace_loads: false,
            trace_address_computation: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_specific_with_stores_only() {
        let config = TraceConfig::default();
        assert_eq!(config.mode, TraceMode::Specific);
        assert!(!config.trace_loads);
        assert!(!config.trace_address_computation);
    }
}
