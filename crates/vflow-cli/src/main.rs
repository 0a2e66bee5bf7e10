//! Value-flow tracing CLI.
//!
//! Provides the `vflow` binary: loads the target list, asks the provider
//! for the value-flow graph of the given program modules, then runs one
//! batch trace pass. Trace records go to stdout; diagnostics go to stderr
//! via `tracing`, keeping the record stream parseable.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use vflow_provider::{GraphProvider, JsonModuleProvider};
use vflow_trace::{
    RegistryError, ReportFormat, TargetSet, TraceConfig, TraceEngine, TraceMode, TraceReporter,
};

/// Trace target variables through a program's value-flow graph.
#[derive(Parser)]
#[command(name = "vflow", about = "Trace target variables through a value-flow graph")]
struct Cli {
    /// Program module files to analyze.
    #[arg(required = true)]
    modules: Vec<PathBuf>,

    /// Target list file, one variable name per line.
    #[arg(short, long, default_value = "trace_targets.txt")]
    targets: PathBuf,

    /// Tracing mode: specific or range.
    #[arg(short, long, default_value = "specific")]
    mode: String,

    /// Sentinel variable delimiting the traced range (range mode only).
    #[arg(short, long)]
    sentinel: Option<String>,

    /// Also trace loads of target variables.
    #[arg(long)]
    trace_loads: bool,

    /// Also trace address computations named after target variables.
    #[arg(long)]
    trace_address_computation: bool,

    /// Record output format: text or json.
    #[arg(short, long, default_value = "text")]
    format: String,
}

fn main() {
    // Diagnostics must not interleave with the record stream on stdout.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    process::exit(run_trace(cli));
}

/// Execute the trace pass.
///
/// Returns exit code: 0 = success, 1 = configuration error,
/// 2 = provider failure, 3 = trace pass failure.
fn run_trace(cli: Cli) -> i32 {
    let format = match parse_format(&cli.format) {
        Ok(format) => format,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 1;
        }
    };

    let mode = match parse_mode(&cli.mode, cli.sentinel) {
        Ok(mode) => mode,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 1;
        }
    };

    let config = TraceConfig {
        mode,
        trace_loads: cli.trace_loads,
        trace_address_computation: cli.trace_address_computation,
    };

    // An unreadable target list is recoverable: the pass runs with an
    // empty set and simply emits no records. Overflow is not.
    let targets = match TargetSet::load_path(&cli.targets) {
        Ok(targets) => targets,
        Err(err @ RegistryError::Unreadable(_)) => {
            tracing::warn!(
                path = %cli.targets.display(),
                "{}; continuing with an empty target set",
                err
            );
            TargetSet::empty()
        }
        Err(err @ RegistryError::CapacityExceeded { .. }) => {
            eprintln!("Error: {}", err);
            return 1;
        }
    };

    // Enumerated target listing, matching the record stream's format
    // discipline: stdout only carries the listing and the records.
    for (index, name) in targets.iter().enumerate() {
        println!("{}. {}", index, name);
    }
    tracing::info!(targets = targets.len(), "target registry loaded");

    let provider = JsonModuleProvider::new();
    let graph = match provider.build_graph(&cli.modules) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("Error: {}", err);
            return 2;
        }
    };
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "value-flow graph built"
    );

    let stdout = io::stdout();
    let mut reporter = TraceReporter::new(stdout.lock(), format);
    match TraceEngine::new(&graph, &targets, &config).run(&mut reporter) {
        Ok(summary) => {
            tracing::info!(
                sessions = summary.sessions,
                records = summary.records,
                "trace pass complete"
            );
            0
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            3
        }
    }
}

/// Parse a mode string plus optional sentinel into a `TraceMode`.
fn parse_mode(mode: &str, sentinel: Option<String>) -> Result<TraceMode, String> {
    match mode {
        "specific" => {
            if sentinel.is_some() {
                return Err("--sentinel only applies to range mode".into());
            }
            Ok(TraceMode::Specific)
        }
        "range" => match sentinel {
            Some(sentinel) => Ok(TraceMode::Range { sentinel }),
            None => Err("range mode requires --sentinel".into()),
        },
        _ => Err(format!(
            "invalid mode '{}', expected specific/range",
            mode
        )),
    }
}

/// Parse an output format string to a `ReportFormat`.
fn parse_format(s: &str) -> Result<ReportFormat, String> {
    match s {
        "text" => Ok(ReportFormat::Text),
        "json" => Ok(ReportFormat::Json),
        _ => Err(format!("invalid format '{}', expected text/json", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parsing() {
        assert_eq!(parse_mode("specific", None).unwrap(), TraceMode::Specific);
        assert_eq!(
            parse_mode("range", Some("gate".into())).unwrap(),
            TraceMode::Range {
                sentinel: "gate".into()
            }
        );
        assert!(parse_mode("range", None).is_err());
        assert!(parse_mode("specific", Some("gate".into())).is_err());
        assert!(parse_mode("both", None).is_err());
    }

    #[test]
    fn format_parsing() {
        assert_eq!(parse_format("text").unwrap(), ReportFormat::Text);
        assert_eq!(parse_format("json").unwrap(), ReportFormat::Json);
        assert!(parse_format("xml").is_err());
    }
}
