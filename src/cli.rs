//! Command-line interface definition.
//!
//! The CLI is the request/response surface of the engine: a required
//! host, an optional comma-separated port list, and a bounded timeout,
//! answered with a structured report. A missing host is rejected by
//! argument parsing before the engine is ever invoked.

use clap::Parser;

/// Portscout - a concurrent TCP port reconnaissance engine.
///
/// Resolves a host, probes a bounded set of TCP ports concurrently,
/// and reports each port as open, closed, or filtered along with a
/// service guess and total scan timing.
#[derive(Parser, Debug)]
#[command(name = "portscout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Probe a host's TCP ports and report open/closed/filtered state", long_about = None)]
pub struct Cli {
    /// Host to scan (hostname, IP address, or URL; scheme and path are stripped)
    #[arg(value_name = "HOST")]
    pub host: String,

    /// Comma-separated TCP ports to probe (e.g. "80,443,8080").
    ///
    /// Values outside 1-65535 are dropped silently. Defaults to a
    /// fixed set of 18 common service ports.
    #[arg(short, long, value_name = "PORTS")]
    pub ports: Option<String>,

    /// Per-connection timeout in seconds
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        default_value_t = 2,
        value_parser = clap::value_parser!(u64).range(1..=10)
    )]
    pub timeout: u64,

    /// Output format for the report
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Show a progress bar while probing
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}
