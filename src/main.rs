//! Portscout binary entry point.

use anyhow::Result;
use clap::Parser;
use portscout::cli::Cli;
use portscout::output;
use portscout::scanner::{scan, ScanRequest};
use portscout::types::parse_port_list;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut request =
        ScanRequest::new(&cli.host).with_timeout(Duration::from_secs(cli.timeout));

    if let Some(ports) = &cli.ports {
        request = request.with_ports(parse_port_list(ports));
    }

    if cli.verbose {
        request = request.with_verbose();
    }

    let report = scan(request).await;
    output::print_report(&report, cli.format)?;

    Ok(())
}
