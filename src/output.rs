//! Output formatting for scan reports.
//!
//! Provides plain text (human-readable, colored) and JSON rendering.
//! The JSON form is the report's canonical wire shape.

use crate::cli::OutputFormat;
use crate::scanner::{PortState, ScanReport};
use console::{style, Style};
use std::io::{self, Write};

/// Format and print a scan report according to the specified format.
pub fn print_report(report: &ScanReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => print_plain(report),
        OutputFormat::Json => print_json(report),
    }
}

/// Print a report in JSON format.
pub fn print_json(report: &ScanReport) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}

/// Print a report in human-readable plain text format.
pub fn print_plain(report: &ScanReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    writeln!(out, "  {} {}", style("Host:").bold(), report.host)?;

    if let Some(error) = &report.error {
        writeln!(out, "  {} {}", style("Error:").red().bold(), error)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "  {} {}", style("IP Address:").bold(), report.ip)?;
    writeln!(
        out,
        "  {} {} ports probed in {:.2}s",
        style("Summary:").bold(),
        report.ports.len(),
        report.duration.as_secs_f64()
    )?;
    writeln!(
        out,
        "           {} open, {} closed, {} filtered",
        style(report.open_count()).green().bold(),
        style(report.closed_count()).red(),
        style(report.filtered_count()).yellow()
    )?;
    writeln!(out)?;

    if report.ports.is_empty() {
        writeln!(out, "  {}", style("No ports to display.").dim())?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "  {:>6}  {:^10}  {}",
        style("PORT").bold(),
        style("STATE").bold(),
        style("SERVICE").bold()
    )?;
    writeln!(
        out,
        "  {}",
        style("──────────────────────────────────────").dim()
    )?;

    for outcome in &report.ports {
        let state_style = match outcome.state {
            PortState::Open => Style::new().green().bold(),
            PortState::Closed => Style::new().red(),
            PortState::Filtered => Style::new().yellow(),
        };

        writeln!(
            out,
            "  {:>6}  {:^10}  {}",
            outcome.port,
            state_style.apply_to(outcome.state.to_string()),
            outcome.service
        )?;
    }

    writeln!(out)?;
    Ok(())
}

/// Print an error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}
