//! # Portscout - A Concurrent Port Reconnaissance Engine
//!
//! Portscout probes a remote host to determine, for a bounded set of
//! TCP ports, whether each port is open, closed, or filtered, and
//! returns a structured, sorted report with per-port service guesses
//! and timing.
//!
//! ## Features
//!
//! - **Tri-state classification**: open / closed / filtered per port,
//!   based on structured connection error kinds
//! - **Bounded concurrency**: at most 50 simultaneous in-flight probes;
//!   additional probes wait for a slot, none are dropped
//! - **Deterministic reports**: results always sorted ascending by port,
//!   regardless of probe completion order
//! - **Graceful failure**: the caller always receives a well-formed
//!   report; validation and resolution failures land in its `error` field
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portscout::scanner::{scan, ScanRequest};
//! use portscout::types::parse_port_list;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let request = ScanRequest::new("example.com")
//!         .with_ports(parse_port_list("80,443"))
//!         .with_timeout(Duration::from_secs(2));
//!
//!     let report = scan(request).await;
//!     for outcome in &report.ports {
//!         println!("{} is {} ({})", outcome.port, outcome.state, outcome.service);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated `Port` newtype and port-list parsing
//! - [`resolver`] - Host normalization and DNS resolution
//! - [`scanner`] - The port prober and the scan coordinator
//! - [`services`] - Well-known port to service-name table
//! - [`error`] - Scan-level error types
//! - [`output`] - Report formatting utilities

pub mod cli;
pub mod error;
pub mod output;
pub mod resolver;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{ScanError, ScanResult};
pub use resolver::ResolvedHost;
pub use scanner::{scan, PortProbeOutcome, PortState, Prober, ScanReport, ScanRequest, TcpProber};
pub use types::{parse_port_list, Port};
