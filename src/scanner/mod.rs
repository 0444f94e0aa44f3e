//! Scan coordination.
//!
//! The coordinator resolves a host once, fans out one probe task per
//! port under a bounded-concurrency admission policy, aggregates the
//! outcomes, and returns a deterministically ordered report. Probes
//! race freely during execution; the only ordering guarantee is the
//! final ascending sort by port number.

pub mod probe;

pub use probe::{PortProbeOutcome, PortState, Prober, TcpProber};

use crate::error::ScanError;
use crate::resolver::{self, ResolvedHost};
use crate::types::Port;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Serialize, Serializer};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, Semaphore};
use tracing::info;

/// Maximum number of simultaneously in-flight probes.
///
/// Admission control, not backpressure: probes past the ceiling block
/// on a permit rather than being rejected, so every port is eventually
/// probed.
pub const MAX_CONCURRENT_PROBES: usize = 50;

/// Safety cap on the number of ports probed in one scan.
pub const MAX_PORTS_PER_SCAN: usize = 1000;

/// Per-connection timeout used when the caller does not supply one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Ports probed when the request does not name any.
pub const DEFAULT_PORTS: [u16; 18] = [
    21, 22, 23, 25, 53, 80, 110, 143, 443, 465, 587, 993, 995, 3306, 3389, 5432, 8080, 8443,
];

/// A request to scan one host.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Host to scan (hostname, IP, or URL; normalized before resolution).
    pub host: String,
    /// Requested ports; empty means "use [`DEFAULT_PORTS`]".
    pub ports: Vec<Port>,
    /// Per-probe connection timeout.
    pub timeout: Duration,
    /// Show a progress bar while probing.
    pub verbose: bool,
}

impl ScanRequest {
    /// Create a request with the default port set and timeout.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ports: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            verbose: false,
        }
    }

    /// Set the ports to probe.
    pub fn with_ports(mut self, ports: Vec<Port>) -> Self {
        self.ports = ports;
        self
    }

    /// Set the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable progress display.
    pub fn with_verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

/// Complete scan report, the only externally visible artifact.
///
/// Always well-formed: a scan that fails before probing carries an
/// `error` string and an empty port list. A scan where every port is
/// closed or filtered is a legitimate result, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Host as supplied in the request.
    pub host: String,
    /// Resolved IP address (empty when resolution never happened).
    pub ip: String,
    /// Per-port outcomes, ascending by port number.
    pub ports: Vec<PortProbeOutcome>,
    /// Total wall-clock duration of the scan.
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
    /// Scan-level failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanReport {
    fn failed(host: String, error: ScanError, duration: Duration) -> Self {
        Self {
            host,
            ip: String::new(),
            ports: Vec::new(),
            duration,
            error: Some(error.to_string()),
        }
    }

    /// Number of open ports in the report.
    pub fn open_count(&self) -> usize {
        self.count_state(PortState::Open)
    }

    /// Number of closed ports in the report.
    pub fn closed_count(&self) -> usize {
        self.count_state(PortState::Closed)
    }

    /// Number of filtered ports in the report.
    pub fn filtered_count(&self) -> usize {
        self.count_state(PortState::Filtered)
    }

    fn count_state(&self, state: PortState) -> usize {
        self.ports.iter().filter(|o| o.state == state).count()
    }
}

/// Serialize a duration as a human-readable string (e.g. `"1.52s"`).
fn serialize_duration<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&format_args!("{d:?}"))
}

/// Compute the effective port set for a request.
///
/// Empty input substitutes the default set; the list is capped at
/// [`MAX_PORTS_PER_SCAN`] entries (excess truncated) and then sorted
/// ascending for deterministic probe dispatch.
pub fn effective_ports(requested: &[Port]) -> Vec<Port> {
    let mut ports: Vec<Port> = if requested.is_empty() {
        DEFAULT_PORTS.iter().copied().map(Port::new_unchecked).collect()
    } else {
        requested.to_vec()
    };

    ports.truncate(MAX_PORTS_PER_SCAN);
    ports.sort_unstable();
    ports
}

/// Execute a complete port scan.
///
/// Never fails at the API boundary: validation and resolution failures
/// are reported through `ScanReport.error`, and per-port failures are
/// absorbed into each port's state classification.
pub async fn scan(request: ScanRequest) -> ScanReport {
    let started = Instant::now();

    if request.host.trim().is_empty() {
        return ScanReport::failed(request.host, ScanError::InvalidInput, started.elapsed());
    }

    let resolved = match resolver::resolve(&request.host).await {
        Ok(resolved) => resolved,
        Err(e) => return ScanReport::failed(request.host, e, started.elapsed()),
    };

    let prober = Arc::new(TcpProber::new(resolved.ip, request.timeout));
    scan_resolved(&request, resolved, prober, started).await
}

/// Run the probing phase against an already-resolved host.
///
/// Exposed so callers (and tests) can substitute a custom [`Prober`];
/// `scan` wires in the TCP prober.
pub async fn scan_resolved(
    request: &ScanRequest,
    resolved: ResolvedHost,
    prober: Arc<dyn Prober>,
    started: Instant,
) -> ScanReport {
    let ports = effective_ports(&request.ports);

    info!(
        host = %resolved.original,
        ip = %resolved.ip,
        ports = ports.len(),
        "starting scan"
    );

    let mut outcomes = run_probes(prober, ports, request.verbose).await;

    // Probes complete in arbitrary order; the report must not leak
    // that nondeterminism.
    outcomes.sort_unstable_by_key(|o| o.port);

    let report = ScanReport {
        host: resolved.original,
        ip: resolved.ip.to_string(),
        ports: outcomes,
        duration: started.elapsed(),
        error: None,
    };

    info!(
        open = report.open_count(),
        closed = report.closed_count(),
        filtered = report.filtered_count(),
        duration = ?report.duration,
        "scan complete"
    );

    report
}

/// Dispatch one probe task per port under the admission ceiling.
///
/// Each task blocks only on acquiring a semaphore permit and on its
/// connection attempt; the permit is released on every path. Outcomes
/// are appended to a mutex-guarded list from the concurrently running
/// tasks, and this function returns only after all of them complete.
async fn run_probes(
    prober: Arc<dyn Prober>,
    ports: Vec<Port>,
    verbose: bool,
) -> Vec<PortProbeOutcome> {
    let total = ports.len();
    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_PROBES));
    let outcomes = Arc::new(Mutex::new(Vec::with_capacity(total)));

    let progress = if verbose {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    stream::iter(ports)
        .for_each_concurrent(None, |port| {
            let sem = Arc::clone(&semaphore);
            let prober = Arc::clone(&prober);
            let outcomes = Arc::clone(&outcomes);
            let progress = progress.clone();

            async move {
                // The permit bounds in-flight probes; held for the
                // whole attempt, released when dropped.
                let _permit = sem.acquire().await.unwrap();

                let outcome = prober.probe(port).await;

                if let Some(pb) = &progress {
                    pb.inc(1);
                    if outcome.state == PortState::Open {
                        pb.set_message(format!("Found open port: {port}"));
                    }
                }

                outcomes.lock().await.push(outcome);
            }
        })
        .await;

    if let Some(pb) = progress {
        pb.finish_with_message("Scan complete");
    }

    // All tasks have joined; take the collected outcomes.
    let collected = std::mem::take(&mut *outcomes.lock().await);
    collected
}
