//! Error types for portscout.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-port probe
//! failures are not errors: an unreachable port is an expected outcome
//! and is folded into the port's state classification. Only scan-level
//! failures (bad input, unresolvable host) live here, and even those
//! are resolved into `ScanReport.error` rather than crossing the scan
//! boundary.

use thiserror::Error;

/// Scan-level failures that terminate a scan before any probing happens.
///
/// The `Display` output of each variant is the exact string recorded in
/// `ScanReport.error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The caller supplied an empty host string.
    #[error("Host cannot be empty")]
    InvalidInput,

    /// DNS resolution failed or returned no addresses for the host.
    #[error("Could not resolve host: {0}")]
    HostUnresolvable(String),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ScanError::InvalidInput.to_string(), "Host cannot be empty");
        assert_eq!(
            ScanError::HostUnresolvable("nope.invalid".to_string()).to_string(),
            "Could not resolve host: nope.invalid"
        );
    }
}
