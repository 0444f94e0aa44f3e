//! Service identification based on well-known port numbers.
//!
//! Provides a static mapping from port numbers to human-readable
//! service labels. Pure lookup, no state.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Static map of well-known ports to service labels.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert(20, "FTP Data");
    m.insert(21, "FTP Control");
    m.insert(22, "SSH");
    m.insert(23, "Telnet");
    m.insert(25, "SMTP");
    m.insert(53, "DNS");
    m.insert(80, "HTTP");
    m.insert(110, "POP3");
    m.insert(143, "IMAP");
    m.insert(443, "HTTPS");
    m.insert(465, "SMTPS");
    m.insert(587, "SMTP Submission");
    m.insert(993, "IMAPS");
    m.insert(995, "POP3S");
    m.insert(1433, "MSSQL");
    m.insert(3306, "MySQL");
    m.insert(3389, "RDP");
    m.insert(5432, "PostgreSQL");
    m.insert(6379, "Redis");
    m.insert(8080, "HTTP Alternate");
    m.insert(8443, "HTTPS Alternate");
    m.insert(9000, "Prometheus");
    m.insert(9090, "Prometheus");
    m.insert(9200, "Elasticsearch");
    m.insert(9300, "Elasticsearch");
    m.insert(27017, "MongoDB");

    m
});

/// Look up the probable service label for a given port.
///
/// Returns `None` if the port is not in the well-known services table.
pub fn service_name(port: u16) -> Option<&'static str> {
    PORT_SERVICES.get(&port).copied()
}

/// Get the service label for a port, falling back to `"unknown"`.
pub fn service_label(port: u16) -> &'static str {
    service_name(port).unwrap_or("unknown")
}
