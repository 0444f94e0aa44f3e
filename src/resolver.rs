//! Host normalization and DNS resolution.
//!
//! Turns a user-supplied host string (which may carry a URL scheme or
//! path) into a concrete IP address. Resolution happens exactly once
//! per scan; the result is never cached or shared across scans.

use crate::error::{ScanError, ScanResult};
use std::net::IpAddr;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// A host that has been resolved to a concrete IP address.
///
/// Owned exclusively by the active scan; immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHost {
    /// The host string as the caller supplied it.
    pub original: String,
    /// The resolved IP address.
    pub ip: IpAddr,
}

/// Strip a URL scheme prefix and path suffix from a host string.
///
/// `http://example.com/path` and `example.com` both normalize to
/// `example.com`.
pub fn normalize_host(input: &str) -> &str {
    let host = input
        .strip_prefix("http://")
        .or_else(|| input.strip_prefix("https://"))
        .unwrap_or(input);

    match host.split_once('/') {
        Some((host, _path)) => host,
        None => host,
    }
}

/// Resolve a host string to an IP address.
///
/// IP literals short-circuit without a DNS query. For hostnames, the
/// first address of the resolver response is chosen; the selection is
/// stable for a given response ordering. Resolution failure is terminal
/// for the scan, no retry is attempted.
pub async fn resolve(host_input: &str) -> ScanResult<ResolvedHost> {
    let candidate = normalize_host(host_input.trim());

    if let Ok(ip) = candidate.parse::<IpAddr>() {
        return Ok(ResolvedHost {
            original: host_input.to_string(),
            ip,
        });
    }

    let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());

    let response = resolver
        .lookup_ip(candidate)
        .await
        .map_err(|_| ScanError::HostUnresolvable(candidate.to_string()))?;

    let ip = response
        .iter()
        .next()
        .ok_or_else(|| ScanError::HostUnresolvable(candidate.to_string()))?;

    debug!(host = candidate, %ip, "resolved host");

    Ok(ResolvedHost {
        original: host_input.to_string(),
        ip,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_normalize_strips_http_scheme() {
        assert_eq!(normalize_host("http://example.com"), "example.com");
        assert_eq!(normalize_host("https://example.com"), "example.com");
    }

    #[test]
    fn test_normalize_strips_path() {
        assert_eq!(normalize_host("example.com/some/path"), "example.com");
        assert_eq!(normalize_host("https://example.com/login?x=1"), "example.com");
    }

    #[test]
    fn test_normalize_passthrough() {
        assert_eq!(normalize_host("example.com"), "example.com");
        assert_eq!(normalize_host("192.168.1.1"), "192.168.1.1");
    }

    #[tokio::test]
    async fn test_resolve_ip_literal() {
        let resolved = resolve("127.0.0.1").await.unwrap();
        assert_eq!(resolved.ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(resolved.original, "127.0.0.1");
    }

    #[tokio::test]
    async fn test_resolve_ip_literal_with_scheme() {
        let resolved = resolve("http://127.0.0.1/admin").await.unwrap();
        assert_eq!(resolved.ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[tokio::test]
    async fn test_resolve_invalid_host() {
        // .invalid is reserved (RFC 2606): NXDOMAIN when a resolver is
        // reachable, resolver error otherwise. Both classify the same way.
        let err = resolve("host.invalid").await.unwrap_err();
        match err {
            ScanError::HostUnresolvable(host) => assert_eq!(host, "host.invalid"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
