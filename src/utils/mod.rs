//! Shared helpers for target resolution and scan ordering

pub mod scan_options;

use crate::ProbeError;
use std::net::IpAddr;

/// Resolve a host string to the first usable IP address.
///
/// An IPv4/IPv6 literal short-circuits; anything else goes through the
/// system resolver.
pub async fn resolve_host(host: &str) -> crate::Result<IpAddr> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let mut addrs = tokio::net::lookup_host((host, 0u16))
        .await
        .map_err(|e| ProbeError::Resolution(format!("{}: {}", host, e)))?;

    addrs
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| ProbeError::Resolution(format!("{}: no addresses returned", host)))
}
