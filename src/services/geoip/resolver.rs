use std::net::IpAddr;

use tracing::debug;

use crate::errors::{PrivacyApiError, Result};

/// Resolve a hostname to its first address.
///
/// IP literals are returned as-is. Any resolver failure is a validation
/// error: the caller gave us a name we cannot place.
pub async fn resolve_domain(domain: &str) -> Result<IpAddr> {
    let host = domain.trim().trim_end_matches('.');
    if host.is_empty() {
        return Err(PrivacyApiError::validation("Domain must not be empty"));
    }

    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let unresolvable = || PrivacyApiError::validation(format!("Could not resolve domain {}", host));

    let mut addrs = tokio::net::lookup_host((host, 0)).await.map_err(|e| {
        debug!("DNS resolution failed for {}: {}", host, e);
        unresolvable()
    })?;

    addrs.next().map(|addr| addr.ip()).ok_or_else(unresolvable)
}
