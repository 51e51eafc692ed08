//! 客户端 IP 提取
//!
//! 默认只信任 TCP 对端地址；只有当对端命中 `server.trusted_proxies`
//! （单 IP 或 CIDR）时才读取 X-Forwarded-For / X-Real-IP。

use std::net::{IpAddr, SocketAddr};

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;
use tracing::{debug, warn};

/// 一条可信代理规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProxyRule {
    Addr(IpAddr),
    Cidr(IpAddr, u8),
}

impl ProxyRule {
    fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim();
        match entry.split_once('/') {
            Some((network, prefix)) => {
                let network: IpAddr = network.parse().ok()?;
                let prefix: u8 = prefix.parse().ok()?;
                let max = if network.is_ipv4() { 32 } else { 128 };
                (prefix <= max).then_some(ProxyRule::Cidr(network, prefix))
            }
            None => entry.parse().ok().map(ProxyRule::Addr),
        }
    }

    fn matches(&self, ip: &IpAddr) -> bool {
        match *self {
            ProxyRule::Addr(addr) => addr == *ip,
            ProxyRule::Cidr(network, prefix) => ip_in_network(ip, &network, prefix),
        }
    }
}

/// CIDR 匹配，v4 与 v6 互不匹配
pub fn ip_in_network(ip: &IpAddr, network: &IpAddr, prefix_len: u8) -> bool {
    match (ip, network) {
        (IpAddr::V4(ip), IpAddr::V4(net)) => {
            let mask = u32::MAX.checked_shl(32 - prefix_len as u32).unwrap_or(0);
            (u32::from(*ip) & mask) == (u32::from(*net) & mask)
        }
        (IpAddr::V6(ip), IpAddr::V6(net)) => {
            let mask = u128::MAX.checked_shl(128 - prefix_len as u32).unwrap_or(0);
            (u128::from(*ip) & mask) == (u128::from(*net) & mask)
        }
        _ => false,
    }
}

/// Parsed `server.trusted_proxies`.
///
/// Shared with handlers through `web::Data`. An empty list means forwarding
/// headers are never honoured.
#[derive(Debug, Clone, Default)]
pub struct TrustedProxies {
    rules: Vec<ProxyRule>,
}

impl TrustedProxies {
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Self {
        let rules = entries
            .iter()
            .filter_map(|entry| {
                let entry = entry.as_ref();
                let rule = ProxyRule::parse(entry);
                if rule.is_none() {
                    warn!("Ignoring invalid trusted proxy entry: {:?}", entry);
                }
                rule
            })
            .collect();
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn is_trusted(&self, ip: &IpAddr) -> bool {
        self.rules.iter().any(|rule| rule.matches(ip))
    }

    /// Resolve the client address of a request.
    ///
    /// Returns `None` only when the connection has no peer address (for
    /// example a Unix socket).
    pub fn client_ip(&self, req: &HttpRequest) -> Option<IpAddr> {
        let peer = req.peer_addr()?.ip();
        Some(self.resolve(peer, req.headers()))
    }

    fn resolve(&self, peer: IpAddr, headers: &HeaderMap) -> IpAddr {
        if !self.is_trusted(&peer) {
            return peer;
        }
        match forwarded_ip(headers) {
            Some(real_ip) => {
                debug!("Trusted proxy {} forwarded client {}", peer, real_ip);
                real_ip
            }
            None => peer,
        }
    }
}

/// 从请求头提取转发的 IP：优先 X-Forwarded-For 的第一个，其次 X-Real-IP
fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let header = |name: &str| headers.get(name).and_then(|h| h.to_str().ok());

    header("x-forwarded-for")
        .and_then(|s| s.split(',').next())
        .and_then(parse_addr)
        .or_else(|| header("x-real-ip").and_then(parse_addr))
}

// 兼容 "ip" 和 "ip:port"
fn parse_addr(value: &str) -> Option<IpAddr> {
    let value = value.trim();
    value
        .parse::<IpAddr>()
        .ok()
        .or_else(|| value.parse::<SocketAddr>().ok().map(|s| s.ip()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(
                HeaderName::from_static(k),
                HeaderValue::from_static(v),
            );
        }
        map
    }

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_ip_in_network() {
        assert!(ip_in_network(&ip("192.168.1.100"), &ip("192.168.1.0"), 24));
        assert!(ip_in_network(&ip("192.168.1.100"), &ip("192.168.0.0"), 16));
        assert!(!ip_in_network(&ip("192.168.1.100"), &ip("10.0.0.0"), 8));
        assert!(ip_in_network(&ip("2001:db8::1"), &ip("2001:db8::"), 32));
        assert!(!ip_in_network(&ip("2001:db8::1"), &ip("10.0.0.0"), 8));
        assert!(ip_in_network(&ip("8.8.8.8"), &ip("0.0.0.0"), 0));
    }

    #[test]
    fn test_invalid_entries_are_dropped() {
        let proxies = TrustedProxies::new(&["10.0.0.1", "bogus", "10.0.0.0/33", "172.16.0.0/12"]);
        assert!(proxies.is_trusted(&ip("10.0.0.1")));
        assert!(proxies.is_trusted(&ip("172.20.1.1")));
        assert!(!proxies.is_trusted(&ip("10.0.0.2")));
    }

    #[test]
    fn test_untrusted_peer_ignores_forwarded_headers() {
        let proxies = TrustedProxies::new(&["127.0.0.1"]);
        let h = headers(&[("x-forwarded-for", "1.2.3.4")]);
        assert_eq!(proxies.resolve(ip("8.8.8.8"), &h), ip("8.8.8.8"));

        let none = TrustedProxies::default();
        assert!(none.is_empty());
        assert_eq!(none.resolve(ip("127.0.0.1"), &h), ip("127.0.0.1"));
    }

    #[test]
    fn test_trusted_peer_uses_first_forwarded_entry() {
        let proxies = TrustedProxies::new(&["127.0.0.0/8"]);
        let h = headers(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1")]);
        assert_eq!(proxies.resolve(ip("127.0.0.1"), &h), ip("203.0.113.7"));
    }

    #[test]
    fn test_trusted_peer_falls_back_to_real_ip_then_peer() {
        let proxies = TrustedProxies::new(&["127.0.0.1"]);
        let h = headers(&[("x-real-ip", "198.51.100.2:5555")]);
        assert_eq!(proxies.resolve(ip("127.0.0.1"), &h), ip("198.51.100.2"));

        let garbage = headers(&[("x-forwarded-for", "unknown")]);
        assert_eq!(proxies.resolve(ip("127.0.0.1"), &garbage), ip("127.0.0.1"));
    }
}
