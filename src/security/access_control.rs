//! Network-origin access gate.
//!
//! Classifies the origin of a request as local or external. The candidate
//! address is the first hop of `X-Forwarded-For` when present, otherwise
//! the address of the accepted connection.
//!
//! Local means one of:
//! - an exact literal in the allow list (`127.0.0.1`, `0.0.0.0`, `localhost`,
//!   `192.168.0.100` plus configured extras)
//! - a `127.` or `192.` prefix
//! - the `172.16.0.0/12` block (second octet 16..=31)
//!
//! Everything else, including a missing address, is denied.

use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};

use crate::config::AccessConfig;

const BASE_LITERALS: [&str; 4] = ["127.0.0.1", "0.0.0.0", "localhost", "192.168.0.100"];
const LOCAL_PREFIXES: [&str; 2] = ["127.", "192."];

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }
}

/// Fixed set of rules describing local addresses.
#[derive(Debug, Clone)]
pub struct AllowList {
    literals: HashSet<String>,
}

impl AllowList {
    /// Base literals plus `extra` entries.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut literals: HashSet<String> = BASE_LITERALS.iter().map(|s| s.to_string()).collect();
        literals.extend(extra.into_iter().map(Into::into));
        Self { literals }
    }

    /// Returns true if the address is considered local.
    pub fn is_local(&self, address: &str) -> bool {
        if self.literals.contains(address) {
            return true;
        }

        if LOCAL_PREFIXES.iter().any(|p| address.starts_with(p)) {
            return true;
        }

        is_private_172(address)
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}

/// `172.16.0.0/12`: second octet in 16..=31. Unparseable octets never match.
fn is_private_172(address: &str) -> bool {
    let Some(rest) = address.strip_prefix("172.") else {
        return false;
    };

    rest.split('.')
        .next()
        .and_then(|octet| octet.parse::<u8>().ok())
        .is_some_and(|octet| (16..=31).contains(&octet))
}

/// Pick the address to classify.
///
/// A non-empty forwarding header wins; its first comma-separated entry is
/// taken as the original client, even when that entry is blank. A blank
/// candidate is never local.
pub fn resolve_client_address(forwarded_for: Option<&str>, direct: Option<&str>) -> Option<String> {
    if let Some(header) = forwarded_for.filter(|h| !h.is_empty()) {
        let first = header.split(',').next().unwrap_or_default().trim();
        return Some(first.to_string());
    }

    direct
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Render a peer address for classification. IPv4-mapped IPv6 addresses
/// are shown in dotted-quad form.
pub fn peer_ip_string(addr: &SocketAddr) -> String {
    match addr.ip() {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            None => v6.to_string(),
        },
        IpAddr::V4(v4) => v4.to_string(),
    }
}

/// Stateless gate combining the allow list with the forwarding-header policy.
#[derive(Debug, Clone)]
pub struct AccessGate {
    allow_list: AllowList,
    trusted_proxies: Vec<String>,
}

impl AccessGate {
    pub fn new(allow_list: AllowList, trusted_proxies: Vec<String>) -> Self {
        Self {
            allow_list,
            trusted_proxies,
        }
    }

    pub fn from_config(config: &AccessConfig) -> Self {
        Self::new(
            AllowList::new(config.allowed_ips.iter().cloned()),
            config.trusted_proxies.clone(),
        )
    }

    /// The address whose locality decides the request.
    ///
    /// With no trusted proxies configured the forwarding header is taken at
    /// face value. Otherwise it is only honoured when the direct peer is a
    /// trusted proxy.
    pub fn candidate(&self, forwarded_for: Option<&str>, direct: Option<&str>) -> Option<String> {
        let header_trusted = self.trusted_proxies.is_empty()
            || direct.is_some_and(|d| self.trusted_proxies.iter().any(|p| p == d));

        let forwarded_for = if header_trusted { forwarded_for } else { None };
        resolve_client_address(forwarded_for, direct)
    }

    pub fn classify(&self, forwarded_for: Option<&str>, direct: Option<&str>) -> Decision {
        match self.candidate(forwarded_for, direct) {
            Some(address) if self.allow_list.is_local(&address) => Decision::Allow,
            _ => Decision::Deny,
        }
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(AllowList::default(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_and_prefixes() {
        let list = AllowList::default();
        for addr in ["127.0.0.1", "0.0.0.0", "localhost", "192.168.0.100", "127.8.9.10", "192.0.2.1"] {
            assert!(list.is_local(addr), "{addr} should be local");
        }
        for addr in ["10.0.0.5", "203.0.113.5", "8.8.8.8", "", "::1", "local"] {
            assert!(!list.is_local(addr), "{addr} should be external");
        }
    }

    #[test]
    fn test_private_172_block() {
        let list = AllowList::default();
        assert!(list.is_local("172.16.0.1"));
        assert!(list.is_local("172.20.5.5"));
        assert!(list.is_local("172.31.255.255"));
        assert!(!list.is_local("172.15.0.1"));
        assert!(!list.is_local("172.32.0.1"));
        assert!(!list.is_local("172.40.5.5"));
        assert!(!list.is_local("172.abc.0.1"));
        assert!(!list.is_local("172."));
        assert!(!list.is_local("1720.20.0.1"));
    }

    #[test]
    fn test_extra_literals() {
        let list = AllowList::new(["10.9.8.7", "::1"]);
        assert!(list.is_local("10.9.8.7"));
        assert!(list.is_local("::1"));
        assert!(!list.is_local("10.9.8.6"));
    }

    #[test]
    fn test_resolve_client_address() {
        assert_eq!(
            resolve_client_address(Some("172.20.5.5, 10.0.0.1"), Some("8.8.8.8")).as_deref(),
            Some("172.20.5.5")
        );
        assert_eq!(resolve_client_address(Some("  "), Some("127.0.0.1")).as_deref(), Some(""));
        assert_eq!(resolve_client_address(Some(""), Some("127.0.0.1")).as_deref(), Some("127.0.0.1"));
        assert_eq!(resolve_client_address(None, Some("127.0.0.1")).as_deref(), Some("127.0.0.1"));
        assert_eq!(resolve_client_address(None, None), None);
        assert_eq!(resolve_client_address(Some(", 10.0.0.1"), None).as_deref(), Some(""));
    }

    #[test]
    fn test_classify() {
        let gate = AccessGate::default();
        assert_eq!(gate.classify(Some("10.0.0.5"), None), Decision::Deny);
        assert_eq!(gate.classify(None, Some("203.0.113.5")), Decision::Deny);
        assert_eq!(gate.classify(Some("172.20.5.5, 10.0.0.1"), None), Decision::Allow);
        assert_eq!(gate.classify(Some("172.40.5.5"), None), Decision::Deny);
        assert_eq!(gate.classify(None, None), Decision::Deny);
        assert_eq!(gate.classify(None, Some("127.0.0.1")), Decision::Allow);
    }

    #[test]
    fn test_header_overrides_direct_address() {
        let gate = AccessGate::default();
        assert_eq!(gate.classify(Some("203.0.113.5"), Some("127.0.0.1")), Decision::Deny);
        assert_eq!(gate.classify(Some("127.0.0.1"), Some("203.0.113.5")), Decision::Allow);
    }

    #[test]
    fn test_blank_first_hop_denied() {
        let gate = AccessGate::default();
        assert_eq!(gate.classify(Some(", 203.0.113.5"), Some("127.0.0.1")), Decision::Deny);
        assert_eq!(gate.classify(Some("   "), Some("127.0.0.1")), Decision::Deny);
        assert_eq!(gate.classify(Some(" ,127.0.0.1"), Some("127.0.0.1")), Decision::Deny);
    }

    #[test]
    fn test_trusted_proxies() {
        let gate = AccessGate::new(AllowList::default(), vec!["10.0.0.2".into()]);

        // Header from a trusted proxy is honoured.
        assert_eq!(gate.classify(Some("127.0.0.1"), Some("10.0.0.2")), Decision::Allow);
        assert_eq!(gate.classify(Some("8.8.8.8"), Some("10.0.0.2")), Decision::Deny);

        // Spoofed header from an untrusted peer is ignored.
        assert_eq!(gate.classify(Some("127.0.0.1"), Some("203.0.113.5")), Decision::Deny);
        assert_eq!(gate.classify(Some("8.8.8.8"), Some("192.168.1.4")), Decision::Allow);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let gate = AccessGate::default();
        let first = gate.classify(Some("172.16.1.1"), None);
        for _ in 0..3 {
            assert_eq!(gate.classify(Some("172.16.1.1"), None), first);
        }
    }

    #[test]
    fn test_peer_ip_string() {
        let v4: SocketAddr = "127.0.0.1:5000".parse().unwrap();
        assert_eq!(peer_ip_string(&v4), "127.0.0.1");

        let mapped: SocketAddr = "[::ffff:192.168.1.10]:5000".parse().unwrap();
        assert_eq!(peer_ip_string(&mapped), "192.168.1.10");

        let v6: SocketAddr = "[::1]:5000".parse().unwrap();
        assert_eq!(peer_ip_string(&v6), "::1");
    }

    #[test]
    fn test_from_config() {
        let config = AccessConfig {
            enabled: true,
            allowed_ips: vec!["10.1.1.1".into()],
            trusted_proxies: Vec::new(),
        };
        let gate = AccessGate::from_config(&config);
        assert!(gate.classify(None, Some("10.1.1.1")).is_allowed());
    }
}
