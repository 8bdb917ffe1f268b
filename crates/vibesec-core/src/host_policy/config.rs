//! Serializable policy settings (the `[policy]` table of config.toml).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::patterns::{OBFUSCATION_PATTERNS, REDIRECT_TRAP_PATTERNS};

const DEFAULT_ALLOWLIST: &[&str] = &["example.com", "api.myapp.com"];

const DEFAULT_LOCALHOST_NAMES: &[&str] = &["localhost", "localdomain", "home.arpa"];

const DEFAULT_PRIVATE_IPV4: &[&str] = &[
    "0.0.0.0/8",
    "10.0.0.0/8",
    "127.0.0.0/8",
    "169.254.0.0/16",
    "172.16.0.0/12",
    "192.168.0.0/16",
];

const DEFAULT_PRIVATE_IPV6: &[&str] = &["::1/128", "fc00::/7", "fe80::/10"];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Outbound request policy as written in configuration.
///
/// Every field has a default, so a config file only needs to name the
/// fields it changes. Compile with [`Policy::compile`](super::Policy::compile)
/// before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Permitted URL schemes ("http", "https"). A trailing `:` is accepted.
    pub allowed_protocols: Vec<String>,
    /// Host allowlist; an entry also admits its subdomains.
    pub host_allowlist: Vec<String>,
    /// Localhost-like names; an entry also matches its subdomains.
    pub localhost_names: Vec<String>,
    /// Private/loopback/link-local IPv4 ranges in CIDR notation.
    pub private_ipv4_ranges: Vec<String>,
    /// Loopback/unique-local/link-local IPv6 ranges in CIDR notation.
    pub private_ipv6_ranges: Vec<String>,
    /// Regexes matched against the hostname; a hit warns only.
    pub obfuscation_patterns: Vec<String>,
    /// Regexes matched against the full URL text; a hit blocks.
    pub redirect_trap_patterns: Vec<String>,
    /// Permitted ports per protocol.
    pub allowed_ports: BTreeMap<String, Vec<u16>>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let mut allowed_ports = BTreeMap::new();
        allowed_ports.insert("http".to_string(), vec![80]);
        allowed_ports.insert("https".to_string(), vec![443]);

        Self {
            allowed_protocols: owned(&["http", "https"]),
            host_allowlist: owned(DEFAULT_ALLOWLIST),
            localhost_names: owned(DEFAULT_LOCALHOST_NAMES),
            private_ipv4_ranges: owned(DEFAULT_PRIVATE_IPV4),
            private_ipv6_ranges: owned(DEFAULT_PRIVATE_IPV6),
            obfuscation_patterns: owned(OBFUSCATION_PATTERNS),
            redirect_trap_patterns: owned(REDIRECT_TRAP_PATTERNS),
            allowed_ports,
        }
    }
}
