//! Compiled, read-only outbound request policy.

use ipnet::{Ipv4Net, Ipv6Net};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

use super::config::PolicyConfig;
use super::error::{PatternSet, PolicyError};
use super::patterns::compile_set;
use super::private::{
    in_ipv4_ranges, in_ipv6_ranges, is_name_or_subdomain, parse_dotted_decimal,
    parse_ipv6_literal,
};

/// Compiled policy. Built once from a [`PolicyConfig`] and shared read-only;
/// every predicate is a pure function of its arguments.
#[derive(Debug, Clone)]
pub struct Policy {
    config: PolicyConfig,
    allowed_protocols: BTreeSet<String>,
    allowed_ports: BTreeMap<String, BTreeSet<u16>>,
    host_allowlist: Vec<String>,
    localhost_names: Vec<String>,
    private_ipv4: Vec<Ipv4Net>,
    private_ipv6: Vec<Ipv6Net>,
    obfuscation: Vec<Regex>,
    redirect_traps: Vec<Regex>,
}

fn normalize_protocol(p: &str) -> String {
    p.trim().trim_end_matches(':').to_ascii_lowercase()
}

fn normalize_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.trim().trim_matches('.').to_ascii_lowercase())
        .filter(|n| !n.is_empty())
        .collect()
}

fn parse_ranges<T: std::str::FromStr<Err = ipnet::AddrParseError>>(
    family: &'static str,
    ranges: &[String],
) -> Result<Vec<T>, PolicyError> {
    ranges
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(|r| {
            r.parse().map_err(|source| PolicyError::InvalidRange {
                family,
                range: r.to_string(),
                source,
            })
        })
        .collect()
}

impl Policy {
    /// Validate and compile a policy configuration.
    pub fn compile(config: &PolicyConfig) -> Result<Self, PolicyError> {
        let allowed_protocols: BTreeSet<String> = config
            .allowed_protocols
            .iter()
            .map(|p| normalize_protocol(p))
            .filter(|p| !p.is_empty())
            .collect();
        if allowed_protocols.is_empty() {
            return Err(PolicyError::NoProtocols);
        }

        let allowed_ports = config
            .allowed_ports
            .iter()
            .map(|(proto, ports)| (normalize_protocol(proto), ports.iter().copied().collect()))
            .collect();

        Ok(Self {
            config: config.clone(),
            allowed_protocols,
            allowed_ports,
            host_allowlist: normalize_names(&config.host_allowlist),
            localhost_names: normalize_names(&config.localhost_names),
            private_ipv4: parse_ranges("IPv4", &config.private_ipv4_ranges)?,
            private_ipv6: parse_ranges("IPv6", &config.private_ipv6_ranges)?,
            obfuscation: compile_set(PatternSet::Obfuscation, &config.obfuscation_patterns)?,
            redirect_traps: compile_set(PatternSet::RedirectTrap, &config.redirect_trap_patterns)?,
        })
    }

    /// The demo policy: http/https on 80/443, allowlist example.com and api.myapp.com.
    pub fn builtin() -> Result<Self, PolicyError> {
        Self::compile(&PolicyConfig::default())
    }

    /// The configuration this policy was compiled from.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn protocol_allowed(&self, scheme: &str) -> bool {
        self.allowed_protocols.contains(&normalize_protocol(scheme))
    }

    /// Ports permitted for `scheme`; empty when the scheme has no entry.
    pub fn ports_for(&self, scheme: &str) -> impl Iterator<Item = u16> + '_ {
        self.allowed_ports
            .get(&normalize_protocol(scheme))
            .into_iter()
            .flatten()
            .copied()
    }

    pub fn port_allowed(&self, scheme: &str, port: u16) -> bool {
        self.allowed_ports
            .get(&normalize_protocol(scheme))
            .is_some_and(|ports| ports.contains(&port))
    }

    /// Exact or subdomain match against the allowlist.
    pub fn host_allowlisted(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.host_allowlist
            .iter()
            .any(|allowed| is_name_or_subdomain(&host, allowed))
    }

    /// A trailing root dot (`localhost.`) is ignored.
    pub fn is_localhost_name(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.localhost_names
            .iter()
            .any(|name| is_name_or_subdomain(&host, name))
    }

    /// Dotted-decimal literal inside a private IPv4 range. Malformed
    /// literals are not recognized and return false.
    pub fn is_private_ipv4_literal(&self, host: &str) -> bool {
        parse_dotted_decimal(host).is_some_and(|ip| in_ipv4_ranges(ip, &self.private_ipv4))
    }

    /// IPv6 literal inside a loopback/unique-local/link-local range.
    pub fn is_private_ipv6_literal(&self, host: &str) -> bool {
        parse_ipv6_literal(host)
            .is_some_and(|ip| in_ipv6_ranges(ip, &self.private_ipv6, &self.private_ipv4))
    }

    /// Which private-network rule `host` hits, if any: a localhost-like
    /// name, a private IPv4 literal, or a private IPv6 literal.
    pub fn private_reason(&self, host: &str) -> Option<&'static str> {
        if self.is_localhost_name(host) {
            Some("localhost-like name")
        } else if self.is_private_ipv4_literal(host) {
            Some("private/loopback/link-local IPv4")
        } else if self.is_private_ipv6_literal(host) {
            Some("loopback/unique-local/link-local IPv6")
        } else {
            None
        }
    }

    pub fn is_obfuscated_host(&self, host: &str) -> bool {
        !host.is_empty() && self.obfuscation.iter().any(|rx| rx.is_match(host))
    }

    /// Matched against the literal URL text; no request is made.
    pub fn matches_redirect_trap(&self, url: &str) -> bool {
        self.redirect_traps.iter().any(|rx| rx.is_match(url))
    }
}
