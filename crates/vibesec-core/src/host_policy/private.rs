//! Private-network predicates over host literals.

use ipnet::{Ipv4Net, Ipv6Net};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Parses a dotted-decimal IPv4 literal: exactly four digit-only octets.
///
/// Octets are read as decimal even with leading zeros. Anything else
/// (wrong segment count, non-digits, octet above 255) is not an IPv4
/// literal and yields `None`.
pub fn parse_dotted_decimal(host: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = host.split('.');
    for slot in octets.iter_mut() {
        let part = parts.next()?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Ipv4Addr::from(octets))
}

/// Parses an IPv6 literal, with or without brackets.
pub fn parse_ipv6_literal(host: &str) -> Option<Ipv6Addr> {
    if !host.contains(':') {
        return None;
    }
    let inner = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    inner.parse().ok()
}

pub fn in_ipv4_ranges(ip: Ipv4Addr, ranges: &[Ipv4Net]) -> bool {
    ranges.iter().any(|net| net.contains(&ip))
}

/// IPv6 range check; IPv4-mapped addresses (`::ffff:a.b.c.d`) are also
/// checked against the IPv4 ranges.
pub fn in_ipv6_ranges(ip: Ipv6Addr, v6: &[Ipv6Net], v4: &[Ipv4Net]) -> bool {
    if v6.iter().any(|net| net.contains(&ip)) {
        return true;
    }
    ip.to_ipv4_mapped()
        .is_some_and(|mapped| in_ipv4_ranges(mapped, v4))
}

/// True when `host` equals `name` or is a subdomain of it.
pub fn is_name_or_subdomain(host: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    match host.strip_suffix(name) {
        Some("") => true,
        Some(rest) => rest.ends_with('.'),
        None => false,
    }
}
