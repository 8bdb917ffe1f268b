//! Outbound request policy.
//!
//! [`PolicyConfig`] is the serializable form (the `[policy]` table of
//! config.toml); [`Policy`] is the compiled form the classifier consults:
//! - allowed protocols and per-protocol ports
//! - a host allowlist (exact or subdomain match)
//! - private-network rules: localhost-like names plus IPv4/IPv6 CIDR ranges
//! - obfuscation and redirect-trap regexes
//!
//! A compiled policy is immutable; share it by reference.

mod config;
mod error;
mod patterns;
mod policy;
mod private;

pub use config::PolicyConfig;
pub use error::{PatternSet, PolicyError};
pub use patterns::{OBFUSCATION_PATTERNS, REDIRECT_TRAP_PATTERNS};
pub use policy::Policy;

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> Policy {
        Policy::builtin().expect("builtin policy compiles")
    }

    #[test]
    fn protocols_are_case_insensitive_and_accept_colon() {
        let p = builtin();
        assert!(p.protocol_allowed("http"));
        assert!(p.protocol_allowed("HTTPS"));
        assert!(p.protocol_allowed("https:"));
        assert!(!p.protocol_allowed("gopher"));
        assert!(!p.protocol_allowed("file"));
        assert!(!p.protocol_allowed("javascript"));
    }

    #[test]
    fn standard_ports_only() {
        let p = builtin();
        assert!(p.port_allowed("http", 80));
        assert!(p.port_allowed("https", 443));
        assert!(!p.port_allowed("http", 443));
        assert!(!p.port_allowed("http", 8080));
        assert!(!p.port_allowed("gopher", 70));
        assert_eq!(p.ports_for("https").collect::<Vec<_>>(), vec![443]);
        assert_eq!(p.ports_for("ftp").count(), 0);
    }

    #[test]
    fn allowlist_exact_and_subdomain() {
        let p = builtin();
        assert!(p.host_allowlisted("example.com"));
        assert!(p.host_allowlisted("EXAMPLE.com"));
        assert!(p.host_allowlisted("cdn.example.com"));
        assert!(p.host_allowlisted("api.myapp.com"));
        assert!(!p.host_allowlisted("myapp.com"));
        assert!(!p.host_allowlisted("notexample.com"));
        assert!(!p.host_allowlisted("evil.com"));
        assert!(!p.host_allowlisted(""));
    }

    #[test]
    fn localhost_like_names() {
        let p = builtin();
        assert!(p.is_localhost_name("localhost"));
        assert!(p.is_localhost_name("localhost."));
        assert!(p.is_localhost_name("app.localhost"));
        assert!(p.is_localhost_name("printer.localdomain"));
        assert!(p.is_localhost_name("router.home.arpa"));
        assert!(!p.is_localhost_name("mylocalhost.com"));
    }

    #[test]
    fn private_ipv4_ranges() {
        let p = builtin();
        for host in [
            "10.1.2.3",
            "127.0.0.1",
            "0.0.0.0",
            "169.254.169.254",
            "192.168.1.1",
            "172.16.0.1",
            "172.31.255.255",
        ] {
            assert!(p.is_private_ipv4_literal(host), "{host} should be private");
        }
        for host in ["8.8.8.8", "172.15.0.1", "172.32.0.1", "192.169.0.1"] {
            assert!(!p.is_private_ipv4_literal(host), "{host} should be public");
        }
    }

    #[test]
    fn malformed_ipv4_is_not_recognized() {
        let p = builtin();
        assert!(!p.is_private_ipv4_literal("127.0.0"));
        assert!(!p.is_private_ipv4_literal("127.0.0.one"));
        assert!(!p.is_private_ipv4_literal("2130706433"));
    }

    #[test]
    fn private_ipv6_ranges() {
        let p = builtin();
        assert!(p.is_private_ipv6_literal("::1"));
        assert!(p.is_private_ipv6_literal("[::1]"));
        assert!(p.is_private_ipv6_literal("fd12:3456::1"));
        assert!(p.is_private_ipv6_literal("fc00::1"));
        assert!(p.is_private_ipv6_literal("fe80::1"));
        assert!(p.is_private_ipv6_literal("::ffff:169.254.169.254"));
        assert!(!p.is_private_ipv6_literal("2001:4860:4860::8888"));
        assert!(!p.is_private_ipv6_literal("fec0::1"));
    }

    #[test]
    fn private_reason_names_the_rule() {
        let p = builtin();
        assert_eq!(p.private_reason("app.localhost"), Some("localhost-like name"));
        assert_eq!(
            p.private_reason("169.254.169.254"),
            Some("private/loopback/link-local IPv4")
        );
        assert_eq!(
            p.private_reason("fe80::1"),
            Some("loopback/unique-local/link-local IPv6")
        );
        assert_eq!(p.private_reason("example.com"), None);
        assert_eq!(p.private_reason("2130706433"), None);
    }

    #[test]
    fn obfuscated_hosts() {
        let p = builtin();
        for host in [
            "2130706433",
            "0x7f000001",
            "0X7F000001",
            "0x7f.0x00.0x00.0x01",
            "0177.00.00.01",
            "0177.0.0.1",
        ] {
            assert!(p.is_obfuscated_host(host), "{host} should look obfuscated");
        }
        for host in ["example.com", "127.0.0.1", "10.0.0.1", ""] {
            assert!(!p.is_obfuscated_host(host), "{host} should not look obfuscated");
        }
    }

    #[test]
    fn redirect_traps() {
        let p = builtin();
        assert!(p.matches_redirect_trap("https://example.com/redirect-to-localhost"));
        assert!(p.matches_redirect_trap("https://example.com/redirect_to/127.0.0.1"));
        assert!(p.matches_redirect_trap("https://example.com/go?url=http://169.254.169.254/"));
        assert!(p.matches_redirect_trap("https://example.com/go?a=1&target=[::1]"));
        assert!(p.matches_redirect_trap("https://example.com/go?to=LOCALHOST"));
        assert!(!p.matches_redirect_trap("https://example.com/api"));
        assert!(!p.matches_redirect_trap("https://example.com/redirect?to=example.org"));
    }

    #[test]
    fn compile_rejects_empty_protocols() {
        let cfg = PolicyConfig {
            allowed_protocols: vec![" ".to_string(), ":".to_string()],
            ..PolicyConfig::default()
        };
        assert!(matches!(Policy::compile(&cfg), Err(PolicyError::NoProtocols)));
    }

    #[test]
    fn compile_rejects_bad_range() {
        let cfg = PolicyConfig {
            private_ipv4_ranges: vec!["10.0.0.0/33".to_string()],
            ..PolicyConfig::default()
        };
        let err = Policy::compile(&cfg).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidRange { family: "IPv4", .. }));
        assert!(err.to_string().contains("10.0.0.0/33"));
    }

    #[test]
    fn compile_rejects_bad_pattern() {
        let cfg = PolicyConfig {
            obfuscation_patterns: vec!["[".to_string()],
            ..PolicyConfig::default()
        };
        let err = Policy::compile(&cfg).unwrap_err();
        assert!(matches!(
            err,
            PolicyError::InvalidPattern {
                set: PatternSet::Obfuscation,
                ..
            }
        ));
    }

    #[test]
    fn custom_allowlist_normalized() {
        let cfg = PolicyConfig {
            host_allowlist: vec!["  Internal.Example.org. ".to_string(), String::new()],
            ..PolicyConfig::default()
        };
        let p = Policy::compile(&cfg).unwrap();
        assert!(p.host_allowlisted("internal.example.org"));
        assert!(p.host_allowlisted("a.internal.example.org"));
        assert!(!p.host_allowlisted("example.com"));
    }
}
