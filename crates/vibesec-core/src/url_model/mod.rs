//! URL modeling for outbound-request classification.
//!
//! Parses an untrusted string into the pieces the classifier looks at:
//! scheme, host, port, userinfo, path and query. The host is kept in two
//! forms: as written in the authority, and as the WHATWG parser normalized
//! it. Numeric hosts such as `2130706433` are rewritten by the parser to
//! `127.0.0.1`; the checks work on the written form so the rewrite itself
//! stays visible.

mod authority;

pub use authority::literal_host;

use url::Url;

/// Port assumed when neither the URL nor its scheme supply one.
const FALLBACK_PORT: u16 = 80;

/// A successfully parsed request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTarget {
    /// Lowercase scheme without the trailing `:`.
    pub scheme: String,
    /// Hostname as written in the authority, lowercased, IPv6 brackets stripped.
    pub host: String,
    /// Hostname after parser normalization, IPv6 brackets stripped.
    pub canonical_host: String,
    /// Port given explicitly in the URL. `None` when absent or equal to the
    /// scheme default (the parser drops default ports).
    pub explicit_port: Option<u16>,
    /// Default port for the scheme, if the scheme has one.
    default_port: Option<u16>,
    pub username: String,
    pub has_password: bool,
    pub path: String,
    pub query: Option<String>,
}

impl ParsedTarget {
    /// Parse a raw input string. Leading/trailing whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        let trimmed = input.trim();
        let parsed = Url::parse(trimmed)?;

        let canonical_host = parsed
            .host_str()
            .map(strip_brackets)
            .unwrap_or_default()
            .to_ascii_lowercase();
        let host = literal_host(trimmed)
            .map(|h| strip_brackets(&h).to_ascii_lowercase())
            .unwrap_or_else(|| canonical_host.clone());

        Ok(Self {
            scheme: parsed.scheme().to_ascii_lowercase(),
            host,
            canonical_host,
            explicit_port: parsed.port(),
            default_port: parsed.port_or_known_default(),
            username: parsed.username().to_string(),
            has_password: parsed.password().is_some(),
            path: parsed.path().to_string(),
            query: parsed.query().map(str::to_string),
        })
    }

    /// Explicit port, else the scheme default, else 80.
    pub fn effective_port(&self) -> u16 {
        self.explicit_port
            .or(self.default_port)
            .unwrap_or(FALLBACK_PORT)
    }

    /// True when the URL embeds credentials (`user:pass@host`).
    pub fn has_userinfo(&self) -> bool {
        !self.username.is_empty() || self.has_password
    }

    /// True when the parser rewrote the host (e.g. a decimal IPv4 encoding
    /// or a percent-encoded name).
    pub fn host_was_normalized(&self) -> bool {
        self.host != self.canonical_host
    }
}

fn strip_brackets(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_https() {
        let t = ParsedTarget::parse("https://Example.COM/api?x=1").unwrap();
        assert_eq!(t.scheme, "https");
        assert_eq!(t.host, "example.com");
        assert_eq!(t.canonical_host, "example.com");
        assert_eq!(t.explicit_port, None);
        assert_eq!(t.effective_port(), 443);
        assert_eq!(t.path, "/api");
        assert_eq!(t.query.as_deref(), Some("x=1"));
        assert!(!t.has_userinfo());
    }

    #[test]
    fn default_port_written_explicitly_is_dropped() {
        let t = ParsedTarget::parse("http://example.com:80/").unwrap();
        assert_eq!(t.explicit_port, None);
        assert_eq!(t.effective_port(), 80);
    }

    #[test]
    fn non_standard_port_is_kept() {
        let t = ParsedTarget::parse("http://example.com:8080").unwrap();
        assert_eq!(t.explicit_port, Some(8080));
        assert_eq!(t.effective_port(), 8080);
    }

    #[test]
    fn unknown_scheme_falls_back_to_port_80() {
        let t = ParsedTarget::parse("gopher://example.com").unwrap();
        assert_eq!(t.scheme, "gopher");
        assert_eq!(t.host, "example.com");
        assert_eq!(t.effective_port(), 80);
    }

    #[test]
    fn userinfo_detected_and_real_host_used() {
        let t = ParsedTarget::parse("http://localhost@evil.com/").unwrap();
        assert!(t.has_userinfo());
        assert_eq!(t.username, "localhost");
        assert!(!t.has_password);
        assert_eq!(t.host, "evil.com");
    }

    #[test]
    fn password_only_counts_as_userinfo() {
        let t = ParsedTarget::parse("http://:secret@example.com/").unwrap();
        assert!(t.has_password);
        assert!(t.has_userinfo());
    }

    #[test]
    fn decimal_host_keeps_written_form() {
        let t = ParsedTarget::parse("http://2130706433/").unwrap();
        assert_eq!(t.host, "2130706433");
        assert_eq!(t.canonical_host, "127.0.0.1");
        assert!(t.host_was_normalized());
    }

    #[test]
    fn percent_encoded_host_is_normalized() {
        let t = ParsedTarget::parse("http://exa%6dple.com/").unwrap();
        assert_eq!(t.host, "exa%6dple.com");
        assert_eq!(t.canonical_host, "example.com");
        assert!(t.host_was_normalized());
    }

    #[test]
    fn slashless_special_url_uses_real_authority() {
        let t = ParsedTarget::parse("http:127.0.0.1/?u=https://example.com").unwrap();
        assert_eq!(t.host, "127.0.0.1");
        assert_eq!(t.canonical_host, "127.0.0.1");
        assert!(!t.host_was_normalized());
    }

    #[test]
    fn ipv6_brackets_are_stripped() {
        let t = ParsedTarget::parse("http://[::1]/").unwrap();
        assert_eq!(t.host, "::1");
        assert_eq!(t.canonical_host, "::1");
        assert!(!t.host_was_normalized());
    }

    #[test]
    fn input_is_trimmed() {
        let t = ParsedTarget::parse("  https://example.com/api \n").unwrap();
        assert_eq!(t.host, "example.com");
    }

    #[test]
    fn invalid_inputs_fail() {
        assert!(ParsedTarget::parse("").is_err());
        assert!(ParsedTarget::parse("   ").is_err());
        assert!(ParsedTarget::parse("not a url").is_err());
        assert!(ParsedTarget::parse("example.com/path").is_err());
    }

    #[test]
    fn opaque_scheme_has_empty_host() {
        let t = ParsedTarget::parse("javascript:alert(1)").unwrap();
        assert_eq!(t.scheme, "javascript");
        assert_eq!(t.host, "");
    }
}
