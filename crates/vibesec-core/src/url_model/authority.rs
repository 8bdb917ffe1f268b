//! Host extraction from the raw authority, before any parser normalization.
//!
//! Mirrors the WHATWG authority rules closely enough to find the same host
//! the parser will use: ASCII tab and newline are removed, the authority
//! starts right after `<scheme>:`, and special schemes skip any run of `/`
//! and `\` before it.

/// Schemes whose authority follows WHATWG "special" rules.
const SPECIAL_SCHEMES: &[&str] = &["http", "https", "ws", "wss", "ftp"];

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Input with C0/space trimmed from both ends and every tab, LF and CR removed.
fn strip_ignored(url: &str) -> String {
    url.trim_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

/// Returns the hostname exactly as written in `url`'s authority component.
///
/// The authority runs up to the first `/`, `?` or `#` (and `\` for special
/// schemes). Userinfo (everything up to the last `@`) and the port are
/// removed. Bracketed IPv6 literals are returned with their brackets.
///
/// Returns `None` when the input has no scheme, or a non-special scheme
/// without a `//` authority.
pub fn literal_host(url: &str) -> Option<String> {
    let cleaned = strip_ignored(url);
    let (scheme, rest) = cleaned.split_once(':')?;
    if !is_valid_scheme(scheme) {
        return None;
    }
    let scheme = scheme.to_ascii_lowercase();
    let special = SPECIAL_SCHEMES.contains(&scheme.as_str());

    let after_slashes = if special {
        rest.trim_start_matches(['/', '\\'])
    } else if scheme == "file" {
        rest.strip_prefix("//")
            .or_else(|| rest.strip_prefix("\\\\"))
            .or_else(|| rest.strip_prefix("/\\"))
            .or_else(|| rest.strip_prefix("\\/"))?
    } else {
        rest.strip_prefix("//")?
    };
    let backslash_ends = special || scheme == "file";

    let end = after_slashes
        .find(|c| matches!(c, '/' | '?' | '#') || (backslash_ends && c == '\\'))
        .unwrap_or(after_slashes.len());
    let authority = &after_slashes[..end];
    let host_port = match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    };

    let host = if host_port.starts_with('[') {
        match host_port.find(']') {
            Some(close) => &host_port[..=close],
            None => host_port,
        }
    } else {
        match host_port.rfind(':') {
            Some(colon) => &host_port[..colon],
            None => host_port,
        }
    };

    Some(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_host() {
        assert_eq!(literal_host("https://example.com/api").as_deref(), Some("example.com"));
        assert_eq!(literal_host("https://example.com").as_deref(), Some("example.com"));
    }

    #[test]
    fn port_is_removed() {
        assert_eq!(literal_host("http://localhost:3000/admin").as_deref(), Some("localhost"));
    }

    #[test]
    fn userinfo_is_removed() {
        assert_eq!(literal_host("http://localhost@evil.com/").as_deref(), Some("evil.com"));
        assert_eq!(literal_host("http://a:b@c@evil.com:81/").as_deref(), Some("evil.com"));
    }

    #[test]
    fn at_sign_after_path_is_not_userinfo() {
        assert_eq!(literal_host("http://example.com/@localhost").as_deref(), Some("example.com"));
        assert_eq!(literal_host("http://example.com#@localhost").as_deref(), Some("example.com"));
    }

    #[test]
    fn ipv6_keeps_brackets() {
        assert_eq!(literal_host("http://[::1]/").as_deref(), Some("[::1]"));
        assert_eq!(literal_host("http://[fe80::1]:8080/").as_deref(), Some("[fe80::1]"));
    }

    #[test]
    fn numeric_forms_untouched() {
        assert_eq!(literal_host("http://2130706433/").as_deref(), Some("2130706433"));
        assert_eq!(literal_host("http://0x7f000001/").as_deref(), Some("0x7f000001"));
    }

    #[test]
    fn no_authority() {
        assert_eq!(literal_host("javascript:alert(1)"), None);
        assert_eq!(literal_host("not a url"), None);
        assert_eq!(literal_host("1http://example.com"), None);
    }

    #[test]
    fn special_scheme_without_double_slash() {
        assert_eq!(
            literal_host("http:127.0.0.1/?u=https://example.com").as_deref(),
            Some("127.0.0.1")
        );
        assert_eq!(
            literal_host("http:/169.254.169.254/latest/meta-data/?x=http://example.com").as_deref(),
            Some("169.254.169.254")
        );
    }

    #[test]
    fn backslashes_act_as_slashes_for_special_schemes() {
        assert_eq!(
            literal_host("http:\\\\localhost:80\\?next=https://api.myapp.com").as_deref(),
            Some("localhost")
        );
        assert_eq!(
            literal_host("https:\\/\\/127.0.0.1/").as_deref(),
            Some("127.0.0.1")
        );
    }

    #[test]
    fn authority_not_taken_from_query() {
        assert_eq!(
            literal_host("HTTP:10.0.0.1?target=http://example.com/").as_deref(),
            Some("10.0.0.1")
        );
    }

    #[test]
    fn tabs_and_newlines_are_ignored() {
        assert_eq!(literal_host("ht\ttp://local\nhost/").as_deref(), Some("localhost"));
        assert_eq!(literal_host("\u{1}http://example.com ").as_deref(), Some("example.com"));
    }

    #[test]
    fn non_special_scheme_needs_double_slash() {
        assert_eq!(literal_host("gopher://example.com").as_deref(), Some("example.com"));
        assert_eq!(literal_host("gopher:example.com"), None);
        assert_eq!(literal_host("file:///etc/passwd").as_deref(), Some(""));
    }
}
