//! Built-in obfuscation and redirect-trap patterns.
//!
//! Both sets are heuristics for illustration. Obfuscation hits only warn;
//! redirect-trap hits block, but they are matched against the literal URL
//! text and never follow a real redirect.

use regex::Regex;

use super::error::{PatternSet, PolicyError};

/// Hostnames that encode an IP address to slip past string blocklists.
pub const OBFUSCATION_PATTERNS: &[&str] = &[
    // Whole-number decimal or hex: 2130706433, 0x7f000001
    r"(?i)^(0x[0-9a-f]+|[0-9]+)$",
    // Hex dotted: 0x7f.0x00.0x00.0x01
    r"(?i)^(0x[0-9a-f]+\.){3}0x[0-9a-f]+$",
    // Octal dotted: 0177.00.00.01
    r"^(0[0-7]+\.){3}0[0-7]+$",
    // Leading octal octet only: 0177.0.0.1
    r"^0[0-7]+(\.[0-9]+){3}$",
];

/// URL text suggesting a redirect toward localhost, loopback or metadata.
pub const REDIRECT_TRAP_PATTERNS: &[&str] = &[
    r"(?i)redirect[^#?]*to[^#?]*localhost",
    r"(?i)redirect[^#?]*to[^#?]*127\.0\.0\.1",
    r"(?i)redirect[^#?]*to[^#?]*169\.254\.169\.254",
    concat!(
        r"(?i)[?&](?:to|target|url)=(?:https?://)?",
        r"(?:localhost|127\.0\.0\.1|169\.254\.169\.254|\[::1\])",
    ),
];

pub(super) fn compile_set(set: PatternSet, patterns: &[String]) -> Result<Vec<Regex>, PolicyError> {
    patterns
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| {
            Regex::new(p).map_err(|source| PolicyError::InvalidPattern {
                set,
                pattern: p.to_string(),
                source,
            })
        })
        .collect()
}
