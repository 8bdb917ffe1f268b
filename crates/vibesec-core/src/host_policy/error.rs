//! Policy compilation errors.

use std::fmt;

/// Which regex set a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSet {
    Obfuscation,
    RedirectTrap,
}

impl fmt::Display for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternSet::Obfuscation => write!(f, "obfuscation"),
            PatternSet::RedirectTrap => write!(f, "redirect-trap"),
        }
    }
}

/// Error returned when a [`PolicyConfig`](super::PolicyConfig) cannot be compiled.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// `allowed_protocols` was empty after normalization.
    #[error("policy allows no protocols")]
    NoProtocols,

    /// A regex in one of the pattern sets failed to compile.
    #[error("invalid {set} pattern '{pattern}': {source}")]
    InvalidPattern {
        set: PatternSet,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A private-range entry is not valid CIDR notation.
    #[error("invalid private {family} range '{range}': {source}")]
    InvalidRange {
        family: &'static str,
        range: String,
        #[source]
        source: ipnet::AddrParseError,
    },
}
