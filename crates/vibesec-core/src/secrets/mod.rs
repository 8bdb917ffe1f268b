//! Secrets classification for `.env` files (simulated).
//!
//! Each recognized variable is matched to a [`SecretKind`] and checked
//! against where that kind may live. Variables with a public bundler prefix
//! (`VITE_`, `NEXT_PUBLIC_`, `REACT_APP_`) end up in client code: a
//! server-only secret there fails, a restricted key warns.

mod catalog;

pub use catalog::{Exposure, SecretKind};

use regex::Regex;
use serde::Serialize;

use crate::classify::StepStatus;

/// Prefixes that make a variable part of the client bundle.
pub const PUBLIC_PREFIXES: &[&str] = &["VITE_", "NEXT_PUBLIC_", "REACT_APP_"];

struct Rule {
    kind: SecretKind,
    name: Regex,
    value: Option<Regex>,
}

/// Compiled detection rules.
pub struct SecretRules {
    rules: Vec<Rule>,
}

impl SecretRules {
    pub fn builtin() -> Result<Self, regex::Error> {
        let rules = catalog::RULES
            .iter()
            .map(|(kind, name, value)| {
                Ok(Rule {
                    kind: *kind,
                    name: Regex::new(name)?,
                    value: value.map(Regex::new).transpose()?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }

    /// First rule matching the variable name or its value.
    pub fn detect(&self, name: &str, value: &str) -> Option<SecretKind> {
        self.rules
            .iter()
            .find(|r| {
                r.name.is_match(name) || r.value.as_ref().is_some_and(|v| v.is_match(value))
            })
            .map(|r| r.kind)
    }
}

/// One recognized variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretFinding {
    pub line: usize,
    pub name: String,
    pub kind: SecretKind,
    pub title: &'static str,
    /// True when the name carries a public bundler prefix.
    pub bundled: bool,
    pub status: StepStatus,
    pub message: String,
}

impl SecretFinding {
    pub fn is_leak(&self) -> bool {
        self.status == StepStatus::Fail
    }
}

pub fn is_bundled(name: &str) -> bool {
    PUBLIC_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Judge one variable. `None` when it is not a recognized credential.
pub fn classify_var(
    rules: &SecretRules,
    line: usize,
    name: &str,
    value: &str,
) -> Option<SecretFinding> {
    let kind = rules.detect(name, value)?;
    let bundled = is_bundled(name);
    let (status, message) = match (kind.exposure(), bundled) {
        (Exposure::ServerOnly, true) => (
            StepStatus::Fail,
            format!("{} is shipped to the browser; drop the public prefix", kind.title()),
        ),
        (Exposure::Restricted, true) => (
            StepStatus::Warn,
            "Bundled: make sure the key is restricted to your domain".to_string(),
        ),
        (Exposure::Public, true)
        | (Exposure::ServerOnly, false)
        | (Exposure::Restricted, false) => {
            (StepStatus::Pass, kind.exposure().location().to_string())
        }
        (Exposure::Public, false) => (
            StepStatus::Info,
            "Public key kept server-side; a public prefix is fine".to_string(),
        ),
    };
    Some(SecretFinding {
        line,
        name: name.to_string(),
        kind,
        title: kind.title(),
        bundled,
        status,
        message,
    })
}

/// `KEY=VALUE` pairs from `.env` text with 1-based line numbers. Blank lines,
/// `#` comments and lines without `=` are skipped; `export ` and matching
/// surrounding quotes are removed.
pub fn parse_env(text: &str) -> Vec<(usize, &str, &str)> {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (name, value) = line.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((i + 1, name, unquote(value.trim())))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(q).and_then(|v| v.strip_suffix(q)) {
            return inner;
        }
    }
    value
}

/// Classify every recognized variable in `.env` text.
pub fn scan_env(rules: &SecretRules, text: &str) -> Vec<SecretFinding> {
    let findings: Vec<SecretFinding> = parse_env(text)
        .into_iter()
        .filter_map(|(line, name, value)| classify_var(rules, line, name, value))
        .collect();
    tracing::debug!(
        recognized = findings.len(),
        leaks = findings.iter().filter(|f| f.is_leak()).count(),
        "scanned env file"
    );
    findings
}
