//! Step and result types produced by the classifier.

use serde::Serialize;
use std::fmt;

/// The individual checks, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// Input did not parse as an absolute URL.
    Invalid,
    Protocol,
    /// Informational echo of the resolved host and effective port.
    Parsed,
    Userinfo,
    Allowlist,
    PrivateNetwork,
    Obfuscation,
    Port,
    /// Simulated redirect toward a private target.
    Redirect,
}

impl Check {
    pub fn label(self) -> &'static str {
        match self {
            Check::Invalid => "Invalid URL",
            Check::Protocol => "Protocol",
            Check::Parsed => "Parsed",
            Check::Userinfo => "Userinfo",
            Check::Allowlist => "Allowlist",
            Check::PrivateNetwork => "Private IPs",
            Check::Obfuscation => "Obfuscation",
            Check::Port => "Port",
            Check::Redirect => "Redirects",
        }
    }

    /// Whether a `Fail` from this check blocks the request. Userinfo and
    /// obfuscation are advisory; the parsed echo is informational.
    pub fn gates(self) -> bool {
        matches!(
            self,
            Check::Invalid
                | Check::Protocol
                | Check::Allowlist
                | Check::PrivateNetwork
                | Check::Port
                | Check::Redirect
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pass,
    Fail,
    Warn,
    Info,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Pass => f.pad("pass"),
            StepStatus::Fail => f.pad("fail"),
            StepStatus::Warn => f.pad("warn"),
            StepStatus::Info => f.pad("info"),
        }
    }
}

/// One line of the reasoning trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationStep {
    pub check: Check,
    pub label: &'static str,
    pub status: StepStatus,
    pub message: String,
}

impl ClassificationStep {
    pub fn new(check: Check, status: StepStatus, message: impl Into<String>) -> Self {
        Self {
            check,
            label: check.label(),
            status,
            message: message.into(),
        }
    }

    /// True when this step, on its own, blocks the request.
    pub fn is_blocking(&self) -> bool {
        self.status == StepStatus::Fail && self.check.gates()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Allowed,
    Blocked,
}

impl Verdict {
    /// Banner text for the final decision.
    pub fn headline(self) -> &'static str {
        match self {
            Verdict::Allowed => "Request would be ALLOWED",
            Verdict::Blocked => "Request would be BLOCKED",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Allowed => f.pad("allowed"),
            Verdict::Blocked => f.pad("blocked"),
        }
    }
}

/// Ordered steps plus the overall verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub blocked: bool,
    pub steps: Vec<ClassificationStep>,
}

impl ClassificationResult {
    /// Builds a result whose `blocked` flag is derived from the steps.
    pub fn from_steps(steps: Vec<ClassificationStep>) -> Self {
        let blocked = steps.iter().any(ClassificationStep::is_blocking);
        Self { blocked, steps }
    }

    pub fn verdict(&self) -> Verdict {
        if self.blocked {
            Verdict::Blocked
        } else {
            Verdict::Allowed
        }
    }

    /// The step for `check`, if it ran.
    pub fn step(&self, check: Check) -> Option<&ClassificationStep> {
        self.steps.iter().find(|s| s.check == check)
    }

    /// Steps that contributed to a block.
    pub fn blocking_steps(&self) -> impl Iterator<Item = &ClassificationStep> {
        self.steps.iter().filter(|s| s.is_blocking())
    }
}
