//! The classification pass: every check runs and is recorded, in order.

use crate::host_policy::Policy;
use crate::url_model::ParsedTarget;

use super::step::{Check, ClassificationResult, ClassificationStep, StepStatus};

const INVALID_URL_HINT: &str = "Example: https://example.com/api";

/// Classify `input` against `policy`.
///
/// Never fails: an unparsable input yields a single blocking
/// [`Check::Invalid`] step. Otherwise all eight checks are recorded and
/// `blocked` is set when any gating check fails.
pub fn classify(input: &str, policy: &Policy) -> ClassificationResult {
    let target = match ParsedTarget::parse(input) {
        Ok(t) => t,
        Err(e) => {
            tracing::debug!(error = %e, "rejected unparsable URL");
            return ClassificationResult::from_steps(vec![ClassificationStep::new(
                Check::Invalid,
                StepStatus::Fail,
                format!("Could not parse as an absolute URL ({e}). {INVALID_URL_HINT}"),
            )]);
        }
    };

    let hosts = gated_hosts(&target, policy);
    let steps = vec![
        protocol_step(&target, policy),
        parsed_step(&target),
        userinfo_step(&target),
        allowlist_step(&target, &hosts, policy),
        private_network_step(&target, &hosts, policy),
        obfuscation_step(&target, policy),
        port_step(&target, policy),
        redirect_step(input.trim(), policy),
    ];

    let result = ClassificationResult::from_steps(steps);
    tracing::debug!(
        scheme = %target.scheme,
        host = %target.host,
        port = target.effective_port(),
        verdict = %result.verdict(),
        "classified URL"
    );
    result
}

fn pass_or_fail(ok: bool) -> StepStatus {
    if ok {
        StepStatus::Pass
    } else {
        StepStatus::Fail
    }
}

fn protocol_step(target: &ParsedTarget, policy: &Policy) -> ClassificationStep {
    let ok = policy.protocol_allowed(&target.scheme);
    let message = if ok {
        format!("Allowed ({})", target.scheme)
    } else {
        format!("Blocked ({}:)", target.scheme)
    };
    ClassificationStep::new(Check::Protocol, pass_or_fail(ok), message)
}

fn parsed_step(target: &ParsedTarget) -> ClassificationStep {
    let host = if target.host.is_empty() {
        "(none)"
    } else {
        target.host.as_str()
    };
    let mut message = format!("Host: {host}, Port: {}", target.effective_port());
    if target.host_was_normalized() {
        message.push_str(&format!(
            " (parser normalizes host to {})",
            target.canonical_host
        ));
    }
    ClassificationStep::new(Check::Parsed, StepStatus::Info, message)
}

fn userinfo_step(target: &ParsedTarget) -> ClassificationStep {
    if !target.has_userinfo() {
        return ClassificationStep::new(Check::Userinfo, StepStatus::Pass, "No credentials in URL");
    }
    let password = if target.has_password { ":***" } else { "" };
    ClassificationStep::new(
        Check::Userinfo,
        StepStatus::Warn,
        format!(
            "Found {}{}@ before the host; the real host is {}. Reject URLs with credentials",
            target.username, password, target.host
        ),
    )
}

/// Hosts the gating checks must accept.
///
/// Always the host as written. The parser's host is added when it differs
/// and the written form is not a numeric/hex encoding, so a mismatch between
/// the two can only make the result stricter.
fn gated_hosts<'a>(target: &'a ParsedTarget, policy: &Policy) -> Vec<&'a str> {
    let mut hosts = vec![target.host.as_str()];
    if target.host_was_normalized() && !policy.is_obfuscated_host(&target.host) {
        hosts.push(target.canonical_host.as_str());
    }
    hosts
}

fn allowlist_step(target: &ParsedTarget, hosts: &[&str], policy: &Policy) -> ClassificationStep {
    match hosts.iter().find(|h| !policy.host_allowlisted(h)) {
        None => ClassificationStep::new(
            Check::Allowlist,
            StepStatus::Pass,
            "Host is on outbound allowlist",
        ),
        Some(host) if *host == target.host => ClassificationStep::new(
            Check::Allowlist,
            StepStatus::Fail,
            "Host is NOT on outbound allowlist",
        ),
        Some(host) => ClassificationStep::new(
            Check::Allowlist,
            StepStatus::Fail,
            format!("Host is NOT on outbound allowlist (parser resolves host to {host})"),
        ),
    }
}

fn private_network_step(
    target: &ParsedTarget,
    hosts: &[&str],
    policy: &Policy,
) -> ClassificationStep {
    let hit = hosts
        .iter()
        .find_map(|h| policy.private_reason(h).map(|reason| (*h, reason)));

    match hit {
        Some((host, reason)) if host == target.host => ClassificationStep::new(
            Check::PrivateNetwork,
            StepStatus::Fail,
            format!("Targets localhost/private/metadata range ({reason})"),
        ),
        Some((host, reason)) => ClassificationStep::new(
            Check::PrivateNetwork,
            StepStatus::Fail,
            format!(
                "Targets localhost/private/metadata range ({reason}; \
                 parser resolves host to {host})"
            ),
        ),
        None => ClassificationStep::new(
            Check::PrivateNetwork,
            StepStatus::Pass,
            "No private IP patterns detected",
        ),
    }
}

fn obfuscation_step(target: &ParsedTarget, policy: &Policy) -> ClassificationStep {
    if policy.is_obfuscated_host(&target.host) {
        ClassificationStep::new(
            Check::Obfuscation,
            StepStatus::Warn,
            "Suspicious numeric/hex hostname",
        )
    } else {
        ClassificationStep::new(Check::Obfuscation, StepStatus::Pass, "No obvious obfuscation")
    }
}

fn port_step(target: &ParsedTarget, policy: &Policy) -> ClassificationStep {
    let port = target.effective_port();
    if policy.port_allowed(&target.scheme, port) {
        return ClassificationStep::new(
            Check::Port,
            StepStatus::Pass,
            format!("Allowed port ({port})"),
        );
    }
    let expected: Vec<String> = policy
        .ports_for(&target.scheme)
        .map(|p| p.to_string())
        .collect();
    let message = if expected.is_empty() {
        format!("Blocked non-standard port ({port})")
    } else {
        format!(
            "Blocked non-standard port ({port}); {} allows {}",
            target.scheme,
            expected.join(", ")
        )
    };
    ClassificationStep::new(Check::Port, StepStatus::Fail, message)
}

fn redirect_step(raw: &str, policy: &Policy) -> ClassificationStep {
    if policy.matches_redirect_trap(raw) {
        ClassificationStep::new(
            Check::Redirect,
            StepStatus::Fail,
            "Simulated: would redirect to private IP",
        )
    } else {
        ClassificationStep::new(
            Check::Redirect,
            StepStatus::Pass,
            "No private redirect patterns detected",
        )
    }
}
