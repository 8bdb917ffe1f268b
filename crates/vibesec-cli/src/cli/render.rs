//! Text and JSON rendering of classification results.

use serde::Serialize;
use std::io::{self, Write};
use vibesec_core::{ClassificationResult, StepStatus, Verdict};

pub const KEY_NOTE: &str = "Key: Allowlist exact hosts, permit only http/https on standard ports, \
block private IPs (IPv4/IPv6), and reject redirects to private ranges.";

/// One classified URL, as emitted in JSON output.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub url: &'a str,
    pub verdict: Verdict,
    #[serde(flatten)]
    pub result: &'a ClassificationResult,
}

impl<'a> Report<'a> {
    pub fn new(url: &'a str, result: &'a ClassificationResult) -> Self {
        Self {
            url,
            verdict: result.verdict(),
            result,
        }
    }
}

pub(crate) fn status_tag(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Pass => "[pass]",
        StepStatus::Fail => "[FAIL]",
        StepStatus::Warn => "[warn]",
        StepStatus::Info => "[info]",
    }
}

/// Full report: headline, one line per step, then the key note.
pub fn write_report<W: Write>(
    out: &mut W,
    url: &str,
    result: &ClassificationResult,
) -> io::Result<()> {
    writeln!(out, "{}: {}", result.verdict().headline(), url.trim())?;
    for step in &result.steps {
        writeln!(out, "  {} {}: {}", status_tag(step.status), step.label, step.message)?;
    }
    writeln!(out, "{KEY_NOTE}")
}

/// One line: verdict, URL, and the labels of the blocking checks.
pub fn write_summary_line<W: Write>(
    out: &mut W,
    url: &str,
    result: &ClassificationResult,
) -> io::Result<()> {
    let verdict = match result.verdict() {
        Verdict::Allowed => "ALLOWED",
        Verdict::Blocked => "BLOCKED",
    };
    let reasons: Vec<&str> = result.blocking_steps().map(|s| s.label).collect();
    if reasons.is_empty() {
        writeln!(out, "{verdict:<8} {}", url.trim())
    } else {
        writeln!(out, "{verdict:<8} {} ({})", url.trim(), reasons.join(", "))
    }
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibesec_core::{classify, Policy};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn report_lists_headline_steps_and_key() {
        let policy = Policy::builtin().unwrap();
        let result = classify("http://example.com:8080", &policy);
        let text = render(|out| write_report(out, "http://example.com:8080", &result));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Request would be BLOCKED: http://example.com:8080");
        assert_eq!(lines.len(), 1 + result.steps.len() + 1);
        assert!(lines[1].starts_with("  [pass] Protocol:"));
        assert!(text.contains("[FAIL] Port: Blocked non-standard port (8080)"));
        assert_eq!(lines.last().copied(), Some(KEY_NOTE));
    }

    #[test]
    fn summary_line_names_blocking_checks() {
        let policy = Policy::builtin().unwrap();
        let result = classify("http://localhost:3000/admin", &policy);
        let line = render(|out| write_summary_line(out, "http://localhost:3000/admin", &result));
        assert_eq!(
            line,
            "BLOCKED  http://localhost:3000/admin (Allowlist, Private IPs, Port)\n"
        );

        let result = classify("https://example.com/api", &policy);
        let line = render(|out| write_summary_line(out, "https://example.com/api", &result));
        assert_eq!(line, "ALLOWED  https://example.com/api\n");
    }

    #[test]
    fn json_report_flattens_result() {
        let policy = Policy::builtin().unwrap();
        let result = classify("not a url", &policy);
        let text = render(|out| write_json(out, &Report::new("not a url", &result)));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["url"], "not a url");
        assert_eq!(value["verdict"], "blocked");
        assert_eq!(value["blocked"], true);
        assert_eq!(value["steps"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["steps"][0]["label"], "Invalid URL");
    }
}
