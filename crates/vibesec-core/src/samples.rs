//! Sample payloads for the SSRF demo ("Try these").

use serde::Serialize;

use crate::classify::Verdict;

/// A canned URL with the verdict it gets under the built-in policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub label: &'static str,
    pub url: &'static str,
    pub expected: Verdict,
}

pub const SAMPLES: &[Sample] = &[
    Sample {
        label: "AWS Metadata",
        url: "http://169.254.169.254/latest/meta-data/",
        expected: Verdict::Blocked,
    },
    Sample {
        label: "Localhost",
        url: "http://localhost:3000/admin",
        expected: Verdict::Blocked,
    },
    Sample {
        label: "127.0.0.1",
        url: "http://127.0.0.1",
        expected: Verdict::Blocked,
    },
    Sample {
        label: "IPv6 ::1",
        url: "http://[::1]/",
        expected: Verdict::Blocked,
    },
    Sample {
        label: "Decimal 2130706433",
        url: "http://2130706433/",
        expected: Verdict::Blocked,
    },
    Sample {
        label: "Hex 0x7f000001",
        url: "http://0x7f000001/",
        expected: Verdict::Blocked,
    },
    Sample {
        label: "Userinfo Trick",
        url: "http://localhost@evil.com/",
        expected: Verdict::Blocked,
    },
    Sample {
        label: "gopher://",
        url: "gopher://example.com",
        expected: Verdict::Blocked,
    },
    Sample {
        label: "Port 8080",
        url: "http://example.com:8080",
        expected: Verdict::Blocked,
    },
    Sample {
        label: "Redirect Trap (simulated)",
        url: "https://example.com/redirect-to-localhost",
        expected: Verdict::Blocked,
    },
    Sample {
        label: "Allowed: example.com",
        url: "https://example.com/api",
        expected: Verdict::Allowed,
    },
    Sample {
        label: "Allowed: api.myapp.com",
        url: "https://api.myapp.com/v1/data",
        expected: Verdict::Allowed,
    },
];

/// Look up a sample by label, ignoring ASCII case.
pub fn find(label: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|s| s.label.eq_ignore_ascii_case(label))
}
