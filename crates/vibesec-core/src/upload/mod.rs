//! Upload validation (simulated).
//!
//! [`validate_upload`] runs four independent checks over an upload
//! candidate and reports each one, like the URL classifier does:
//! magic bytes, declared MIME type, size limit and file extension.
//! An executable signature, a disallowed MIME type, an oversized file or a
//! blocked extension rejects the file; an unknown signature alone only
//! flags it for review.

mod signature;

pub use signature::{extension, guess_mime, sniff, ContentSignature, SNIFF_LEN};

use serde::{Deserialize, Serialize};

use crate::classify::StepStatus;

const MIB: u64 = 1024 * 1024;

/// Upload rules (the `[upload]` table of config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Declared MIME types that are accepted.
    pub allowed_mime_types: Vec<String>,
    /// Largest accepted size in bytes.
    pub max_size_bytes: u64,
    /// Extensions that are always rejected (without the dot).
    pub blocked_extensions: Vec<String>,
}

const DEFAULT_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "text/plain",
    "application/pdf",
];

const DEFAULT_BLOCKED_EXTENSIONS: &[&str] =
    &["exe", "bat", "cmd", "com", "pif", "scr", "vbs", "js", "jar"];

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_mime_types: DEFAULT_MIME_TYPES.iter().map(|s| s.to_string()).collect(),
            max_size_bytes: 5 * MIB,
            blocked_extensions: DEFAULT_BLOCKED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// File metadata and leading bytes as received from the client.
#[derive(Debug, Clone, Copy)]
pub struct UploadCandidate<'a> {
    pub name: &'a str,
    /// MIME type the client declared.
    pub mime: &'a str,
    pub size: u64,
    /// First bytes of the content; only [`SNIFF_LEN`] are examined.
    pub head: &'a [u8],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadCheck {
    MagicBytes,
    MimeType,
    FileSize,
    Extension,
}

impl UploadCheck {
    pub fn label(self) -> &'static str {
        match self {
            UploadCheck::MagicBytes => "Magic bytes",
            UploadCheck::MimeType => "MIME type",
            UploadCheck::FileSize => "File size",
            UploadCheck::Extension => "File extension",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadStep {
    pub check: UploadCheck,
    pub label: &'static str,
    pub status: StepStatus,
    pub message: String,
}

impl UploadStep {
    fn new(check: UploadCheck, status: StepStatus, message: impl Into<String>) -> Self {
        Self {
            check,
            label: check.label(),
            status,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadVerdict {
    Accepted,
    /// No check failed but at least one warned.
    Review,
    Rejected,
}

impl UploadVerdict {
    pub fn headline(self) -> &'static str {
        match self {
            UploadVerdict::Accepted => "File would be accepted",
            UploadVerdict::Review => "File flagged for review",
            UploadVerdict::Rejected => "File would be rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    pub verdict: UploadVerdict,
    pub signature: ContentSignature,
    pub steps: Vec<UploadStep>,
}

impl UploadReport {
    fn from_steps(signature: ContentSignature, steps: Vec<UploadStep>) -> Self {
        let verdict = if steps.iter().any(|s| s.status == StepStatus::Fail) {
            UploadVerdict::Rejected
        } else if steps.iter().all(|s| s.status == StepStatus::Pass) {
            UploadVerdict::Accepted
        } else {
            UploadVerdict::Review
        };
        Self {
            verdict,
            signature,
            steps,
        }
    }

    pub fn step(&self, check: UploadCheck) -> Option<&UploadStep> {
        self.steps.iter().find(|s| s.check == check)
    }
}

fn format_mib(size: u64) -> String {
    format!("{:.2} MB", size as f64 / MIB as f64)
}

/// Validate `file` against `config`. All four checks always run.
pub fn validate_upload(file: &UploadCandidate<'_>, config: &UploadConfig) -> UploadReport {
    let ext = extension(file.name);
    let signature = sniff(file.head);

    let magic = match (signature, signature.mime()) {
        (ContentSignature::Executable, _) => UploadStep::new(
            UploadCheck::MagicBytes,
            StepStatus::Fail,
            format!(
                "Executable file detected! (.{} -> executable)",
                ext.as_deref().unwrap_or("")
            ),
        ),
        (_, Some(mime)) => UploadStep::new(
            UploadCheck::MagicBytes,
            StepStatus::Pass,
            format!("Content matches {mime}"),
        ),
        (_, None) => UploadStep::new(
            UploadCheck::MagicBytes,
            StepStatus::Warn,
            "Unknown file signature",
        ),
    };

    let declared = file.mime.trim().to_ascii_lowercase();
    let mime_ok = config
        .allowed_mime_types
        .iter()
        .any(|m| m.trim().eq_ignore_ascii_case(&declared));
    let mime = if mime_ok {
        UploadStep::new(
            UploadCheck::MimeType,
            StepStatus::Pass,
            format!("{declared} is allowed"),
        )
    } else {
        UploadStep::new(
            UploadCheck::MimeType,
            StepStatus::Fail,
            format!("{declared} is not allowed"),
        )
    };

    let size = if file.size <= config.max_size_bytes {
        UploadStep::new(
            UploadCheck::FileSize,
            StepStatus::Pass,
            format!("{} is within limit", format_mib(file.size)),
        )
    } else {
        UploadStep::new(
            UploadCheck::FileSize,
            StepStatus::Fail,
            format!(
                "{} exceeds {} limit",
                format_mib(file.size),
                format_mib(config.max_size_bytes)
            ),
        )
    };

    let extension = match ext.as_deref() {
        Some(e)
            if config
                .blocked_extensions
                .iter()
                .any(|b| b.trim().trim_start_matches('.').eq_ignore_ascii_case(e)) =>
        {
            UploadStep::new(
                UploadCheck::Extension,
                StepStatus::Fail,
                format!("{e} files are blocked for security"),
            )
        }
        Some(e) => UploadStep::new(
            UploadCheck::Extension,
            StepStatus::Pass,
            format!("{e} extension is safe"),
        ),
        None => UploadStep::new(UploadCheck::Extension, StepStatus::Pass, "No extension"),
    };

    let report = UploadReport::from_steps(signature, vec![magic, mime, size, extension]);
    tracing::debug!(
        name = file.name,
        size = file.size,
        verdict = ?report.verdict,
        "validated upload"
    );
    report
}
