//! `vibesec upload <path>` – validate a local file as if it were uploaded.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use vibesec_core::upload::{
    guess_mime, validate_upload, UploadCandidate, UploadConfig, UploadReport, UploadVerdict,
    SNIFF_LEN,
};

use crate::cli::render::{status_tag, write_json};
use crate::cli::Outcome;

fn read_head(path: &Path) -> Result<(u64, Vec<u8>)> {
    let file = fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    let size = file
        .metadata()
        .with_context(|| format!("stat {}", path.display()))?
        .len();
    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64)
        .read_to_end(&mut head)
        .with_context(|| format!("read {}", path.display()))?;
    Ok((size, head))
}

pub(crate) fn write_upload_report<W: Write>(
    out: &mut W,
    name: &str,
    report: &UploadReport,
) -> io::Result<()> {
    writeln!(out, "{}: {name}", report.verdict.headline())?;
    for step in &report.steps {
        writeln!(out, "  {} {}: {}", status_tag(step.status), step.label, step.message)?;
    }
    Ok(())
}

pub fn run_upload(
    config: &UploadConfig,
    path: &Path,
    mime: Option<&str>,
    json: bool,
) -> Result<Outcome> {
    let (size, head) = read_head(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime = mime.unwrap_or_else(|| guess_mime(&name));

    let report = validate_upload(
        &UploadCandidate {
            name: &name,
            mime,
            size,
            head: &head,
        },
        config,
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        write_json(&mut out, &report)?;
    } else {
        write_upload_report(&mut out, &name, &report)?;
    }
    Ok(Outcome::flagged_if(report.verdict != UploadVerdict::Accepted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_is_capped_and_size_is_full_length() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&[b'x'; 100]).unwrap();
        f.flush().unwrap();
        let (size, head) = read_head(f.path()).unwrap();
        assert_eq!(size, 100);
        assert_eq!(head.len(), SNIFF_LEN);
    }

    #[test]
    fn executable_renamed_to_png_is_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.png");
        fs::write(&path, b"MZ\x90\x00\x03\x00\x00\x00").unwrap();
        let outcome = run_upload(&UploadConfig::default(), &path, None, false).unwrap();
        assert_eq!(outcome, Outcome::Flagged);
    }

    #[test]
    fn real_pdf_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        fs::write(&path, b"%PDF-1.7\n%...").unwrap();
        let outcome = run_upload(&UploadConfig::default(), &path, None, true).unwrap();
        assert_eq!(outcome, Outcome::Clean);
    }

    #[test]
    fn report_lists_every_check() {
        let report = validate_upload(
            &UploadCandidate {
                name: "run.bat",
                mime: "application/x-bat",
                size: 10,
                head: b"@echo off",
            },
            &UploadConfig::default(),
        );
        let mut buf = Vec::new();
        write_upload_report(&mut buf, "run.bat", &report).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("File would be rejected: run.bat"));
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("[FAIL] File extension: bat files are blocked"));
    }

    #[test]
    fn missing_file_names_path() {
        let err = run_upload(
            &UploadConfig::default(),
            Path::new("/nonexistent/vibesec.png"),
            None,
            false,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/vibesec.png"));
    }
}
