//! `vibesec batch <path>` – classify a list of URLs, one per line.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use vibesec_core::{classify, Policy};

use crate::cli::render::{write_json, write_summary_line, Report};
use crate::cli::Outcome;

/// Non-empty lines that aren't `#` comments, trimmed.
pub(crate) fn parse_url_list(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect()
}

pub(crate) fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("read URL list from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("read URL list {path}"))
    }
}

pub fn run_batch(policy: &Policy, path: &str, json: bool) -> Result<Outcome> {
    let text = read_input(path)?;
    let urls = parse_url_list(&text);
    tracing::info!(count = urls.len(), "classifying URL list");

    let results: Vec<_> = urls.iter().map(|u| classify(u, policy)).collect();
    let blocked = results.iter().filter(|r| r.blocked).count();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        let reports: Vec<Report<'_>> = urls
            .iter()
            .zip(&results)
            .map(|(u, r)| Report::new(u, r))
            .collect();
        write_json(&mut out, &reports)?;
    } else {
        for (url, result) in urls.iter().zip(&results) {
            write_summary_line(&mut out, url, result)?;
        }
        writeln!(
            out,
            "{} checked, {} blocked, {} allowed",
            urls.len(),
            blocked,
            urls.len() - blocked
        )?;
    }

    Ok(Outcome::flagged_if(blocked > 0))
}
