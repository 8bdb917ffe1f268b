//! `vibesec secrets <path>` – check where credentials in a .env file may live.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};
use vibesec_core::secrets::{scan_env, SecretKind, SecretRules};

use super::batch::read_input;
use crate::cli::render::{status_tag, write_json};
use crate::cli::Outcome;

#[derive(Serialize)]
struct CatalogEntry {
    kind: SecretKind,
    title: &'static str,
    location: &'static str,
    guidance: &'static str,
    example: &'static str,
}

fn catalog() -> Vec<CatalogEntry> {
    SecretKind::ALL
        .iter()
        .map(|&kind| CatalogEntry {
            kind,
            title: kind.title(),
            location: kind.exposure().location(),
            guidance: kind.guidance(),
            example: kind.example(),
        })
        .collect()
}

pub fn run_secrets(path: Option<&str>, list: bool, json: bool) -> Result<Outcome> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if list {
        let entries = catalog();
        if json {
            write_json(&mut out, &entries)?;
        } else {
            for (i, e) in entries.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "{} ({})", e.title, e.location)?;
                writeln!(out, "  {}", e.guidance)?;
                writeln!(out, "  Example: {}", e.example)?;
            }
        }
        return Ok(Outcome::Clean);
    }

    let text = read_input(path.unwrap_or("-"))?;
    let rules = SecretRules::builtin().context("compile secret rules")?;
    let findings = scan_env(&rules, &text);
    let leaks = findings.iter().filter(|f| f.is_leak()).count();

    if json {
        write_json(&mut out, &findings)?;
    } else {
        for f in &findings {
            writeln!(
                out,
                "  {} line {}: {} ({}): {}",
                status_tag(f.status),
                f.line,
                f.name,
                f.title,
                f.message
            )?;
        }
        writeln!(
            out,
            "{} credential(s) recognized, {} exposed to the client bundle",
            findings.len(),
            leaks
        )?;
    }
    Ok(Outcome::flagged_if(leaks > 0))
}
