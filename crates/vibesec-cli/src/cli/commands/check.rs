//! `vibesec check <url>...` – classify URLs and print the full report.

use anyhow::Result;
use std::io::{self, Write};
use vibesec_core::{classify, Policy};

use crate::cli::render::{write_json, write_report, Report};
use crate::cli::Outcome;

pub fn run_check(policy: &Policy, urls: &[String], json: bool) -> Result<Outcome> {
    let results: Vec<_> = urls.iter().map(|u| classify(u, policy)).collect();
    let any_blocked = results.iter().any(|r| r.blocked);

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
        for (i, (url, result)) in urls.iter().zip(&results).enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            write_report(&mut out, url, result)?;
        }
    }

    Ok(Outcome::flagged_if(any_blocked))
}
