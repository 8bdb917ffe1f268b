//! `vibesec samples` – list or run the built-in sample payloads.

use anyhow::{bail, Result};
use serde::Serialize;
use std::io::{self, Write};
use vibesec_core::samples::{self, Sample, SAMPLES};
use vibesec_core::{classify, Policy, Verdict};

use crate::cli::render::write_json;
use crate::cli::Outcome;

#[derive(Debug, Serialize)]
struct SampleRun {
    #[serde(flatten)]
    sample: Sample,
    actual: Verdict,
}

impl SampleRun {
    fn matches(&self) -> bool {
        self.sample.expected == self.actual
    }
}

/// Samples selected by `label`, or the whole catalog.
fn select(label: Option<&str>) -> Result<Vec<Sample>> {
    match label {
        Some(label) => match samples::find(label) {
            Some(sample) => Ok(vec![*sample]),
            None => bail!("no sample labelled '{label}' (see `vibesec samples`)"),
        },
        None => Ok(SAMPLES.to_vec()),
    }
}

pub fn run_samples(policy: &Policy, run: bool, label: Option<&str>, json: bool) -> Result<Outcome> {
    let selected = select(label)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !run && label.is_none() {
        if json {
            write_json(&mut out, SAMPLES)?;
        } else {
            for s in SAMPLES {
                writeln!(out, "{:<28} {:<8} {}", s.label, s.expected, s.url)?;
            }
        }
        return Ok(Outcome::Clean);
    }

    let runs: Vec<SampleRun> = selected
        .into_iter()
        .map(|s| SampleRun {
            sample: s,
            actual: classify(s.url, policy).verdict(),
        })
        .collect();
    let mismatches = runs.iter().filter(|r| !r.matches()).count();
    if mismatches > 0 {
        tracing::warn!(mismatches, "samples differ from expected verdicts under this policy");
    }

    if json {
        write_json(&mut out, &runs)?;
    } else {
        for r in &runs {
            let mark = if r.matches() { "ok" } else { "MISMATCH" };
            writeln!(
                out,
                "{:<8} {:<28} {:<8} {}",
                mark, r.sample.label, r.actual, r.sample.url
            )?;
        }
        writeln!(out, "{} samples, {} mismatched", runs.len(), mismatches)?;
    }

    Ok(Outcome::flagged_if(mismatches > 0))
}
