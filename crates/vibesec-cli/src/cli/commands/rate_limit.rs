//! `vibesec rate-limit` – replay a request burst against a fixed window.

use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use vibesec_core::rate_limit::{Decision, FixedWindow, RateLimitConfig};

use crate::cli::render::write_json;
use crate::cli::Outcome;

#[derive(Debug, Serialize)]
struct Hit {
    at_ms: u64,
    #[serde(flatten)]
    decision: Decision,
}

/// Send `requests` hits spaced `interval_ms` apart on a simulated clock.
fn simulate(config: &RateLimitConfig, requests: u32, interval_ms: u64) -> Vec<Hit> {
    let mut limiter = FixedWindow::new(config);
    let start = Instant::now();
    (0..u64::from(requests))
        .map(|i| {
            let at_ms = i.saturating_mul(interval_ms);
            Hit {
                at_ms,
                decision: limiter.hit(start + Duration::from_millis(at_ms)),
            }
        })
        .collect()
}

pub fn run_rate_limit(
    config: &RateLimitConfig,
    requests: u32,
    interval_ms: u64,
    json: bool,
) -> Result<Outcome> {
    let hits = simulate(config, requests, interval_ms);
    let rejected = hits.iter().filter(|h| !h.decision.allowed).count();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        write_json(&mut out, &hits)?;
    } else {
        writeln!(
            out,
            "limit {} per {} ms, {} requests every {} ms",
            config.max_requests, config.window_ms, requests, interval_ms
        )?;
        for h in &hits {
            writeln!(
                out,
                "[+{:>6} ms] Request {}: {}",
                h.at_ms,
                h.decision.request,
                h.decision.status_line()
            )?;
        }
        writeln!(out, "{} allowed, {} rejected", hits.len() - rejected, rejected)?;
    }
    Ok(Outcome::Clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flood_of_ten_hits_the_default_limit() {
        let hits = simulate(&RateLimitConfig::default(), 10, 100);
        let allowed: Vec<bool> = hits.iter().map(|h| h.decision.allowed).collect();
        assert_eq!(allowed, [vec![true; 5], vec![false; 5]].concat());
        assert_eq!(hits[9].at_ms, 900);
    }

    #[test]
    fn slow_requests_span_windows() {
        let cfg = RateLimitConfig {
            max_requests: 1,
            window_ms: 100,
        };
        let hits = simulate(&cfg, 3, 100);
        assert!(hits.iter().all(|h| h.decision.allowed));
    }
}
