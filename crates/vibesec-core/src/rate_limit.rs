//! Fixed-window rate limiting over a caller-supplied clock.
//!
//! [`FixedWindow`] is owned state; each [`FixedWindow::hit`] takes the
//! current instant so simulations and tests drive time explicitly.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// The `[rate_limit]` table of config.toml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests allowed per window.
    pub max_requests: u32,
    pub window_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window_ms: 10_000,
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

/// Outcome of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// 1-based request number within the current window.
    pub request: u32,
    pub allowed: bool,
    /// Time until the window resets, for rejected requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_ms: Option<u64>,
}

impl Decision {
    pub fn status_line(&self) -> &'static str {
        if self.allowed {
            "200 OK"
        } else {
            "429 Too Many Requests"
        }
    }
}

/// One counter per window. A window opens at the first request after the
/// previous one expired; within it the first `max_requests` requests pass.
#[derive(Debug, Clone)]
pub struct FixedWindow {
    max_requests: u32,
    window: Duration,
    window_start: Option<Instant>,
    count: u32,
}

impl FixedWindow {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            window: config.window(),
            window_start: None,
            count: 0,
        }
    }

    pub fn hit(&mut self, now: Instant) -> Decision {
        let start = match self.window_start {
            Some(start) if now.saturating_duration_since(start) < self.window => start,
            _ => {
                self.window_start = Some(now);
                self.count = 0;
                now
            }
        };

        self.count = self.count.saturating_add(1);
        let allowed = self.count <= self.max_requests;
        let retry_after_ms = (!allowed).then(|| {
            let remaining = self.window.saturating_sub(now.saturating_duration_since(start));
            u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX)
        });
        if !allowed && self.count - 1 == self.max_requests {
            tracing::info!(limit = self.max_requests, "rate limit reached");
        }

        Decision {
            request: self.count,
            allowed,
            retry_after_ms,
        }
    }

    /// Forget the current window.
    pub fn reset(&mut self) {
        self.window_start = None;
        self.count = 0;
    }
}
