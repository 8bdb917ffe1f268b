//! URL safety classification (SSRF filtering, simulated).
//!
//! [`classify`] takes an untrusted URL string and a compiled [`Policy`](crate::host_policy::Policy)
//! and returns the ordered reasoning trail plus a single verdict. Checks run
//! in a fixed order and never short-circuit:
//!
//! protocol → parsed echo → userinfo → allowlist → private network →
//! obfuscation → port → redirect trap
//!
//! Protocol, allowlist, private network, port and redirect failures block.
//! Userinfo and obfuscation only warn. Nothing here performs network I/O;
//! the redirect check is a pattern match on the URL text.

mod run;
mod step;

pub use run::classify;
pub use step::{Check, ClassificationResult, ClassificationStep, StepStatus, Verdict};
