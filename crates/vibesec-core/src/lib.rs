pub mod config;
pub mod logging;

pub mod classify;
pub mod host_policy;
pub mod rate_limit;
pub mod rls;
pub mod samples;
pub mod secrets;
pub mod upload;
pub mod url_model;

pub use classify::{classify, Check, ClassificationResult, ClassificationStep, StepStatus, Verdict};
pub use host_policy::{Policy, PolicyConfig, PolicyError};
