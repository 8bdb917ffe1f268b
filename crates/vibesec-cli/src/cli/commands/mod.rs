//! CLI command handlers, one per file.

mod batch;
mod check;
mod completions;
mod policy;
mod rate_limit;
mod rls;
mod samples;
mod secrets;
mod upload;

pub use batch::run_batch;
pub use check::run_check;
pub use completions::{run_completions, run_manpage};
pub use policy::run_policy;
pub use rate_limit::run_rate_limit;
pub use rls::{run_rls, RlsArgs};
pub use samples::run_samples;
pub use secrets::run_secrets;
pub use upload::run_upload;
