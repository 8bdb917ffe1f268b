//! CLI for the Vibe Secure URL safety classifier.

mod commands;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::{Path, PathBuf};
use vibesec_core::config::{self, VibesecConfig};
use vibesec_core::Policy;

use commands::{
    run_batch, run_check, run_completions, run_manpage, run_policy, run_rate_limit, run_rls,
    run_samples, run_secrets, run_upload, RlsArgs,
};

/// Top-level CLI for vibesec.
#[derive(Debug, Parser)]
#[command(name = "vibesec")]
#[command(
    about = "Vibe Secure: simulated web-security checks (SSRF, uploads, secrets, RLS, rate limits)",
    long_about = None
)]
pub struct Cli {
    /// Config file to use instead of ~/.config/vibesec/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Classify one or more URLs and show every check.
    Check {
        /// URLs to classify.
        #[arg(required = true)]
        urls: Vec<String>,
        /// Print JSON instead of the text report.
        #[arg(long)]
        json: bool,
    },

    /// Classify URLs read from a file, one per line ("-" for stdin).
    Batch {
        /// Path to the URL list.
        path: String,
        /// Print JSON instead of one summary line per URL.
        #[arg(long)]
        json: bool,
    },

    /// List the built-in sample payloads, or classify all of them.
    Samples {
        /// Classify every sample and compare with its expected verdict.
        #[arg(long)]
        run: bool,
        /// Only this sample (label, case-insensitive); implies --run.
        #[arg(long, value_name = "LABEL")]
        label: Option<String>,
        /// Print JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the effective [policy] table as TOML.
    Policy,

    /// Validate a file as an upload: magic bytes, MIME type, size, extension.
    Upload {
        /// File to validate.
        path: PathBuf,
        /// Declared MIME type (default: guessed from the extension).
        #[arg(long)]
        mime: Option<String>,
        /// Print JSON.
        #[arg(long)]
        json: bool,
    },

    /// Classify credentials in a .env file ("-" for stdin) by where they may live.
    Secrets {
        /// The .env file.
        #[arg(required_unless_present = "list")]
        path: Option<String>,
        /// Print the catalog of known credential kinds instead.
        #[arg(long)]
        list: bool,
        /// Print JSON.
        #[arg(long)]
        json: bool,
    },

    /// Query a demo notes table as a user, with or without row-level security.
    Rls {
        /// User running the query.
        #[arg(long = "as", value_name = "USER", default_value = "User A")]
        user: String,
        /// Disable the owner filter.
        #[arg(long)]
        no_rls: bool,
        /// Extra row to insert before querying (repeatable).
        #[arg(long = "add", value_name = "OWNER=DATA")]
        add: Vec<String>,
        /// Start from an empty table instead of the two demo rows.
        #[arg(long)]
        empty: bool,
        /// Print JSON.
        #[arg(long)]
        json: bool,
    },

    /// Simulate a burst of requests against a fixed-window rate limiter.
    RateLimit {
        /// Number of requests to send.
        #[arg(long, default_value_t = 10)]
        requests: u32,
        /// Milliseconds between requests.
        #[arg(long, default_value_t = 100)]
        interval_ms: u64,
        /// Requests per window (default from config).
        #[arg(long)]
        limit: Option<u32>,
        /// Window length in milliseconds (default from config).
        #[arg(long)]
        window_ms: Option<u64>,
        /// Print JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print a roff man page.
    Manpage,
}

/// How a successful run ended. `Flagged` maps to exit status 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    /// A URL was blocked, a sample missed its expected verdict, an upload was
    /// not accepted, a secret leaked into the bundle, or a query exposed
    /// other users' rows.
    Flagged,
}

impl Outcome {
    pub fn flagged_if(flag: bool) -> Self {
        if flag {
            Outcome::Flagged
        } else {
            Outcome::Clean
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<VibesecConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

fn load_policy(path: Option<&Path>) -> Result<Policy> {
    let cfg = load_config(path)?;
    tracing::debug!("loaded config: {:?}", cfg);
    cfg.compile_policy().context("invalid [policy] in config")
}

impl Cli {
    pub fn run(self) -> Result<Outcome> {
        let config_path = self.config.as_deref();

        match self.command {
            CliCommand::Check { urls, json } => {
                let policy = load_policy(config_path)?;
                run_check(&policy, &urls, json)
            }
            CliCommand::Batch { path, json } => {
                let policy = load_policy(config_path)?;
                run_batch(&policy, &path, json)
            }
            CliCommand::Samples { run, label, json } => {
                let policy = load_policy(config_path)?;
                run_samples(&policy, run, label.as_deref(), json)
            }
            CliCommand::Policy => {
                let policy = load_policy(config_path)?;
                run_policy(&policy)
            }
            CliCommand::Upload { path, mime, json } => {
                let cfg = load_config(config_path)?;
                run_upload(&cfg.upload, &path, mime.as_deref(), json)
            }
            CliCommand::Secrets { path, list, json } => run_secrets(path.as_deref(), list, json),
            CliCommand::Rls {
                user,
                no_rls,
                add,
                empty,
                json,
            } => run_rls(&RlsArgs {
                user,
                rls: !no_rls,
                add,
                empty,
                json,
            }),
            CliCommand::RateLimit {
                requests,
                interval_ms,
                limit,
                window_ms,
                json,
            } => {
                let mut rate = load_config(config_path)?.rate_limit;
                if let Some(limit) = limit {
                    rate.max_requests = limit;
                }
                if let Some(window_ms) = window_ms {
                    rate.window_ms = window_ms;
                }
                run_rate_limit(&rate, requests, interval_ms, json)
            }
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Manpage => run_manpage(),
        }
    }
}

#[cfg(test)]
mod tests;
