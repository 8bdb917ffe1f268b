//! `vibesec policy` – print the effective policy.

use anyhow::{Context, Result};
use serde::Serialize;
use vibesec_core::{Policy, PolicyConfig};

use crate::cli::Outcome;

/// Wrapper so the output is a ready-to-paste `[policy]` table.
#[derive(Serialize)]
struct PolicyTable<'a> {
    policy: &'a PolicyConfig,
}

pub(crate) fn policy_toml(policy: &Policy) -> Result<String> {
    toml::to_string_pretty(&PolicyTable {
        policy: policy.config(),
    })
    .context("serialize policy")
}

pub fn run_policy(policy: &Policy) -> Result<Outcome> {
    print!("{}", policy_toml(policy)?);
    Ok(Outcome::Clean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibesec_core::config::VibesecConfig;

    #[test]
    fn printed_policy_loads_back() {
        let policy = Policy::builtin().unwrap();
        let text = policy_toml(&policy).unwrap();
        assert!(text.contains("[policy]"));
        let cfg: VibesecConfig = toml::from_str(&text).unwrap();
        assert_eq!(&cfg.policy, policy.config());
    }
}
