use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::host_policy::{Policy, PolicyConfig, PolicyError};
use crate::rate_limit::RateLimitConfig;
use crate::upload::UploadConfig;

/// Global configuration loaded from `~/.config/vibesec/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VibesecConfig {
    /// Outbound request policy used by the classifier.
    pub policy: PolicyConfig,
    /// Upload validation rules.
    pub upload: UploadConfig,
    /// Rate-limit simulation defaults.
    pub rate_limit: RateLimitConfig,
}

impl VibesecConfig {
    /// Compile the `[policy]` table.
    pub fn compile_policy(&self) -> Result<Policy, PolicyError> {
        Policy::compile(&self.policy)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vibesec")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VibesecConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VibesecConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file. The file must exist.
pub fn load_from(path: &Path) -> Result<VibesecConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: VibesecConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}
