//! # Configuration Loader / 配置加载器
//!
//! Reads the shell's TOML file into [`ShellConfig`]. Loading is pure: values
//! are taken as written, missing keys fall back to serde defaults, and I/O
//! or parse failures are reported with context.

use std::path::{Path, PathBuf};

use anyhow::Context;
use crew_core::config::FlowConfig;
use crew_infra::flag_store::file::default_data_dir;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Top-level shell configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub flow: FlowConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the flag file and logs. Unset means the platform's
    /// local data directory.
    pub data_dir: Option<PathBuf>,
}

impl ShellConfig {
    /// Resolved data directory.
    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir().context("no local data directory on this platform"),
        }
    }

    pub fn log_dir(&self) -> anyhow::Result<PathBuf> {
        Ok(self.data_dir()?.join("logs"))
    }
}

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML for
/// [`ShellConfig`].
pub fn load_config(config_path: &Path) -> anyhow::Result<ShellConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content).context("Failed to parse config as TOML")
}

/// Like [`load_config`], but a missing file yields the defaults.
pub fn load_config_or_default(config_path: &Path) -> anyhow::Result<ShellConfig> {
    if !config_path.exists() {
        info!(path = %config_path.display(), "config file not found, using defaults");
        return Ok(ShellConfig::default());
    }
    load_config(config_path)
}
