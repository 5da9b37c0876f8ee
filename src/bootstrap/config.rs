//! # Configuration Loader / 配置加载器
//!
//! Reads `config.toml` into [`AppConfig`]. Missing sections and fields take
//! their defaults; range checks happen where the values are used.

use std::path::Path;

use anyhow::Context;
use ck_core::config::AppConfig;
use tracing::warn;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content).context("Failed to parse config as TOML")
}

/// Like [`load_config`], but a missing or broken file yields the defaults.
pub fn load_config_or_default(config_path: &Path) -> AppConfig {
    if !config_path.exists() {
        return AppConfig::default();
    }
    match load_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %config_path.display(), error = %format!("{err:#}"), "using default configuration");
            AppConfig::default()
        }
    }
}
