use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

const APP_DIR_NAME: &str = "clipkeep";
const DATABASE_FILE: &str = "clipkeep.db";
const SETTINGS_FILE: &str = "settings.json";
const CONFIG_FILE: &str = "config.toml";

/// `CLIPKEEP_PROFILE` gives each profile its own directories.
fn resolved_app_dir_name() -> String {
    match std::env::var("CLIPKEEP_PROFILE") {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

/// Directories the application reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub data_dir: PathBuf,
    pub config_dir: PathBuf,
}

impl AppDirs {
    /// Resolves the per-user directories for the current platform.
    pub fn resolve() -> Result<Self> {
        let data = dirs::data_local_dir().ok_or_else(|| anyhow!("no local data directory"))?;
        let config = dirs::config_dir().ok_or_else(|| anyhow!("no config directory"))?;
        let name = resolved_app_dir_name();
        Ok(Self {
            data_dir: data.join(&name),
            config_dir: config.join(&name),
        })
    }

    /// Places both directories under `base`.
    pub fn with_base(base: impl AsRef<Path>) -> Self {
        let root = base.as_ref().join(resolved_app_dir_name());
        Self {
            data_dir: root.join("data"),
            config_dir: root.join("config"),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}
