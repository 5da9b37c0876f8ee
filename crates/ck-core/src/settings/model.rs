use serde::{Deserialize, Serialize};

use crate::clipboard::HistoryLimit;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// 开机启动，由外部协作者读取
    pub launch_at_login: bool,
    #[serde(default)]
    pub view_mode: ViewMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Values `>= 10000` mean unlimited; non-positive values fall back to 200.
    pub max_history_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub schema_version: u32,

    #[serde(default)]
    pub general: GeneralSettings,

    #[serde(default)]
    pub history: HistorySettings,
}

impl Settings {
    pub fn history_limit(&self) -> HistoryLimit {
        HistoryLimit::from_setting(self.history.max_history_count)
    }
}
