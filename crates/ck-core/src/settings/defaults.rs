use super::model::*;
use crate::clipboard::DEFAULT_MAX_HISTORY_COUNT;

/// Choices offered by the settings UI for `max_history_count`.
pub const MAX_HISTORY_COUNT_OPTIONS: [i64; 4] = [100, 200, 500, 1000];

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            launch_at_login: false,
            view_mode: ViewMode::List,
        }
    }
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_history_count: DEFAULT_MAX_HISTORY_COUNT,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            general: GeneralSettings::default(),
            history: HistorySettings::default(),
        }
    }
}
