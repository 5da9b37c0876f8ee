use std::sync::Arc;

use ck_core::ports::SettingsPort;
use ck_core::HistoryLimit;
use tracing::{info, instrument};

use crate::history::HistoryManager;

#[derive(Debug, thiserror::Error)]
pub enum UpdateHistoryLimitError {
    #[error("load settings failed: {0}")]
    Load(#[source] anyhow::Error),
    #[error("save settings failed: {0}")]
    Save(#[source] anyhow::Error),
}

/// Changes `max_history_count`, trims the history and persists the setting.
pub struct UpdateHistoryLimit {
    settings: Arc<dyn SettingsPort>,
    history: Arc<HistoryManager>,
}

impl UpdateHistoryLimit {
    pub fn new(settings: Arc<dyn SettingsPort>, history: Arc<HistoryManager>) -> Self {
        Self { settings, history }
    }

    /// The trim is applied even if saving the setting fails.
    #[instrument(name = "usecase.update_history_limit.execute", skip(self))]
    pub async fn execute(&self, max_history_count: i64) -> Result<HistoryLimit, UpdateHistoryLimitError> {
        let mut settings = self
            .settings
            .load()
            .await
            .map_err(UpdateHistoryLimitError::Load)?;
        settings.history.max_history_count = max_history_count;

        let limit = settings.history_limit();
        let evicted = self.history.trim_to_limit(limit);
        info!(?limit, evicted, "history limit updated");

        self.settings
            .save(&settings)
            .await
            .map_err(UpdateHistoryLimitError::Save)?;
        Ok(limit)
    }
}
