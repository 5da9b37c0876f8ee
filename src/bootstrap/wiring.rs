//! # Dependency wiring
//!
//! Builds the infra and platform implementations and injects them into the
//! application layer. This is the only module that depends on `ck-infra`,
//! `ck-platform` and `ck-app` at once; it assembles, it does not decide.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ck_app::usecases::{CaptureClipboardItem, CopyItemToClipboard, SearchHistoryStore, UpdateHistoryLimit};
use ck_app::{ClipboardWriter, HistoryManager};
use ck_core::ports::{ClipboardHistoryStorePort, ClockPort, SettingsPort, SystemClipboardPort};
use ck_core::{AppConfig, ObservedChangeCount, Settings};
use ck_infra::db::mappers::ClipboardItemRowMapper;
use ck_infra::db::pool::init_db_pool;
use ck_infra::db::repositories::DieselClipboardHistoryRepository;
use ck_infra::db::DieselSqliteExecutor;
use ck_infra::settings::FileSettingsRepository;
use ck_infra::time::SystemClock;
use ck_platform::{AppDirs, ClipboardPoller};
use tokio::runtime::Handle;
use tracing::{info, warn};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    #[error("Failed to create directory {path}: {message}")]
    CreateDir { path: PathBuf, message: String },
}

/// Everything the process needs after startup.
pub struct AppRuntime {
    pub config: AppConfig,
    pub settings: Settings,
    pub history: Arc<HistoryManager>,
    pub poller: Arc<ClipboardPoller>,
    pub writer: Arc<ClipboardWriter>,
    pub copy_item: CopyItemToClipboard,
    pub search_store: SearchHistoryStore,
    pub update_history_limit: UpdateHistoryLimit,
    pub observed: Arc<ObservedChangeCount>,
}

/// Assemble the runtime and load persisted history.
///
/// Must be called from within a tokio runtime: the history manager spawns its
/// write-behind tasks on the current handle.
pub async fn wire(
    config: AppConfig,
    dirs: &AppDirs,
    clipboard: Arc<dyn SystemClipboardPort>,
) -> WiringResult<AppRuntime> {
    let settings_repo: Arc<dyn SettingsPort> =
        Arc::new(FileSettingsRepository::new(dirs.settings_path()));
    let settings = match settings_repo.load().await {
        Ok(settings) => settings,
        Err(err) => {
            warn!(error = %err, "Failed to load settings, using defaults");
            Settings::default()
        }
    };

    let database_path = config
        .storage
        .database_path
        .clone()
        .unwrap_or_else(|| dirs.database_path());
    let store = create_history_store(&database_path)?;

    let history = Arc::new(HistoryManager::new(
        Arc::clone(&store),
        settings.history_limit(),
        config.load_limit(),
        Handle::current(),
    ));
    if let Err(err) = history.load().await {
        warn!(error = %err, "Starting with empty clipboard history");
    }

    let initial = clipboard.change_count().unwrap_or_else(|err| {
        warn!(error = %err, "Failed to read initial change count");
        Default::default()
    });
    let observed = Arc::new(ObservedChangeCount::new(initial));

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let capture = Arc::new(CaptureClipboardItem::new(Arc::clone(&history), clock));
    let poller = Arc::new(ClipboardPoller::new(
        Arc::clone(&clipboard),
        Arc::clone(&observed),
        capture,
        config.poll_interval(),
    ));

    let writer = Arc::new(ClipboardWriter::new(clipboard, Arc::clone(&observed)));

    info!(
        database = %database_path.display(),
        limit = ?settings.history_limit(),
        items = history.view().total_count,
        "Clipkeep runtime wired"
    );

    Ok(AppRuntime {
        copy_item: CopyItemToClipboard::new(Arc::clone(&history), Arc::clone(&writer)),
        search_store: SearchHistoryStore::new(store),
        update_history_limit: UpdateHistoryLimit::new(settings_repo, Arc::clone(&history)),
        config,
        settings,
        history,
        poller,
        writer,
        observed,
    })
}

fn create_history_store(database_path: &Path) -> WiringResult<Arc<dyn ClipboardHistoryStorePort>> {
    if let Some(parent) = database_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| WiringError::CreateDir {
            path: parent.to_path_buf(),
            message: e.to_string(),
        })?;
    }

    let pool = init_db_pool(&database_path.to_string_lossy())
        .map_err(|e| WiringError::DatabaseInit(format!("{e:#}")))?;

    Ok(Arc::new(DieselClipboardHistoryRepository::new(
        DieselSqliteExecutor::new(pool),
        ClipboardItemRowMapper,
        ClipboardItemRowMapper,
    )))
}
