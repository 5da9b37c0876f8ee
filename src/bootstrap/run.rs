//! Process lifecycle: startup, the Ctrl-C wait and orderly shutdown.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use ck_app::KeywordDebouncer;
use ck_core::ports::SystemClipboardPort;
use ck_platform::{AppDirs, LocalClipboard};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::config::load_config_or_default;
use super::tracing::init_tracing_subscriber;
use super::wiring::wire;

/// Upper bound on waiting for in-flight history writes at exit.
const SHUTDOWN_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let dirs = AppDirs::resolve().context("Failed to resolve application directories")?;

    if let Err(err) = init_tracing_subscriber(&dirs.log_dir()) {
        eprintln!("Failed to initialize tracing: {err:#}");
    }

    let config_path = config_path.unwrap_or_else(|| dirs.config_path());
    let config = load_config_or_default(&config_path);
    info!(config = %config_path.display(), "Starting Clipkeep");

    let clipboard: Arc<dyn SystemClipboardPort> =
        Arc::new(LocalClipboard::new().context("Failed to open the system clipboard")?);
    let runtime = wire(config, &dirs, clipboard).await?;

    let shutdown = CancellationToken::new();
    let poller_task = Arc::clone(&runtime.poller).spawn(shutdown.child_token());
    let (_keywords, debouncer_task) = KeywordDebouncer::spawn(
        Arc::clone(&runtime.history),
        runtime.config.search_debounce(),
        shutdown.child_token(),
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Shutdown requested");

    shutdown.cancel();
    if let Err(err) = poller_task.await {
        warn!(error = %err, "Clipboard poller ended abnormally");
    }
    let _ = debouncer_task.await;

    let pending = runtime.history.pending_writes();
    if tokio::time::timeout(SHUTDOWN_FLUSH_TIMEOUT, runtime.history.flush())
        .await
        .is_err()
    {
        warn!(pending, "Timed out waiting for history writes");
    }

    info!(items = runtime.history.view().total_count, "Clipkeep stopped");
    Ok(())
}
