use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info_span, Instrument};

use crate::history::HistoryManager;

/// Collapses bursts of keyword edits into one `set_keyword` call once the
/// input has been quiet for the debounce delay.
#[derive(Clone)]
pub struct KeywordDebouncer {
    tx: mpsc::UnboundedSender<String>,
}

impl KeywordDebouncer {
    pub fn spawn(
        manager: Arc<HistoryManager>,
        delay: Duration,
        shutdown: CancellationToken,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(
            run(manager, delay, rx, shutdown).instrument(info_span!("search.keyword_debouncer")),
        );
        (Self { tx }, task)
    }

    /// Queues a keyword edit. Ignored once the debouncer has stopped.
    pub fn submit(&self, keyword: impl Into<String>) {
        let _ = self.tx.send(keyword.into());
    }
}

async fn run(
    manager: Arc<HistoryManager>,
    delay: Duration,
    mut rx: mpsc::UnboundedReceiver<String>,
    shutdown: CancellationToken,
) {
    let mut pending: Option<String> = None;
    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            received = rx.recv() => match received {
                Some(keyword) => {
                    pending = Some(keyword);
                    sleep.as_mut().reset(Instant::now() + delay);
                }
                None => {
                    if let Some(keyword) = pending.take() {
                        manager.set_keyword(keyword);
                    }
                    break;
                }
            },
            _ = &mut sleep, if pending.is_some() => {
                if let Some(keyword) = pending.take() {
                    debug!(keyword = %keyword, "applying search keyword");
                    manager.set_keyword(keyword);
                }
            }
        }
    }
}
