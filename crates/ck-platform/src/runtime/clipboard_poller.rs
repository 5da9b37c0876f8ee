//! Clipboard poller runtime module
//!
//! Samples the pasteboard change counter on a fixed interval and hands any
//! new payload to a [`ClipboardChangeHandler`].
//!
//! ```text
//! tick ─▶ change_count ─▶ changed? ─▶ read_content ─▶ handler
//!                            │ no
//!                            ▼
//!                          (idle)
//! ```
//!
//! The observed counter is shared with the clipboard writer: a write made by
//! the app records its own counter, so the next tick sees no change and the
//! item is not captured a second time. Sampling and the writer's
//! write-then-record both run under the counter's gate, so a tick never
//! observes a write whose counter is not yet recorded.
//!
//! Every failure in a cycle is logged and the loop moves on. The counter is
//! updated before the content is read, so a payload that failed to read is
//! not retried on the next tick.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use ck_core::ports::{ClipboardChangeHandler, SystemClipboardPort};
use ck_core::{ChangeCount, ObservedChangeCount, PasteboardContent};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

enum Sample {
    Unchanged,
    Changed(ChangeCount, Result<PasteboardContent>),
}

/// Result of a single polling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Counter unchanged since the last cycle.
    Unchanged,
    /// Counter changed but the pasteboard held nothing usable.
    NoContent,
    /// A payload was handed to the handler.
    Delivered,
    /// Something failed; already logged.
    Failed,
}

pub struct ClipboardPoller {
    clipboard: Arc<dyn SystemClipboardPort>,
    observed: Arc<ObservedChangeCount>,
    handler: Arc<dyn ClipboardChangeHandler>,
    interval: Duration,
}

impl ClipboardPoller {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        observed: Arc<ObservedChangeCount>,
        handler: Arc<dyn ClipboardChangeHandler>,
        interval: Duration,
    ) -> Self {
        Self {
            clipboard,
            observed,
            handler,
            interval,
        }
    }

    /// Runs one cycle.
    pub async fn poll_once(&self) -> PollOutcome {
        let content = match self.sample().await {
            Ok(Sample::Unchanged) => return PollOutcome::Unchanged,
            Ok(Sample::Changed(count, Ok(content))) => {
                debug!(change_count = count.value(), "clipboard changed");
                content
            }
            Ok(Sample::Changed(count, Err(err))) => {
                warn!(change_count = count.value(), error = %err, "reading clipboard content failed");
                return PollOutcome::Failed;
            }
            Err(err) => {
                warn!(error = %err, "sampling clipboard change count failed");
                return PollOutcome::Failed;
            }
        };

        if content.is_empty() {
            debug!("clipboard changed without text or image payload");
            return PollOutcome::NoContent;
        }

        match self.handler.on_clipboard_changed(content).await {
            Ok(()) => PollOutcome::Delivered,
            Err(err) => {
                warn!(error = %err, "clipboard change handler failed");
                PollOutcome::Failed
            }
        }
    }

    /// Polls until `shutdown` is cancelled.
    pub async fn run(self: Arc<Self>, shutdown: CancellationToken) {
        info!(interval_ms = self.interval.as_millis() as u64, "clipboard poller started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
            }
        }

        info!("clipboard poller stopped");
    }

    pub fn spawn(self: Arc<Self>, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(
            self.run(shutdown)
                .instrument(info_span!("runtime.clipboard_poller")),
        )
    }

    /// Samples, observes and reads in one gated section, so a write by the
    /// app cannot slip in between.
    async fn sample(&self) -> Result<Sample> {
        let clipboard = Arc::clone(&self.clipboard);
        let observed = Arc::clone(&self.observed);
        tokio::task::spawn_blocking(move || {
            observed.exclusive(|| -> Result<Sample> {
                let count = clipboard.change_count()?;
                if !observed.observe(count) {
                    return Ok(Sample::Unchanged);
                }
                Ok(Sample::Changed(count, clipboard.read_content()))
            })
        })
        .await
        .context("clipboard sample task panicked")?
    }
}
