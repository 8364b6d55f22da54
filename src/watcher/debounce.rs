//! Event coalescing for filesystem changes.
//!
//! Editors tend to emit several events per save (write temp, rename,
//! chmod). The debouncer collects the affected paths and hands them to a
//! [`BatchHandler`] once no new event has arrived for a full quiet period.
//!
//! ```text
//! IDLE ──event──▶ ACCUMULATING ──event (timer reset)──▶ ACCUMULATING
//!                      │
//!                 quiet period elapsed
//!                      ▼
//!                  FLUSHING ──handler done──▶ IDLE
//! ```

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Receives each flushed batch of distinct paths, in no guaranteed order.
pub trait BatchHandler: Send + Sync + 'static {
    fn handle(&self, batch: Vec<PathBuf>);
}

impl<F> BatchHandler for F
where
    F: Fn(Vec<PathBuf>) + Send + Sync + 'static,
{
    fn handle(&self, batch: Vec<PathBuf>) {
        self(batch)
    }
}

/// Handle to a running debounce task.
///
/// Cloning is cheap; the task exits (after flushing anything pending) once
/// every handle has been dropped.
#[derive(Debug, Clone)]
pub struct Debouncer {
    tx: mpsc::UnboundedSender<PathBuf>,
}

impl Debouncer {
    /// Spawn the coalescing task on the current Tokio runtime.
    pub fn spawn<H: BatchHandler>(quiet: Duration, handler: H) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(rx, quiet, Arc::new(handler)));
        (Self { tx }, task)
    }

    /// Record a change to `path` and restart the quiet period.
    ///
    /// Returns false if the debounce task is gone.
    pub fn add_event(&self, path: impl Into<PathBuf>) -> bool {
        self.tx.send(path.into()).is_ok()
    }
}

async fn run(mut rx: mpsc::UnboundedReceiver<PathBuf>, quiet: Duration, handler: Arc<dyn BatchHandler>) {
    let mut pending: HashSet<PathBuf> = HashSet::new();

    // IDLE: block until the first event of a burst.
    while let Some(first) = rx.recv().await {
        pending.insert(first);
        let mut deadline = Instant::now() + quiet;

        // ACCUMULATING: every event pushes the deadline out again.
        let closed = loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some(path) => {
                        pending.insert(path);
                        deadline = Instant::now() + quiet;
                    }
                    None => break true,
                },
                _ = sleep_until(deadline) => break false,
            }
        };

        flush(&mut pending, &handler).await;

        if closed {
            break;
        }
    }

    tracing::debug!("Debouncer stopped");
}

async fn flush(pending: &mut HashSet<PathBuf>, handler: &Arc<dyn BatchHandler>) {
    let batch: Vec<PathBuf> = pending.drain().collect();
    if batch.is_empty() {
        return;
    }

    tracing::debug!(files = batch.len(), "Flushing change batch");

    // Handlers do file I/O; keep it off the async workers and finish this
    // batch before the next window opens.
    let handler = handler.clone();
    if let Err(e) = tokio::task::spawn_blocking(move || handler.handle(batch)).await {
        tracing::error!(error = %e, "Change batch handler panicked");
    }
}
