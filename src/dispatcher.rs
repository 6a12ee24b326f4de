use crate::error::SinkError;
use crate::sink::LogSink;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{timeout, Duration};

/// Counters shared between a [`Dispatcher`] and its background task.
///
/// Only the dispatcher updates them; read them through [`DispatchStats::snapshot`].
#[derive(Debug, Default)]
pub struct DispatchStats {
    /// Payloads accepted into the queue.
    enqueued: AtomicU64,
    /// Payloads dropped because the queue was full or closed.
    dropped: AtomicU64,
    /// Successful sink attempts.
    delivered: AtomicU64,
    /// Failed or timed-out sink attempts.
    failed: AtomicU64,
}

/// Point-in-time copy of [`DispatchStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchSnapshot {
    pub enqueued: u64,
    pub dropped: u64,
    pub delivered: u64,
    pub failed: u64,
}

impl DispatchStats {
    pub fn snapshot(&self) -> DispatchSnapshot {
        DispatchSnapshot {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Forwards serialized records to a list of [`LogSink`]s off the caller's
/// thread.
///
/// Payloads go through a bounded channel to a single background task.
/// When the channel is full the newest payload is dropped, so a slow or
/// unreachable collector costs memory proportional to the buffer and
/// nothing more. Every sink gets one attempt per payload, in order, each
/// bounded by the attempt timeout.
pub struct Dispatcher {
    sender: mpsc::Sender<Vec<u8>>,
    stats: Arc<DispatchStats>,
    worker: JoinHandle<()>,
}

impl Dispatcher {
    /// Create a dispatcher and spawn its background task.
    ///
    /// Must be called from within a Tokio runtime. Minimal thresholds are
    /// enforced for `buffer` and `attempt_timeout` to avoid degenerate
    /// configurations.
    pub fn new(sinks: Vec<Arc<dyn LogSink>>, buffer: usize, attempt_timeout: Duration) -> Self {
        let buffer = buffer.max(16);
        let attempt_timeout = attempt_timeout.max(Duration::from_millis(10));

        let (tx, mut rx) = mpsc::channel::<Vec<u8>>(buffer);
        let stats = Arc::new(DispatchStats::default());
        let stats_bg = Arc::clone(&stats);

        let worker = tokio::spawn(async move {
            while let Some(payload) = rx.recv().await {
                for sink in &sinks {
                    match attempt(sink.as_ref(), &payload, attempt_timeout).await {
                        Ok(()) => {
                            stats_bg.delivered.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(e) => {
                            stats_bg.failed.fetch_add(1, Ordering::Relaxed);
                            tracing::warn!(
                                sink = sink.name(),
                                error = %e,
                                "failed to forward log record"
                            );
                        }
                    }
                }
            }
        });

        Dispatcher {
            sender: tx,
            stats,
            worker,
        }
    }

    /// Queue a payload for delivery without waiting.
    pub fn forward(&self, payload: Vec<u8>) {
        match self.sender.try_send(payload) {
            Ok(()) => {
                self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
            }
            Err(TrySendError::Full(_)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("forward queue full, dropping log record");
            }
            Err(TrySendError::Closed(_)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("forward queue closed, dropping log record");
            }
        }
    }

    pub fn stats(&self) -> Arc<DispatchStats> {
        Arc::clone(&self.stats)
    }

    /// Stop accepting payloads and wait for the queued ones to be attempted.
    pub async fn close(self) {
        drop(self.sender);
        if let Err(e) = self.worker.await {
            tracing::error!(error = %e, "log dispatcher task failed");
        }
    }
}

async fn attempt(sink: &dyn LogSink, payload: &[u8], limit: Duration) -> Result<(), SinkError> {
    match timeout(limit, sink.send(payload)).await {
        Ok(result) => result,
        Err(_) => Err(SinkError::Timeout(limit)),
    }
}
