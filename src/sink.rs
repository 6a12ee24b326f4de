use crate::error::SinkError;
use async_trait::async_trait;

/// Asynchronous destination for serialized log records.
///
/// Implementations move a JSON payload to a concrete collector (GELF over
/// UDP or TCP, or anything custom). The [`crate::dispatcher::Dispatcher`]
/// calls `send` from its background task and never from the thread that
/// issued the log call.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Short name used in diagnostics, e.g. `"udp"`.
    fn name(&self) -> &str;

    /// Deliver a single serialized record.
    ///
    /// **Parameters**
    /// - `payload`: JSON bytes of one [`crate::record::LogRecord`], without
    ///   any framing. Sinks add whatever framing their protocol requires.
    ///
    /// **Returns**
    /// - `Ok(())` if the payload was handed to the transport.
    /// - `Err(..)` on resolution, connect or write failure. The dispatcher
    ///   logs the error and moves on; there is no retry.
    async fn send(&self, payload: &[u8]) -> Result<(), SinkError>;
}
