use crate::error::SinkError;
use crate::sink::LogSink;
use async_trait::async_trait;

/// A sink that simply drops all payloads.
///
/// Useful for measuring the overhead of the logger and dispatcher without
/// any network I/O, and for tests that don't care about delivery.
#[derive(Clone, Default)]
pub struct NoopSink;

#[async_trait]
impl LogSink for NoopSink {
    fn name(&self) -> &str {
        "noop"
    }

    async fn send(&self, _payload: &[u8]) -> Result<(), SinkError> {
        Ok(())
    }
}
