use std::sync::Arc;

use async_trait::async_trait;
use gelf_log_sink::{
    dispatcher::Dispatcher,
    error::SinkError,
    init::init_console,
    sink::LogSink,
    LogRecordFields, Logger,
};
use tokio::time::Duration;

/// Example of integrating a completely custom collector by implementing
/// the `LogSink` trait directly.
struct StderrSink;

#[async_trait]
impl LogSink for StderrSink {
    fn name(&self) -> &str {
        "stderr"
    }

    async fn send(&self, payload: &[u8]) -> Result<(), SinkError> {
        eprintln!("[custom-collector] {}", String::from_utf8_lossy(payload));
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    init_console(false).expect("init console");

    let sinks: Vec<Arc<dyn LogSink>> = vec![Arc::new(StderrSink)];
    let dispatcher = Dispatcher::new(sinks, 128, Duration::from_secs(1));
    let logger = Logger::new("custom-sink-example").with_dispatcher(dispatcher);

    logger.log("INFO", "custom collector example started", LogRecordFields::default());
    logger.log("WARN", "simulated warning sent via custom collector", LogRecordFields::default());

    logger.shutdown().await;
}
