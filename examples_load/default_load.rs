use std::sync::Arc;
use std::time::Instant;
use tokio::time::Duration;

use gelf_log_sink::console::ConsoleSink;
use gelf_log_sink::dispatcher::Dispatcher;
use gelf_log_sink::noop_sink::NoopSink;
use gelf_log_sink::sink::LogSink;
use gelf_log_sink::{Level, LogRecordFields, Logger};

/// Console that discards lines, so the numbers measure record building,
/// serialization and queueing only.
struct NullConsole;

impl ConsoleSink for NullConsole {
    fn emit(&self, _level: Level, _line: &str) {}
}

#[tokio::main]
async fn main() {
    let sinks: Vec<Arc<dyn LogSink>> = vec![Arc::new(NoopSink)];
    let dispatcher = Dispatcher::new(sinks, 50_000, Duration::from_secs(1));
    let logger = Logger::new("load-test")
        .with_console(Arc::new(NullConsole))
        .with_dispatcher(dispatcher);
    let stats = logger.dispatch_stats();

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        let fields = LogRecordFields {
            param_a: Some(i.to_string()),
            ..Default::default()
        };
        logger.log("ERROR", "default load test error", fields);
    }

    let elapsed = start.elapsed();
    println!("default config: logged {} records in {:?} (~{:.0} rec/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );

    logger.shutdown().await;
    if let Some(stats) = stats {
        println!("{:?}", stats.snapshot());
    }
}
