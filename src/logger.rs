use std::sync::Arc;

use crate::console::{ConsoleSink, TracingConsole};
use crate::dispatcher::{DispatchStats, Dispatcher};
use crate::record::{Clock, Level, LogRecordFields, RecordBuilder};

/// Structured logger for one application.
///
/// Each [`Logger::log`] call builds a masked [`crate::record::LogRecord`],
/// serializes it once, writes it to the console sink synchronously and,
/// when a [`Dispatcher`] is attached, queues the same bytes for the remote
/// collector. The call never waits on the network and never fails.
pub struct Logger {
    builder: RecordBuilder,
    console: Arc<dyn ConsoleSink>,
    dispatcher: Option<Dispatcher>,
}

impl Logger {
    /// Console-only logger writing through [`TracingConsole`].
    pub fn new(application_name: impl Into<String>) -> Self {
        Logger {
            builder: RecordBuilder::new(application_name),
            console: Arc::new(TracingConsole),
            dispatcher: None,
        }
    }

    /// Attach remote forwarding.
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn with_console(mut self, console: Arc<dyn ConsoleSink>) -> Self {
        self.console = console;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        let application_name = self.builder.application_name().to_string();
        self.builder = RecordBuilder::with_clock(application_name, clock);
        self
    }

    pub fn application_name(&self) -> &str {
        self.builder.application_name()
    }

    /// Forwarding counters, if remote forwarding is attached.
    pub fn dispatch_stats(&self) -> Option<Arc<DispatchStats>> {
        self.dispatcher.as_ref().map(Dispatcher::stats)
    }

    /// Log a message.
    ///
    /// **Parameters**
    /// - `level`: `"INFO"`, `"ERROR"` or `"DEBUG"`; anything else is `WARN`.
    /// - `message`: raw message. Only the masked form is recorded.
    /// - `fields`: optional domain fields.
    pub fn log(&self, level: &str, message: &str, fields: LogRecordFields) {
        self.log_at(Level::from_label(level), message, fields);
    }

    pub fn log_at(&self, level: Level, message: &str, fields: LogRecordFields) {
        let record = self.builder.build(level, message, fields);

        let payload = match record.to_json() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize log record, skipping");
                return;
            }
        };

        self.console.emit(level, &String::from_utf8_lossy(&payload));

        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.forward(payload);
        }
    }

    pub fn info(&self, message: &str, fields: LogRecordFields) {
        self.log_at(Level::Info, message, fields);
    }

    pub fn error(&self, message: &str, fields: LogRecordFields) {
        self.log_at(Level::Error, message, fields);
    }

    pub fn debug(&self, message: &str, fields: LogRecordFields) {
        self.log_at(Level::Debug, message, fields);
    }

    pub fn warn(&self, message: &str, fields: LogRecordFields) {
        self.log_at(Level::Warn, message, fields);
    }

    /// Wait for queued records to be forwarded, then drop the logger.
    pub async fn shutdown(self) {
        if let Some(dispatcher) = self.dispatcher {
            dispatcher.close().await;
        }
    }
}
