use crate::record::Level;

/// Target used for records written through [`TracingConsole`].
pub const RECORD_TARGET: &str = "gelf_log_sink::record";

/// Local, synchronous destination for serialized records.
///
/// Failures of the local sink are the implementation's own concern;
/// `emit` has nothing to report back to the logger.
pub trait ConsoleSink: Send + Sync {
    fn emit(&self, level: Level, line: &str);
}

/// [`ConsoleSink`] that writes through `tracing` at the matching level.
///
/// Whatever subscriber is installed decides the final format; see
/// [`crate::init::init_console`] for the stdout JSON setup.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConsole;

impl ConsoleSink for TracingConsole {
    fn emit(&self, level: Level, line: &str) {
        match level {
            Level::Info => tracing::info!(target: RECORD_TARGET, "{}", line),
            Level::Error => tracing::error!(target: RECORD_TARGET, "{}", line),
            Level::Debug => tracing::debug!(target: RECORD_TARGET, "{}", line),
            Level::Warn => tracing::warn!(target: RECORD_TARGET, "{}", line),
        }
    }
}
