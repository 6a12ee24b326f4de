use crate::backend::make_sinks;
use crate::config::{CollectorConfig, LoggerConfig};
use crate::dispatcher::Dispatcher;
use crate::error::InitError;
use crate::logger::Logger;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Filter used when `RUST_LOG` is not set. DEBUG records must stay visible.
const DEFAULT_FILTER: &str = "debug";

/// Install a global `tracing` subscriber that prints to stdout.
///
/// **Parameters**
/// - `json`: when `true`, events are formatted as JSON objects, otherwise
///   with the human-readable `fmt` formatter.
///
/// The level filter comes from `RUST_LOG` and defaults to `debug`.
pub fn init_console(json: bool) -> Result<(), InitError> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => EnvFilter::try_new(directives)?,
        Err(_) => EnvFilter::try_new(DEFAULT_FILTER)?,
    };

    // The two fmt layers have different types, so the subscriber is
    // assembled once per variant.
    if json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stdout);
        let subscriber = Registry::default().with(filter).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);
        let subscriber = Registry::default().with(filter).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}

/// Build a [`Dispatcher`] with the transports enabled in `config`.
///
/// Must be called from within a Tokio runtime.
pub fn make_dispatcher(config: &CollectorConfig) -> Dispatcher {
    Dispatcher::new(make_sinks(config), config.channel_buffer, config.attempt_timeout)
}

/// Initialize console output and return a ready [`Logger`].
///
/// **Parameters**
/// - `config`: [`LoggerConfig`] naming the application and the optional
///   collector.
///
/// **Effects**
///
/// When `enable_stdout` is set this installs the global subscriber via
/// [`init_console`]; calling it twice in one process returns an error.
/// When a collector is configured the dispatcher task is spawned on the
/// current Tokio runtime.
pub fn init_logger(config: LoggerConfig) -> Result<Logger, InitError> {
    if config.enable_stdout {
        init_console(config.json_stdout)?;
    }

    let logger = Logger::new(config.application_name);
    Ok(match &config.collector {
        Some(collector) => logger.with_dispatcher(make_dispatcher(collector)),
        None => logger,
    })
}
