use std::io;
use std::time::Duration;

/// Error returned by a [`crate::sink::LogSink`] when a delivery attempt fails.
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("failed to resolve {addr}: {source}")]
    Resolve { addr: String, source: io::Error },

    #[error("no address found for {0}")]
    NoAddress(String),

    #[error("failed to connect to {addr}: {source}")]
    Connect { addr: String, source: io::Error },

    #[error("failed to write to {addr}: {source}")]
    Write { addr: String, source: io::Error },

    #[error("short datagram to {addr}: sent {sent} of {len} bytes")]
    ShortWrite { addr: String, sent: usize, len: usize },

    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),
}

/// Error type returned when parsing a collector URL.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DsnError {
    #[error("unknown or unsupported collector URL scheme")]
    UnknownScheme,

    #[error("collector URL has no host")]
    MissingHost,

    #[error("invalid collector port: {0}")]
    InvalidPort(String),
}

/// Error type returned when loading configuration from the environment.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid collector URL: {0}")]
    Dsn(#[from] DsnError),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Error type returned by the global initialization helpers.
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("failed to install global subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
}
