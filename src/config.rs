use tokio::time::Duration;

use crate::backend::parse_collector_url;
use crate::env::{
    env_or, GELF_APPLICATION_NAME_ENV, GELF_ATTEMPT_TIMEOUT_MS_ENV, GELF_COLLECTOR_HOST_ENV,
    GELF_COLLECTOR_PORT_ENV, GELF_COLLECTOR_URL_ENV,
};
use crate::error::ConfigError;
use crate::gelf::DEFAULT_GELF_PORT;

/// Where and how records are forwarded.
///
/// **Fields**
/// - `host`, `port`: collector address shared by both transports.
/// - `udp`, `tcp`: which transports receive a copy of each record.
/// - `channel_buffer`: records queued before new ones are dropped.
/// - `attempt_timeout`: upper bound for a single UDP or TCP attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectorConfig {
    pub host: String,
    pub port: u16,
    pub udp: bool,
    pub tcp: bool,
    pub channel_buffer: usize,
    pub attempt_timeout: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_GELF_PORT,
            udp: true,
            tcp: true,
            channel_buffer: 1024,
            attempt_timeout: Duration::from_secs(5),
        }
    }
}

impl CollectorConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build a config from `GELF_*` environment variables.
    ///
    /// `GELF_COLLECTOR_URL` wins when set; otherwise host and port are read
    /// separately with defaults from [`CollectorConfig::default`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(GELF_COLLECTOR_URL_ENV) {
            Ok(url) => parse_collector_url(&url)?,
            Err(_) => {
                let defaults = Self::default();
                let host = env_or(GELF_COLLECTOR_HOST_ENV, &defaults.host);
                let port = parse_var(GELF_COLLECTOR_PORT_ENV, defaults.port)?;
                Self::new(host, port)
            }
        };

        let default_ms = config.attempt_timeout.as_millis() as u64;
        let timeout_ms = parse_var(GELF_ATTEMPT_TIMEOUT_MS_ENV, default_ms)?;
        config.attempt_timeout = Duration::from_millis(timeout_ms);
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(default),
    }
}

/// Configuration for [`crate::init::init_logger`].
///
/// **Fields**
/// - `application_name`: value of the `appname` field.
/// - `collector`: remote forwarding target; `None` logs locally only.
/// - `enable_stdout`: install a global `fmt` subscriber writing to stdout.
/// - `json_stdout`: use the JSON formatter for that subscriber.
#[derive(Clone, Debug)]
pub struct LoggerConfig {
    pub application_name: String,
    pub collector: Option<CollectorConfig>,
    pub enable_stdout: bool,
    pub json_stdout: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            application_name: env_or(GELF_APPLICATION_NAME_ENV, "unknown"),
            collector: Some(CollectorConfig::default()),
            enable_stdout: true,
            json_stdout: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_defaults() {
        let config = CollectorConfig::default();
        assert_eq!(config.address(), "127.0.0.1:12201");
        assert!(config.udp && config.tcp);
        assert_eq!(config.channel_buffer, 1024);
        assert_eq!(config.attempt_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_collector_new_keeps_defaults() {
        let config = CollectorConfig::new("graylog.internal", 5555);
        assert_eq!(config.address(), "graylog.internal:5555");
        assert_eq!(config.channel_buffer, 1024);
    }

    #[test]
    fn test_from_env() {
        // Only this test touches GELF_* variables.
        std::env::remove_var(GELF_COLLECTOR_URL_ENV);
        std::env::set_var(GELF_COLLECTOR_HOST_ENV, "10.9.8.7");
        std::env::set_var(GELF_COLLECTOR_PORT_ENV, "1514");
        std::env::set_var(GELF_ATTEMPT_TIMEOUT_MS_ENV, "250");

        let config = CollectorConfig::from_env().unwrap();
        assert_eq!(config.address(), "10.9.8.7:1514");
        assert_eq!(config.attempt_timeout, Duration::from_millis(250));

        std::env::set_var(GELF_COLLECTOR_URL_ENV, "gelf+tcp://graylog.internal:12202");
        let config = CollectorConfig::from_env().unwrap();
        assert_eq!(config.address(), "graylog.internal:12202");
        assert!(!config.udp && config.tcp);

        std::env::remove_var(GELF_COLLECTOR_URL_ENV);
        std::env::set_var(GELF_COLLECTOR_PORT_ENV, "not-a-port");
        assert!(matches!(
            CollectorConfig::from_env(),
            Err(ConfigError::InvalidValue { key: GELF_COLLECTOR_PORT_ENV, .. })
        ));

        std::env::remove_var(GELF_COLLECTOR_HOST_ENV);
        std::env::remove_var(GELF_COLLECTOR_PORT_ENV);
        std::env::remove_var(GELF_ATTEMPT_TIMEOUT_MS_ENV);
    }
}
