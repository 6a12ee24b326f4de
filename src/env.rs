/// Environment variable names used by this crate for convenient
/// configuration of the logger from services.
///
/// These are purely helpers; the sink and dispatcher types remain
/// decoupled from environment access.

/// Full collector URL, e.g. `gelf://graylog.internal:12201`. Takes
/// precedence over host and port.
pub const GELF_COLLECTOR_URL_ENV: &str = "GELF_COLLECTOR_URL";

/// Collector host name or IP address.
pub const GELF_COLLECTOR_HOST_ENV: &str = "GELF_COLLECTOR_HOST";

/// Collector port.
pub const GELF_COLLECTOR_PORT_ENV: &str = "GELF_COLLECTOR_PORT";

/// Per-attempt delivery timeout in milliseconds.
pub const GELF_ATTEMPT_TIMEOUT_MS_ENV: &str = "GELF_ATTEMPT_TIMEOUT_MS";

/// Value of the `appname` field.
pub const GELF_APPLICATION_NAME_ENV: &str = "GELF_APPLICATION_NAME";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
