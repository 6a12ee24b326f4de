use std::sync::Arc;

use crate::config::CollectorConfig;
use crate::error::DsnError;
use crate::gelf::{TcpSink, UdpSink, DEFAULT_GELF_PORT};
use crate::sink::LogSink;

/// Transport selection inferred from a collector URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Both,
    Udp,
    Tcp,
}

/// Parse a collector URL and infer the transports from its scheme.
///
/// Examples:
/// - "gelf://graylog.internal:12201" (UDP and TCP)
/// - "gelf+udp://10.0.0.5:12201"
/// - "gelf+tcp://[::1]:12201"
///
/// The port defaults to 12201 when omitted.
pub fn parse_collector_url(url: &str) -> Result<CollectorConfig, DsnError> {
    let url = url.trim();
    let (scheme, rest) = url.split_once("://").ok_or(DsnError::UnknownScheme)?;

    let kind = match scheme.to_ascii_lowercase().as_str() {
        "gelf" => TransportKind::Both,
        "gelf+udp" => TransportKind::Udp,
        "gelf+tcp" => TransportKind::Tcp,
        _ => return Err(DsnError::UnknownScheme),
    };

    let authority = rest.split('/').next().unwrap_or("");
    let (host, port) = split_host_port(authority)?;
    if host.is_empty() {
        return Err(DsnError::MissingHost);
    }

    let mut config = CollectorConfig::new(host, port);
    config.udp = kind != TransportKind::Tcp;
    config.tcp = kind != TransportKind::Udp;
    Ok(config)
}

fn split_host_port(authority: &str) -> Result<(&str, u16), DsnError> {
    // Bracketed IPv6 literals keep their brackets so "host:port" stays valid.
    let (host, port) = if authority.starts_with('[') {
        let end = authority.find(']').ok_or(DsnError::MissingHost)?;
        if end == 1 {
            return Err(DsnError::MissingHost);
        }
        let rest = &authority[end + 1..];
        let port = match rest.strip_prefix(':') {
            Some(p) => Some(p),
            None if rest.is_empty() => None,
            None => return Err(DsnError::InvalidPort(rest.to_string())),
        };
        (&authority[..=end], port)
    } else {
        match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        }
    };

    // An unbracketed host with a colon is a bare IPv6 literal or garbage.
    if !host.starts_with('[') && host.contains(':') {
        return Err(DsnError::MissingHost);
    }

    let port = match port {
        Some(p) => p.parse().map_err(|_| DsnError::InvalidPort(p.to_string()))?,
        None => DEFAULT_GELF_PORT,
    };
    Ok((host, port))
}

/// Create the transport sinks enabled in a [`CollectorConfig`], UDP first.
pub fn make_sinks(cfg: &CollectorConfig) -> Vec<Arc<dyn LogSink>> {
    let mut sinks: Vec<Arc<dyn LogSink>> = Vec::with_capacity(2);
    if cfg.udp {
        sinks.push(Arc::new(UdpSink::new(&cfg.host, cfg.port)));
    }
    if cfg.tcp {
        sinks.push(Arc::new(TcpSink::new(&cfg.host, cfg.port)));
    }
    sinks
}
