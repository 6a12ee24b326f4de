use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

use crate::mask::mask;

/// Severity of a [`LogRecord`].
///
/// Only `INFO`, `ERROR` and `DEBUG` are recognized by name; every other
/// label (including lowercase spellings and the empty string) is `WARN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Error,
    Debug,
    Warn,
}

impl Level {
    pub fn from_label(label: &str) -> Self {
        match label {
            "INFO" => Level::Info,
            "ERROR" => Level::Error,
            "DEBUG" => Level::Debug,
            _ => Level::Warn,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Error => "ERROR",
            Level::Debug => "DEBUG",
            Level::Warn => "WARN",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional domain fields supplied by the caller of [`crate::logger::Logger::log`].
///
/// Every field is copied verbatim into the record. Empty values are
/// omitted from the serialized output, the same as absent ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogRecordFields {
    #[serde(skip_serializing_if = "is_blank")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub hostname: Option<String>,
    #[serde(rename = "tr_id", skip_serializing_if = "is_blank")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub bank_code: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub rrn: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub publish_id: Option<String>,
    #[serde(rename = "cf_trid", skip_serializing_if = "is_blank")]
    pub cf_transaction_id: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub device_info: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub param_a: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub param_b: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub param_c: Option<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// A complete structured record, ready to be serialized once and dropped.
///
/// `message` always holds the masked form; the raw message never reaches
/// this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    #[serde(serialize_with = "serialize_timestamp")]
    timestamp: DateTime<Utc>,
    level: Level,
    message: String,
    #[serde(rename = "appname")]
    application_name: String,
    #[serde(flatten)]
    fields: LogRecordFields,
}

fn serialize_timestamp<S: Serializer>(
    ts: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

/// RFC 3339, UTC, second precision with a `Z` suffix.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl LogRecord {
    pub fn timestamp(&self) -> String {
        format_timestamp(&self.timestamp)
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    pub fn fields(&self) -> &LogRecordFields {
        &self.fields
    }

    /// Serialize the record into the JSON wire payload.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// [`Clock`] backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Builds [`LogRecord`]s for a single application.
#[derive(Clone)]
pub struct RecordBuilder {
    application_name: String,
    clock: Arc<dyn Clock>,
}

impl RecordBuilder {
    pub fn new(application_name: impl Into<String>) -> Self {
        Self::with_clock(application_name, Arc::new(SystemClock))
    }

    pub fn with_clock(application_name: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        RecordBuilder {
            application_name: application_name.into(),
            clock,
        }
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// Assemble a record from the caller's input.
    ///
    /// **Parameters**
    /// - `level`: severity of the record.
    /// - `raw_message`: unmasked message; only its masked form is kept.
    /// - `fields`: optional domain fields, copied as-is.
    ///
    /// The timestamp is taken from the builder's clock at call time.
    pub fn build(&self, level: Level, raw_message: &str, fields: LogRecordFields) -> LogRecord {
        LogRecord {
            timestamp: self.clock.now(),
            level,
            message: mask(raw_message),
            application_name: self.application_name.clone(),
            fields,
        }
    }
}
