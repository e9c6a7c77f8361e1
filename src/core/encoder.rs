//! Line encoding for log records
//!
//! Provides the two encodings a context can be configured with:
//! - Console: tab separated, human-readable (default)
//! - Json: one machine-parseable object per line
//!
//! Key names for the message, level and timestamp are configurable; the
//! timestamp can be left out entirely.
//!
//! Console lines escape `\n`, `\r` and `\t` in the message so a record
//! can never span or forge lines. JSON relies on string escaping instead.
//! In JSON, a field whose key collides with a header key is written as
//! `fields.<key>` and the header keeps its value.

use super::field::{resolve_last_wins, Field};
use super::log_entry::LogEntry;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Write as _;

/// Prefix given to fields that collide with a header key in JSON
const COLLISION_PREFIX: &str = "fields.";

pub const DEFAULT_MESSAGE_KEY: &str = "msg";
pub const DEFAULT_LEVEL_KEY: &str = "severity";
pub const DEFAULT_ERROR_KEY: &str = "error";
pub const DEFAULT_TIME_KEY: &str = "time";

/// Output encoding for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// `2025-01-08T10:30:45Z	INFO	Request processed	{"user":"alice"}`
    #[default]
    Console,

    /// `{"time":"2025-01-08T10:30:45Z","severity":"INFO","msg":"Request processed","user":"alice"}`
    Json,
}

/// Timestamp rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45Z`
    #[default]
    Rfc3339,

    /// `2025-01-08T10:30:45.123Z`
    Rfc3339Millis,

    /// `1736332245123`, rendered as a number in JSON
    UnixMillis,
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimestampFormat::Rfc3339Millis => {
                datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
            }
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
        }
    }

    fn to_json_value(self, datetime: &DateTime<Utc>) -> serde_json::Value {
        match self {
            TimestampFormat::UnixMillis => {
                serde_json::Value::Number(datetime.timestamp_millis().into())
            }
            _ => serde_json::Value::String(self.format(datetime)),
        }
    }
}

/// Everything needed to turn a record into one output line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    pub encoding: Encoding,
    pub message_key: String,
    pub level_key: String,
    /// `None` omits timestamps
    pub time_key: Option<String>,
    pub timestamp_format: TimestampFormat,
    pub colored_levels: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
            message_key: DEFAULT_MESSAGE_KEY.to_string(),
            level_key: DEFAULT_LEVEL_KEY.to_string(),
            time_key: Some(DEFAULT_TIME_KEY.to_string()),
            timestamp_format: TimestampFormat::default(),
            colored_levels: false,
        }
    }
}

impl EncoderConfig {
    /// Render one record, without the trailing newline
    pub fn encode(&self, entry: &LogEntry, fields: &[Field]) -> String {
        match self.encoding {
            Encoding::Console => self.encode_console(entry, fields),
            Encoding::Json => self.encode_json(entry, fields),
        }
    }

    fn encode_console(&self, entry: &LogEntry, fields: &[Field]) -> String {
        let mut line = String::new();

        if self.time_key.is_some() {
            line.push_str(&self.timestamp_format.format(&entry.timestamp));
            line.push('\t');
        }

        line.push_str(&self.level_text(entry));
        line.push('\t');
        line.push_str(&escape_console(&entry.message));

        if !fields.is_empty() {
            line.push('\t');
            write_json_object(
                &mut line,
                resolve_last_wins(fields)
                    .into_iter()
                    .map(|(k, v)| (k, v.to_json_value())),
            );
        }

        line
    }

    fn encode_json(&self, entry: &LogEntry, fields: &[Field]) -> String {
        let mut pairs: Vec<(Cow<'_, str>, serde_json::Value)> =
            Vec::with_capacity(fields.len() + 3);

        if let Some(ref time_key) = self.time_key {
            pairs.push((
                Cow::Borrowed(time_key.as_str()),
                self.timestamp_format.to_json_value(&entry.timestamp),
            ));
        }
        pairs.push((
            Cow::Borrowed(self.level_key.as_str()),
            serde_json::Value::String(entry.level.to_str().to_string()),
        ));
        pairs.push((
            Cow::Borrowed(self.message_key.as_str()),
            serde_json::Value::String(entry.message.clone()),
        ));
        let header_len = pairs.len();

        for (key, value) in resolve_last_wins(fields) {
            let key = if pairs[..header_len].iter().any(|(k, _)| k == key) {
                Cow::Owned(format!("{}{}", COLLISION_PREFIX, key))
            } else {
                Cow::Borrowed(key)
            };
            pairs.push((key, value.to_json_value()));
        }

        let mut line = String::new();
        write_json_object(&mut line, pairs.into_iter());
        line
    }

    #[cfg(feature = "console")]
    fn level_text(&self, entry: &LogEntry) -> String {
        use colored::Colorize;

        if self.colored_levels {
            entry
                .level
                .to_str()
                .color(entry.level.color_code())
                .to_string()
        } else {
            entry.level.to_str().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_text(&self, entry: &LogEntry) -> String {
        entry.level.to_str().to_string()
    }
}

/// Escape characters that would break a console line apart
fn escape_console(message: &str) -> Cow<'_, str> {
    if !message.contains(&['\n', '\r', '\t'][..]) {
        return Cow::Borrowed(message);
    }

    Cow::Owned(
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t"),
    )
}

/// Write pairs as a JSON object, keeping their order
fn write_json_object<K: AsRef<str>>(
    out: &mut String,
    pairs: impl Iterator<Item = (K, serde_json::Value)>,
) {
    out.push('{');
    for (idx, (key, value)) in pairs.enumerate() {
        if idx > 0 {
            out.push(',');
        }
        let _ = write!(
            out,
            "{}:{}",
            serde_json::Value::String(key.as_ref().to_string()),
            value
        );
    }
    out.push('}');
}
