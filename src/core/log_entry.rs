//! Record metadata handed to hooks and appenders

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata of one emitted record.
///
/// Fields are carried separately so that each layer of the writer chain
/// can decide which of them it sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Record stamped with the current time; the message is kept verbatim
    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            level,
            message: message.as_ref().to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_kept_verbatim() {
        let entry = LogEntry::new(LogLevel::Info, "line one\nsecond\tcolumn");
        assert_eq!(entry.message, "line one\nsecond\tcolumn");
    }

    #[test]
    fn test_with_timestamp() {
        let ts = DateTime::parse_from_rfc3339("2025-01-08T10:30:45Z")
            .unwrap()
            .with_timezone(&Utc);
        let entry = LogEntry::new(LogLevel::Warn, "m").with_timestamp(ts);
        assert_eq!(entry.timestamp, ts);
    }
}
