//! In-memory appender for asserting on emitted records
//!
//! ```
//! use rust_context_logger::prelude::*;
//! use rust_context_logger::appenders::ObserverAppender;
//!
//! let (appender, logs) = ObserverAppender::new();
//! let ctx = ContextBuilder::new().appender(appender).build(None);
//!
//! info(&ctx.with_field("user", "alice"), "signed in", []);
//!
//! let records = logs.all();
//! assert_eq!(records[0].entry.message, "signed in");
//! assert_eq!(records[0].field("user"), Some(&FieldValue::from("alice")));
//! ```

use crate::core::{find_field, Appender, Field, FieldValue, LogEntry, LogLevel, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// One record as it reached the sink
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedRecord {
    pub entry: LogEntry,
    pub fields: Vec<Field>,
}

impl ObservedRecord {
    /// Value recorded last under `key`
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        find_field(&self.fields, key)
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.key.as_str()).collect()
    }
}

/// Shared view of everything an `ObserverAppender` received
#[derive(Debug, Clone, Default)]
pub struct ObservedLogs {
    records: Arc<Mutex<Vec<ObservedRecord>>>,
}

impl ObservedLogs {
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Snapshot of all records, oldest first
    pub fn all(&self) -> Vec<ObservedRecord> {
        self.records.lock().clone()
    }

    /// Remove and return all records
    pub fn take_all(&self) -> Vec<ObservedRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|r| r.entry.message.clone())
            .collect()
    }

    pub fn filter_level(&self, level: LogLevel) -> Vec<ObservedRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.entry.level == level)
            .cloned()
            .collect()
    }

    pub fn filter_message(&self, message: &str) -> Vec<ObservedRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.entry.message == message)
            .cloned()
            .collect()
    }
}

pub struct ObserverAppender {
    logs: ObservedLogs,
}

impl ObserverAppender {
    /// Create an appender and the handle used to read what it receives
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (Self, ObservedLogs) {
        let logs = ObservedLogs::default();
        (Self { logs: logs.clone() }, logs)
    }
}

impl Appender for ObserverAppender {
    fn append(&mut self, entry: &LogEntry, fields: &[Field]) -> Result<()> {
        self.logs.records.lock().push(ObservedRecord {
            entry: entry.clone(),
            fields: fields.to_vec(),
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "observer"
    }
}
