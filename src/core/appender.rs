//! Appender trait for log output destinations
//!
//! An appender is the terminal sink of a writer chain. It receives the
//! record metadata together with the complete field sequence of the record
//! (accumulated context fields first, call-site fields after).

use super::{error::Result, field::Field, log_entry::LogEntry};

pub trait Appender: Send {
    fn append(&mut self, entry: &LogEntry, fields: &[Field]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
