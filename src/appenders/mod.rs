//! Appender implementations

pub mod console;
pub mod file;
pub mod observer;

pub use console::{ConsoleAppender, ConsoleStream};
pub use file::FileAppender;
pub use observer::{ObservedLogs, ObservedRecord, ObserverAppender};

// Re-export trait for convenience
pub use crate::core::Appender;
