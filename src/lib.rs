//! # Rust Context Logger
//!
//! Contextual structured logging. A [`LoggingContext`] carries a logger,
//! its severity controller and the error key down a call chain; derived
//! contexts accumulate fields without touching their parents, and every
//! record written through them carries the accumulated fields.
//!
//! ## Features
//!
//! - **Immutable contexts**: `with_field`/`with_fields` return new contexts
//! - **Shared level control**: `set_level` on any context of a lineage
//!   affects all of them
//! - **Hooks**: callbacks see each record with its complete field set; a
//!   failing hook never blocks the write
//! - **Lazy emission**: options and macro formatting are skipped for
//!   disabled severities
//!
//! ```
//! use rust_context_logger::prelude::*;
//!
//! let root = ContextBuilder::new()
//!     .level(LogLevel::Debug)
//!     .json_encoding()
//!     .output_to_stdout()
//!     .build(None);
//!
//! let request = root.with_fields([("request_id", "r-17"), ("route", "/users")]);
//! info(&request, "handled", [LogOption::field("status", 200)]);
//! ```

pub mod appenders;
pub mod core;
pub mod facade;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, ObserverAppender};
    pub use crate::core::{
        copy_context, Appender, ContextBuilder, ContextConfig, Destination, Encoding, Field,
        FieldValue, Hook, LogEntry, LogLevel, LogOption, LoggerError, LoggingContext, Result,
        TimestampFormat,
    };
    pub use crate::facade::{
        debug, debug_enabled, enabled, error, error_enabled, flush, info, info_enabled, log,
        panic, panic_enabled, warn, warn_enabled,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, ObserverAppender};
pub use core::{
    copy_context, parse_level, Appender, ContextBuilder, ContextConfig, Destination, EncoderConfig,
    Encoding, Field, FieldValue, Hook, LevelController, LogEntry, LogLevel, LogOption, Logger,
    LoggerError, LoggerMetrics, LoggingContext, Result, TimestampFormat, DEFAULT_ERROR_KEY,
    DEFAULT_LEVEL, DEFAULT_LEVEL_KEY, DEFAULT_MESSAGE_KEY, DEFAULT_TIME_KEY,
};
pub use facade::{
    debug, debug_enabled, enabled, error, error_enabled, flush, info, info_enabled, log, panic,
    panic_enabled, warn, warn_enabled,
};
