//! Core context logger types and traits

pub mod appender;
pub mod config;
pub mod context;
pub mod encoder;
pub mod error;
pub mod field;
pub mod hooks;
pub mod level_controller;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod writer;

pub use appender::Appender;
pub use config::{ContextBuilder, ContextConfig, Destination};
pub use context::{copy_context, LoggingContext};
pub use encoder::{
    EncoderConfig, Encoding, TimestampFormat, DEFAULT_ERROR_KEY, DEFAULT_LEVEL_KEY,
    DEFAULT_MESSAGE_KEY, DEFAULT_TIME_KEY,
};
pub use error::{LoggerError, Result};
pub use field::{find_field, format_fields, resolve_last_wins, Field, FieldValue, Fields};
pub use hooks::{Hook, HookCore};
pub use level_controller::LevelController;
pub use log_entry::LogEntry;
pub use log_level::{parse_level, LogLevel, DEFAULT_LEVEL};
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use options::{LogOption, RecordOptions};
pub use writer::{SinkCore, WriterChain};
