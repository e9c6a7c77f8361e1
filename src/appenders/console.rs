//! Console appender implementation

use crate::core::{Appender, EncoderConfig, Field, LogEntry, Result};
use std::io::Write;

/// Standard stream a `ConsoleAppender` writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

pub struct ConsoleAppender {
    stream: ConsoleStream,
    encoder: EncoderConfig,
}

impl ConsoleAppender {
    pub fn new(stream: ConsoleStream, encoder: EncoderConfig) -> Self {
        Self { stream, encoder }
    }

    pub fn stderr(encoder: EncoderConfig) -> Self {
        Self::new(ConsoleStream::Stderr, encoder)
    }

    pub fn stdout(encoder: EncoderConfig) -> Self {
        Self::new(ConsoleStream::Stdout, encoder)
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }

    /// Set the encoder for this appender
    ///
    /// # Example
    ///
    /// ```
    /// use rust_context_logger::appenders::ConsoleAppender;
    /// use rust_context_logger::{EncoderConfig, Encoding};
    ///
    /// let appender = ConsoleAppender::default().with_encoder(EncoderConfig {
    ///     encoding: Encoding::Json,
    ///     ..EncoderConfig::default()
    /// });
    /// ```
    #[must_use]
    pub fn with_encoder(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = encoder;
        self
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::stderr(EncoderConfig::default())
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry, fields: &[Field]) -> Result<()> {
        let line = self.encoder.encode(entry, fields);

        match self.stream {
            ConsoleStream::Stdout => writeln!(std::io::stdout().lock(), "{}", line)?,
            ConsoleStream::Stderr => writeln!(std::io::stderr().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            ConsoleStream::Stdout => std::io::stdout().flush()?,
            ConsoleStream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.stream {
            ConsoleStream::Stdout => "stdout",
            ConsoleStream::Stderr => "stderr",
        }
    }
}
