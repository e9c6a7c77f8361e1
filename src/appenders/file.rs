//! File appender implementation

use crate::core::{Appender, EncoderConfig, Field, LogEntry, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one encoded line per record to a file
pub struct FileAppender {
    writer: BufWriter<File>,
    path: PathBuf,
    encoder: EncoderConfig,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            encoder: EncoderConfig::default(),
        })
    }

    /// Set the encoder for this appender
    ///
    /// ```no_run
    /// use rust_context_logger::appenders::FileAppender;
    /// use rust_context_logger::{EncoderConfig, Encoding};
    ///
    /// let appender = FileAppender::new("/var/log/app.jsonl")
    ///     .unwrap()
    ///     .with_encoder(EncoderConfig {
    ///         encoding: Encoding::Json,
    ///         ..EncoderConfig::default()
    ///     });
    /// ```
    #[must_use]
    pub fn with_encoder(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&mut self, entry: &LogEntry, fields: &[Field]) -> Result<()> {
        let mut line = self.encoder.encode(entry, fields);
        line.push('\n');

        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
