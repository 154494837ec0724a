//! Fan-out and filtering writers

use crate::core::{LevelWriter, LevelWriterAdapter, LogLevel};
use std::io::{self, Write};

/// Sends every record to each of its writers.
///
/// Every writer is attempted even when an earlier one fails; the first
/// error is returned after all of them have been tried.
#[derive(Default)]
pub struct MultiLevelWriter {
    writers: Vec<Box<dyn LevelWriter + Send>>,
}

impl MultiLevelWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a writer that receives each record's level
    #[must_use]
    pub fn with_level_writer<W: LevelWriter + Send + 'static>(mut self, writer: W) -> Self {
        self.writers.push(Box::new(writer));
        self
    }

    /// Add a plain writer; the level is discarded
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(self, writer: W) -> Self {
        self.with_level_writer(LevelWriterAdapter::new(writer))
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

impl Write for MultiLevelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_level(LogLevel::NoLevel, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut first_error = None;
        for writer in &mut self.writers {
            if let Err(e) = writer.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl LevelWriter for MultiLevelWriter {
    fn write_level(&mut self, level: LogLevel, buf: &[u8]) -> io::Result<usize> {
        let mut first_error = None;
        for writer in &mut self.writers {
            if let Err(e) = writer.write_level(level, buf) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(buf.len()), Err)
    }
}

/// Forwards only records at or above a minimum level.
///
/// Dropped records still report their full length as written.
pub struct LevelFilterWriter<W> {
    inner: W,
    min_level: LogLevel,
}

impl<W: LevelWriter> LevelFilterWriter<W> {
    pub fn new(inner: W, min_level: LogLevel) -> Self {
        Self { inner, min_level }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: LevelWriter> Write for LevelFilterWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_level(LogLevel::NoLevel, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: LevelWriter> LevelWriter for LevelFilterWriter<W> {
    fn write_level(&mut self, level: LogLevel, buf: &[u8]) -> io::Result<usize> {
        if level < self.min_level {
            return Ok(buf.len());
        }
        self.inner.write_level(level, buf)
    }
}
