//! Bridge from the `log` crate facade
//!
//! ```
//! use rz_logger::prelude::*;
//!
//! let logger = Logger::builder().writer(std::io::sink()).build();
//! rz_logger::bridge::init(logger, log::LevelFilter::Info).unwrap();
//! log::info!(target: "db", "connected to {}", "primary");
//! ```

use crate::core::{LogLevel, Logger, LoggerError, Result};
use log::{Log, Metadata, Record};

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Trace => LogLevel::Trace,
        }
    }
}

/// Forwards `log` records to a [`Logger`].
///
/// Each record gets a `target` field, plus `module`, `file` and `line`
/// when the macro call site provides them.
#[derive(Debug)]
pub struct LogBridge {
    logger: Logger,
}

impl LogBridge {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.logger.enabled(metadata.level().into())
    }

    fn log(&self, record: &Record<'_>) {
        self.logger
            .log_at(record.level().into(), record.args().to_string(), |e| {
                e.string("target", record.target());
                if let Some(module) = record.module_path() {
                    e.string("module", module);
                }
                if let Some(file) = record.file() {
                    e.string("file", file);
                }
                if let Some(line) = record.line() {
                    e.uint("line", line);
                }
            });
    }

    fn flush(&self) {
        if let Err(e) = self.logger.flush() {
            eprintln!("[LOGGER ERROR] could not flush: {}", e);
        }
    }
}

/// Install `logger` as the `log` crate's global logger.
///
/// Fails if a global logger has already been installed.
pub fn init(logger: Logger, max_level: log::LevelFilter) -> Result<()> {
    log::set_boxed_logger(Box::new(LogBridge::new(logger)))
        .map_err(|e| LoggerError::config("log bridge", e.to_string()))?;
    log::set_max_level(max_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GlobalConfig, LevelWriter};
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Lines(Arc<Mutex<Vec<String>>>);

    impl Write for Lines {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.write_level(LogLevel::NoLevel, buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LevelWriter for Lines {
        fn write_level(&mut self, _level: LogLevel, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().push(String::from_utf8_lossy(buf).into_owned());
            Ok(buf.len())
        }
    }

    fn bridge(lines: &Lines) -> LogBridge {
        LogBridge::new(
            Logger::builder()
                .level_writer(lines.clone())
                .globals(Arc::new(GlobalConfig::new()))
                .level(LogLevel::Info)
                .build(),
        )
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::from(log::Level::Warn), LogLevel::Warn);
        assert_eq!(LogLevel::from(log::Level::Trace), LogLevel::Trace);
    }

    #[test]
    fn test_enabled_follows_threshold() {
        let lines = Lines::default();
        let bridge = bridge(&lines);
        let debug = Metadata::builder().level(log::Level::Debug).build();
        let error = Metadata::builder().level(log::Level::Error).build();
        assert!(!bridge.enabled(&debug));
        assert!(bridge.enabled(&error));
    }

    #[test]
    fn test_forwards_record_fields() {
        let lines = Lines::default();
        let bridge = bridge(&lines);

        bridge.log(
            &Record::builder()
                .args(format_args!("hello {}", 7))
                .level(log::Level::Warn)
                .target("db")
                .module_path(Some("app::db"))
                .file(Some("src/db.rs"))
                .line(Some(12))
                .build(),
        );

        assert_eq!(
            lines.0.lock()[0],
            "{\"level\":\"warn\",\"target\":\"db\",\"module\":\"app::db\",\"file\":\"src/db.rs\",\"line\":12,\"message\":\"hello 7\"}\n"
        );
    }
}
