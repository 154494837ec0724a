//! Console writer implementation

use crate::core::event::{LEVEL_FIELD_NAME, MESSAGE_FIELD_NAME, TIMESTAMP_FIELD_NAME};
use crate::core::{LevelWriter, LogLevel};
use colored::Colorize;
use serde_json::{Map, Value};
use std::io::{self, Write};

/// Renders JSON records as human-readable lines.
///
/// Output looks like `2024-01-02T03:04:05.000Z INFO  served status=200`.
/// Error, fatal and panic records go to stderr, everything else to stdout.
/// Records that are not JSON objects are passed through unchanged.
pub struct ConsoleWriter {
    use_colors: bool,
}

impl ConsoleWriter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Human-readable form of one record, or `None` if it is not a JSON object
    pub fn render(&self, buf: &[u8]) -> Option<String> {
        let fields: Map<String, Value> = serde_json::from_slice(buf).ok()?;

        let timestamp = fields.get(TIMESTAMP_FIELD_NAME);
        let level = fields
            .get(LEVEL_FIELD_NAME)
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse::<LogLevel>().ok());
        let message = fields.get(MESSAGE_FIELD_NAME).map(plain).unwrap_or_default();

        let mut line = String::new();
        if let Some(timestamp) = timestamp {
            line.push_str(&plain(timestamp));
            line.push(' ');
        }
        if let Some(level) = level {
            let tag = format!("{:5}", level.as_str().to_uppercase());
            if self.use_colors {
                line.push_str(&tag.color(level.color_code()).to_string());
            } else {
                line.push_str(&tag);
            }
            line.push(' ');
        }
        line.push_str(&message);

        let reserved = [TIMESTAMP_FIELD_NAME, LEVEL_FIELD_NAME, MESSAGE_FIELD_NAME];
        for (key, value) in fields.iter().filter(|(k, _)| !reserved.contains(&k.as_str())) {
            line.push(' ');
            if self.use_colors {
                line.push_str(&key.dimmed().to_string());
            } else {
                line.push_str(key);
            }
            line.push('=');
            line.push_str(&plain(value));
        }

        Some(line)
    }
}

/// Strings unquoted, everything else as JSON
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_level(LogLevel::NoLevel, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        // Flush both stdout and stderr since we write to both
        io::stdout().flush()?;
        io::stderr().flush()
    }
}

impl LevelWriter for ConsoleWriter {
    fn write_level(&mut self, level: LogLevel, buf: &[u8]) -> io::Result<usize> {
        let rendered = self.render(buf);
        let output = match rendered {
            Some(ref line) => format!("{}\n", line),
            None => String::from_utf8_lossy(buf).into_owned(),
        };

        match level {
            LogLevel::Error | LogLevel::Fatal | LogLevel::Panic => {
                io::stderr().lock().write_all(output.as_bytes())?
            }
            _ => io::stdout().lock().write_all(output.as_bytes())?,
        }
        Ok(buf.len())
    }
}
