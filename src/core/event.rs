//! Single-use record builder
//!
//! An [`Event`] exists for the duration of one logging call. It is handed
//! to the field callback and to every hook, then consumed by the flush.

use super::encoder::{Encoder, JsonEncoder};
use super::error::LogPanic;
use super::hook::Hook;
use super::log_level::LogLevel;
use super::writer::SharedWriter;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::backtrace::Backtrace;
use std::io::Write;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

pub const LEVEL_FIELD_NAME: &str = "level";
pub const MESSAGE_FIELD_NAME: &str = "message";
pub const ERROR_FIELD_NAME: &str = "error";
pub const CALLER_FIELD_NAME: &str = "caller";
pub const STACK_FIELD_NAME: &str = "stack";
pub const TIMESTAMP_FIELD_NAME: &str = "timestamp";

const EVENT_CAPACITY: usize = 500;

pub(crate) const ENC: JsonEncoder = JsonEncoder;

/// Action run after a fatal or panic record has been written
#[derive(Debug, Clone, Copy)]
pub(crate) enum Termination {
    Exit(fn(i32)),
    Panic,
}

impl Termination {
    pub(crate) fn for_level(level: LogLevel, exit: fn(i32)) -> Option<Self> {
        match level {
            LogLevel::Fatal => Some(Termination::Exit(exit)),
            LogLevel::Panic => Some(Termination::Panic),
            _ => None,
        }
    }

    fn run(self, message: &str) {
        match self {
            Termination::Exit(exit) => exit(1),
            Termination::Panic => std::panic::panic_any(LogPanic {
                message: message.to_string(),
            }),
        }
    }
}

pub struct Event<'a> {
    buf: Vec<u8>,
    level: LogLevel,
    writer: &'a SharedWriter,
    hooks: &'a [Arc<dyn Hook>],
    caller: bool,
    stack: bool,
    location: Option<&'static Location<'static>>,
    done: Option<Termination>,
}

impl<'a> Event<'a> {
    pub(crate) fn new(
        writer: &'a SharedWriter,
        level: LogLevel,
        hooks: &'a [Arc<dyn Hook>],
        location: &'static Location<'static>,
    ) -> Self {
        let mut buf = Vec::with_capacity(EVENT_CAPACITY);
        ENC.append_begin_marker(&mut buf);
        Self {
            buf,
            level,
            writer,
            hooks,
            caller: false,
            stack: false,
            location: Some(location),
            done: None,
        }
    }

    /// Event that only collects a context fragment and is never flushed
    pub(crate) fn fragment(writer: &'a SharedWriter) -> Self {
        Self {
            buf: Vec::new(),
            level: LogLevel::NoLevel,
            writer,
            hooks: &[],
            caller: false,
            stack: false,
            location: None,
            done: None,
        }
    }

    pub(crate) fn with_capture(mut self, caller: bool, stack: bool) -> Self {
        self.caller = caller;
        self.stack = stack;
        self
    }

    pub(crate) fn with_termination(mut self, done: Option<Termination>) -> Self {
        self.done = done;
        self
    }

    pub(crate) fn append_context(&mut self, context: &[u8]) {
        ENC.append_object_data(&mut self.buf, context);
    }

    pub(crate) fn into_buffer(self) -> Vec<u8> {
        self.buf
    }

    /// Severity this event was created for
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Enable or disable the `caller` field for this record
    pub fn caller(&mut self, enabled: bool) -> &mut Self {
        self.caller = enabled;
        self
    }

    /// Enable or disable the `stack` field for this record
    pub fn stack(&mut self, enabled: bool) -> &mut Self {
        self.stack = enabled;
        self
    }

    pub fn string(&mut self, key: &str, val: &str) -> &mut Self {
        ENC.append_key(&mut self.buf, key);
        ENC.append_string(&mut self.buf, val);
        self
    }

    pub fn strings<S: AsRef<str>>(&mut self, key: &str, vals: &[S]) -> &mut Self {
        ENC.append_key(&mut self.buf, key);
        ENC.append_strings(&mut self.buf, vals);
        self
    }

    pub fn bool(&mut self, key: &str, val: bool) -> &mut Self {
        ENC.append_key(&mut self.buf, key);
        ENC.append_bool(&mut self.buf, val);
        self
    }

    pub fn int(&mut self, key: &str, val: impl Into<i64>) -> &mut Self {
        ENC.append_key(&mut self.buf, key);
        ENC.append_i64(&mut self.buf, val.into());
        self
    }

    pub fn uint(&mut self, key: &str, val: impl Into<u64>) -> &mut Self {
        ENC.append_key(&mut self.buf, key);
        ENC.append_u64(&mut self.buf, val.into());
        self
    }

    pub fn float(&mut self, key: &str, val: f64) -> &mut Self {
        ENC.append_key(&mut self.buf, key);
        ENC.append_f64(&mut self.buf, val);
        self
    }

    pub fn null(&mut self, key: &str) -> &mut Self {
        ENC.append_key(&mut self.buf, key);
        ENC.append_null(&mut self.buf);
        self
    }

    /// Add `err` under the `error` key
    pub fn err(&mut self, err: &dyn std::error::Error) -> &mut Self {
        self.error(ERROR_FIELD_NAME, err)
    }

    pub fn error(&mut self, key: &str, err: &dyn std::error::Error) -> &mut Self {
        self.string(key, &err.to_string())
    }

    pub fn time(&mut self, key: &str, val: DateTime<Utc>) -> &mut Self {
        ENC.append_key(&mut self.buf, key);
        ENC.append_time(&mut self.buf, &val);
        self
    }

    /// Add the current time under the `timestamp` key
    pub fn timestamp(&mut self) -> &mut Self {
        self.time(TIMESTAMP_FIELD_NAME, Utc::now())
    }

    /// Add a duration as floating milliseconds
    pub fn duration(&mut self, key: &str, val: Duration) -> &mut Self {
        ENC.append_key(&mut self.buf, key);
        ENC.append_duration(&mut self.buf, val);
        self
    }

    /// Splice pre-encoded JSON; invalid input is written as a string instead
    pub fn raw_json(&mut self, key: &str, raw: &[u8]) -> &mut Self {
        ENC.append_key(&mut self.buf, key);
        ENC.append_raw_json(&mut self.buf, raw);
        self
    }

    /// Add any serializable value
    ///
    /// Values that fail to serialize are recorded as a `marshaling error`
    /// string so the rest of the record survives.
    pub fn serialize<T: Serialize + ?Sized>(&mut self, key: &str, val: &T) -> &mut Self {
        ENC.append_key(&mut self.buf, key);
        ENC.append_serialize(&mut self.buf, val);
        self
    }

    /// Add a nested object whose fields are appended by `fields`
    pub fn object(&mut self, key: &str, fields: impl FnOnce(&mut Self)) -> &mut Self {
        ENC.append_key(&mut self.buf, key);
        ENC.append_begin_marker(&mut self.buf);
        fields(&mut *self);
        ENC.append_end_marker(&mut self.buf);
        self
    }

    /// Run hooks, close the record and hand it to the sink
    pub(crate) fn msg(mut self, message: &str) {
        let hooks = self.hooks;
        let level = self.level;
        for hook in hooks {
            hook.run(&mut self, level, message);
        }

        if self.caller {
            if let Some(location) = self.location {
                let caller = format!("{}:{}", location.file(), location.line());
                self.string(CALLER_FIELD_NAME, &caller);
            }
        }
        if self.stack {
            let stack = Backtrace::force_capture().to_string();
            self.string(STACK_FIELD_NAME, &stack);
        }

        self.string(MESSAGE_FIELD_NAME, message);
        ENC.append_end_marker(&mut self.buf);
        ENC.append_line_break(&mut self.buf);

        self.write();

        if let Some(done) = self.done {
            done.run(message);
        }
    }

    fn write(&self) {
        let mut writer = self.writer.lock();
        if let Err(e) = writer.write_level(self.level, &self.buf) {
            eprintln!("[LOGGER ERROR] could not write event: {}", e);
        }
        // Terminating records must reach the sink before the process goes away
        if self.done.is_some() {
            if let Err(e) = writer.flush() {
                eprintln!("[LOGGER ERROR] could not flush event: {}", e);
            }
        }
    }
}

impl std::fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("level", &self.level)
            .field("buf", &String::from_utf8_lossy(&self.buf))
            .field("caller", &self.caller)
            .field("stack", &self.stack)
            .finish()
    }
}
