//! Main logger implementation
//!
//! A [`Logger`] is an immutable configuration snapshot. Each logging call
//! is gated by level and sampler, then builds, enriches and flushes one
//! [`Event`]. Deriving a logger with [`Logger::config`] copies the bound
//! context, so parent and child never share mutable state; only the sink
//! is shared.

use super::{
    config::LoggerConfig,
    event::{Event, Termination, LEVEL_FIELD_NAME},
    global::{global, GlobalConfig},
    hook::Hook,
    log_level::LogLevel,
    options::{self, LoggerOption},
    sampling::Sampler,
    writer::{shared, LevelWriter, LevelWriterAdapter, SharedWriter},
};
use std::io::{self, Write};
use std::panic::Location;
use std::sync::Arc;

/// Capacity reserved for the bound context of each derived logger
const CONTEXT_CAPACITY: usize = 500;

fn exit_process(code: i32) {
    std::process::exit(code)
}

/// Structured, leveled logger writing one JSON object per call.
///
/// Each record makes exactly one `write_level` call on the sink, under the
/// sink's lock, so records from concurrent callers never interleave.
///
/// # Example
///
/// ```
/// use rz_logger::prelude::*;
///
/// let logger = Logger::new([
///     options::writer(std::io::sink()),
///     options::level(LogLevel::Info),
///     options::fields(|e| {
///         e.string("service", "api");
///     }),
/// ]);
///
/// logger.info("request served", |e| {
///     e.int("status", 200).float("ms", 12.5);
/// });
/// ```
#[derive(Clone)]
pub struct Logger {
    pub(crate) writer: SharedWriter,
    pub(crate) level: LogLevel,
    pub(crate) sampler: Option<Arc<dyn Sampler>>,
    pub(crate) hooks: Vec<Arc<dyn Hook>>,
    pub(crate) context: Vec<u8>,
    pub(crate) caller: bool,
    pub(crate) stack: bool,
    pub(crate) globals: Arc<GlobalConfig>,
    pub(crate) exit: fn(i32),
}

impl Logger {
    /// Root logger writing to stdout, configured by `options` in order
    #[must_use]
    pub fn new<I>(options: I) -> Self
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        let root = Self {
            writer: shared(LevelWriterAdapter::new(io::stdout())),
            level: LogLevel::default(),
            sampler: None,
            hooks: Vec::new(),
            context: Vec::new(),
            caller: false,
            stack: false,
            globals: global(),
            exit: exit_process,
        };
        root.config(options)
    }

    /// Logger for which every call is a no-op
    #[must_use]
    pub fn nop() -> Self {
        Self::new([options::writer(io::sink()), options::level(LogLevel::Disabled)])
    }

    /// Derive a new logger with `options` applied on top of this one.
    ///
    /// The context is copied into a fresh buffer first, so the receiver is
    /// never affected by the derivation.
    #[must_use]
    pub fn config<I>(&self, options: I) -> Self
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        let mut context = Vec::with_capacity(CONTEXT_CAPACITY.max(self.context.len()));
        context.extend_from_slice(&self.context);

        let mut logger = Self {
            writer: Arc::clone(&self.writer),
            level: self.level,
            sampler: self.sampler.clone(),
            hooks: self.hooks.clone(),
            context,
            caller: self.caller,
            stack: self.stack,
            globals: Arc::clone(&self.globals),
            exit: self.exit,
        };
        for option in options {
            option.apply(&mut logger);
        }
        logger
    }

    /// Create a builder for a root logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Create a builder deriving from this logger
    #[must_use]
    pub fn child(&self) -> LoggerBuilder {
        LoggerBuilder {
            parent: Some(self.clone()),
            options: Vec::new(),
        }
    }

    /// Instance threshold
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Pre-serialized bound context fields
    pub fn context(&self) -> &[u8] {
        &self.context
    }

    #[track_caller]
    #[inline]
    pub fn trace(&self, message: impl AsRef<str>, fields: impl FnOnce(&mut Event<'_>)) {
        self.log_event(LogLevel::Trace, message.as_ref(), fields);
    }

    #[track_caller]
    #[inline]
    pub fn debug(&self, message: impl AsRef<str>, fields: impl FnOnce(&mut Event<'_>)) {
        self.log_event(LogLevel::Debug, message.as_ref(), fields);
    }

    #[track_caller]
    #[inline]
    pub fn info(&self, message: impl AsRef<str>, fields: impl FnOnce(&mut Event<'_>)) {
        self.log_event(LogLevel::Info, message.as_ref(), fields);
    }

    #[track_caller]
    #[inline]
    pub fn warn(&self, message: impl AsRef<str>, fields: impl FnOnce(&mut Event<'_>)) {
        self.log_event(LogLevel::Warn, message.as_ref(), fields);
    }

    #[track_caller]
    #[inline]
    pub fn error(&self, message: impl AsRef<str>, fields: impl FnOnce(&mut Event<'_>)) {
        self.log_event(LogLevel::Error, message.as_ref(), fields);
    }

    /// Log at fatal level, then exit the process with status 1.
    ///
    /// The exit happens only after the record has been written and the sink
    /// flushed. A disabled fatal call does not exit.
    #[track_caller]
    #[inline]
    pub fn fatal(&self, message: impl AsRef<str>, fields: impl FnOnce(&mut Event<'_>)) {
        self.log_event(LogLevel::Fatal, message.as_ref(), fields);
    }

    /// Log at panic level, then unwind with a [`LogPanic`](super::error::LogPanic)
    /// payload carrying the message.
    ///
    /// The unwind starts only after the record has been written and the
    /// sink flushed.
    ///
    /// The payload is not a string, so if nothing catches the unwind the
    /// default panic hook prints `Box<dyn Any>`. The message is in the
    /// record and in [`LogPanic::message`](super::error::LogPanic::message),
    /// not in the panic line.
    #[track_caller]
    #[inline]
    pub fn panic(&self, message: impl AsRef<str>, fields: impl FnOnce(&mut Event<'_>)) {
        self.log_event(LogLevel::Panic, message.as_ref(), fields);
    }

    /// Log without a level tag. A `Disabled` threshold still suppresses it.
    #[track_caller]
    #[inline]
    pub fn log(&self, message: impl AsRef<str>, fields: impl FnOnce(&mut Event<'_>)) {
        self.log_event(LogLevel::NoLevel, message.as_ref(), fields);
    }

    /// Log at `level`; fatal and panic levels keep their terminating behavior
    #[track_caller]
    #[inline]
    pub fn log_at(
        &self,
        level: LogLevel,
        message: impl AsRef<str>,
        fields: impl FnOnce(&mut Event<'_>),
    ) {
        self.log_event(level, message.as_ref(), fields);
    }

    #[track_caller]
    fn log_event<F>(&self, level: LogLevel, message: &str, fields: F)
    where
        F: FnOnce(&mut Event<'_>),
    {
        if !self.should(level) {
            return;
        }

        let mut event = Event::new(&self.writer, level, &self.hooks, Location::caller())
            .with_capture(self.caller, self.stack)
            .with_termination(Termination::for_level(level, self.exit));
        if level != LogLevel::NoLevel {
            event.string(LEVEL_FIELD_NAME, level.as_str());
        }
        if !self.context.is_empty() {
            event.append_context(&self.context);
        }

        fields(&mut event);
        event.msg(message);
    }

    /// Whether `level` passes the instance and global thresholds.
    ///
    /// Sampling is not consulted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level && level >= self.globals.level()
    }

    /// Level gate followed by the sampler, evaluated before any allocation
    fn should(&self, level: LogLevel) -> bool {
        if !self.enabled(level) {
            return false;
        }
        match self.sampler {
            Some(ref sampler) if !self.globals.sampling_disabled() => sampler.sample(level),
            _ => true,
        }
    }

    /// Flush the shared sink
    pub fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new([])
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("sampler", &self.sampler.is_some())
            .field("hooks", &self.hooks.len())
            .field("context", &String::from_utf8_lossy(&self.context))
            .field("caller", &self.caller)
            .field("stack", &self.stack)
            .finish()
    }
}

/// Each `write` is logged as one no-level record with a single trailing
/// newline removed, which lets line-oriented loggers write through a
/// [`Logger`]. The full input length is always reported as written.
impl Write for &Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let line = buf.strip_suffix(b"\n").unwrap_or(buf);
        self.log(String::from_utf8_lossy(line), |_| {});
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Logger::flush(self)
    }
}

impl Write for Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut this: &Logger = self;
        this.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Logger::flush(self)
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Options are applied in the order the builder methods are called.
///
/// # Example
/// ```
/// use rz_logger::prelude::*;
///
/// let root = Logger::builder()
///     .writer(std::io::sink())
///     .level(LogLevel::Debug)
///     .hook(TimestampHook)
///     .build();
///
/// let request = root
///     .child()
///     .fields(|e| {
///         e.string("request_id", "abc-123");
///     })
///     .build();
/// request.info("handled", |_| {});
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    parent: Option<Logger>,
    options: Vec<LoggerOption>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded with the options described by `config`
    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            parent: None,
            options: config.into_options(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn option(mut self, option: LoggerOption) -> Self {
        self.options.push(option);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn writer<W: Write + Send + 'static>(self, w: W) -> Self {
        self.option(options::writer(w))
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_writer<W: LevelWriter + Send + 'static>(self, w: W) -> Self {
        self.option(options::level_writer(w))
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(self, level: LogLevel) -> Self {
        self.option(options::level(level))
    }

    #[must_use = "builder methods return a new value"]
    pub fn sampler<S: Sampler + 'static>(self, sampler: S) -> Self {
        self.option(options::sampler(sampler))
    }

    #[must_use = "builder methods return a new value"]
    pub fn hook<H: Hook + 'static>(self, hook: H) -> Self {
        self.option(options::hook(hook))
    }

    #[must_use = "builder methods return a new value"]
    pub fn hook_fn<F>(self, f: F) -> Self
    where
        F: Fn(&mut Event<'_>, LogLevel, &str) + Send + Sync + 'static,
    {
        self.option(options::hook_fn(f))
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller(self, enabled: bool) -> Self {
        self.option(options::caller(enabled))
    }

    #[must_use = "builder methods return a new value"]
    pub fn stack(self, enabled: bool) -> Self {
        self.option(options::stack(enabled))
    }

    #[must_use = "builder methods return a new value"]
    pub fn fields<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut Event<'_>) + 'static,
    {
        self.option(options::fields(f))
    }

    #[must_use = "builder methods return a new value"]
    pub fn globals(self, globals: Arc<GlobalConfig>) -> Self {
        self.option(options::globals(globals))
    }

    #[must_use = "builder methods return a new value"]
    pub fn exit_func(self, exit: fn(i32)) -> Self {
        self.option(options::exit_func(exit))
    }

    pub fn build(self) -> Logger {
        match self.parent {
            Some(parent) => parent.config(self.options),
            None => Logger::new(self.options),
        }
    }
}
