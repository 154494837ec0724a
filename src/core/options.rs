//! Configuration options applied, in order, by [`Logger::new`] and
//! [`Logger::config`]

use super::event::{Event, ENC};
use super::encoder::Encoder;
use super::global::GlobalConfig;
use super::hook::{FnHook, Hook};
use super::log_level::LogLevel;
use super::logger::Logger;
use super::sampling::Sampler;
use super::writer::{shared, LevelWriter, LevelWriterAdapter};
use std::io::Write;
use std::sync::Arc;

/// One configuration step
pub struct LoggerOption(Box<dyn FnOnce(&mut Logger)>);

impl LoggerOption {
    /// Custom option operating on the logger being configured
    pub fn new(apply: impl FnOnce(&mut Logger) + 'static) -> Self {
        Self(Box::new(apply))
    }

    pub(crate) fn apply(self, logger: &mut Logger) {
        (self.0)(logger)
    }
}

impl std::fmt::Debug for LoggerOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LoggerOption")
    }
}

/// Send records to a plain writer; the level is discarded
pub fn writer<W: Write + Send + 'static>(w: W) -> LoggerOption {
    LoggerOption::new(move |logger| logger.writer = shared(LevelWriterAdapter::new(w)))
}

/// Send records to a writer that receives each record's level
pub fn level_writer<W: LevelWriter + Send + 'static>(w: W) -> LoggerOption {
    LoggerOption::new(move |logger| logger.writer = shared(w))
}

/// Minimum level emitted by this logger
pub fn level(level: LogLevel) -> LoggerOption {
    LoggerOption::new(move |logger| logger.level = level)
}

pub fn sampler<S: Sampler + 'static>(s: S) -> LoggerOption {
    shared_sampler(Arc::new(s))
}

/// Install a sampler that is also used elsewhere
pub fn shared_sampler(s: Arc<dyn Sampler>) -> LoggerOption {
    LoggerOption::new(move |logger| logger.sampler = Some(s))
}

/// Append a hook; hooks run in the order they were added
pub fn hook<H: Hook + 'static>(h: H) -> LoggerOption {
    LoggerOption::new(move |logger| logger.hooks.push(Arc::new(h)))
}

pub fn hook_fn<F>(f: F) -> LoggerOption
where
    F: Fn(&mut Event<'_>, LogLevel, &str) + Send + Sync + 'static,
{
    hook(FnHook::new(f))
}

/// Add the call site as a `caller` field to every record
pub fn caller(enabled: bool) -> LoggerOption {
    LoggerOption::new(move |logger| logger.caller = enabled)
}

/// Add a backtrace as a `stack` field to every record
pub fn stack(enabled: bool) -> LoggerOption {
    LoggerOption::new(move |logger| logger.stack = enabled)
}

/// Bind context fields written into every subsequent record.
///
/// Fields are appended after any context bound earlier.
pub fn fields<F>(f: F) -> LoggerOption
where
    F: FnOnce(&mut Event<'_>) + 'static,
{
    LoggerOption::new(move |logger| {
        let fragment = {
            let mut event = Event::fragment(&logger.writer);
            f(&mut event);
            event.into_buffer()
        };
        ENC.append_object_data(&mut logger.context, &fragment);
    })
}

/// Read the global threshold and sampling switch from `globals`
pub fn globals(globals: Arc<GlobalConfig>) -> LoggerOption {
    LoggerOption::new(move |logger| logger.globals = globals)
}

/// Replace the process exit performed after a fatal record
pub fn exit_func(exit: fn(i32)) -> LoggerOption {
    LoggerOption::new(move |logger| logger.exit = exit)
}
