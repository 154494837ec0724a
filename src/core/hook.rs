//! Hooks run on every emitted record after its fields, before its message

use super::event::{Event, TIMESTAMP_FIELD_NAME};
use super::log_level::LogLevel;
use chrono::Utc;

/// Observes or extends an in-flight record.
///
/// Hooks run once per emitted record in registration order. They may append
/// fields or toggle caller/stack capture on the event.
pub trait Hook: Send + Sync {
    fn run(&self, event: &mut Event<'_>, level: LogLevel, message: &str);
}

/// Adapts a closure into a [`Hook`]
pub struct FnHook<F> {
    f: F,
}

impl<F> FnHook<F>
where
    F: Fn(&mut Event<'_>, LogLevel, &str) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Hook for FnHook<F>
where
    F: Fn(&mut Event<'_>, LogLevel, &str) + Send + Sync,
{
    fn run(&self, event: &mut Event<'_>, level: LogLevel, message: &str) {
        (self.f)(event, level, message)
    }
}

/// Adds the wall-clock time under `timestamp`
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampHook;

impl Hook for TimestampHook {
    fn run(&self, event: &mut Event<'_>, _level: LogLevel, _message: &str) {
        event.time(TIMESTAMP_FIELD_NAME, Utc::now());
    }
}
