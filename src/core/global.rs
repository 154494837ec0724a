//! Process-wide logging switches
//!
//! Every logger reads its [`GlobalConfig`] on each call, so changes take
//! effect immediately for all loggers sharing it. Loggers use the process
//! instance unless another one is injected with [`globals`](super::options::globals).

use super::log_level::LogLevel;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, AtomicI8, Ordering};
use std::sync::Arc;

static GLOBAL: Lazy<Arc<GlobalConfig>> = Lazy::new(|| Arc::new(GlobalConfig::new()));

/// Global threshold and sampling switch
///
/// Defaults are permissive: threshold `Trace`, sampling enabled.
#[derive(Debug)]
pub struct GlobalConfig {
    level: AtomicI8,
    sampling_disabled: AtomicBool,
}

impl GlobalConfig {
    pub const fn new() -> Self {
        Self {
            level: AtomicI8::new(LogLevel::Trace as i8),
            sampling_disabled: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_i8(self.level.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as i8, Ordering::Relaxed);
    }

    #[inline]
    pub fn sampling_disabled(&self) -> bool {
        self.sampling_disabled.load(Ordering::Relaxed)
    }

    /// Force every sampler off (`true`) so enabled calls always emit
    #[inline]
    pub fn disable_sampling(&self, disabled: bool) {
        self.sampling_disabled.store(disabled, Ordering::Relaxed);
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide instance
pub fn global() -> Arc<GlobalConfig> {
    Arc::clone(&GLOBAL)
}

pub fn global_level() -> LogLevel {
    GLOBAL.level()
}

pub fn set_global_level(level: LogLevel) {
    GLOBAL.set_level(level);
}

pub fn sampling_disabled() -> bool {
    GLOBAL.sampling_disabled()
}

pub fn disable_sampling(disabled: bool) {
    GLOBAL.disable_sampling(disabled);
}
