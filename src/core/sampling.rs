//! Log sampling for high-volume scenarios
//!
//! A [`Sampler`] runs after the level gate and decides whether an otherwise
//! enabled record is emitted. Samplers are shared between derived loggers
//! and called concurrently, so all state here is atomic or locked.
//!
//! # Samplers
//!
//! - [`BasicSampler`]: every Nth record
//! - [`BurstSampler`]: a burst of records per period, then a fallback sampler
//! - [`LevelSampler`]: a different sampler per severity
//! - [`RandomSampler`]: random rate with always-sampled levels and adaptive
//!   rate reduction under load
//!
//! # Example
//!
//! ```
//! use rz_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .writer(std::io::sink())
//!     .sampler(BasicSampler::new(10))
//!     .build();
//! logger.info("only every tenth call is written", |_| {});
//! ```

use super::log_level::LogLevel;
use parking_lot::Mutex;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Decides whether a record at `level` is emitted
pub trait Sampler: Send + Sync {
    fn sample(&self, level: LogLevel) -> bool;
}

impl<S: Sampler + ?Sized> Sampler for Arc<S> {
    fn sample(&self, level: LogLevel) -> bool {
        (**self).sample(level)
    }
}

/// Passes one record out of every `n`
///
/// The first call passes, then the (n+1)th, and so on. `n == 1` passes
/// everything and `n == 0` passes nothing.
#[derive(Debug)]
pub struct BasicSampler {
    n: u32,
    counter: AtomicU32,
}

impl BasicSampler {
    pub const fn new(n: u32) -> Self {
        Self {
            n,
            counter: AtomicU32::new(0),
        }
    }
}

impl Sampler for BasicSampler {
    fn sample(&self, _level: LogLevel) -> bool {
        match self.n {
            0 => false,
            1 => true,
            n => self.counter.fetch_add(1, Ordering::Relaxed) % n == 0,
        }
    }
}

#[derive(Debug, Default)]
struct BurstWindow {
    resets_at: Option<Instant>,
    count: u32,
}

/// Lets `burst` records through per `period`, then hands over to `next`
///
/// Without a next sampler, records beyond the burst are rejected.
pub struct BurstSampler {
    burst: u32,
    period: Duration,
    next: Option<Arc<dyn Sampler>>,
    window: Mutex<BurstWindow>,
}

impl BurstSampler {
    pub fn new(burst: u32, period: Duration) -> Self {
        Self {
            burst,
            period,
            next: None,
            window: Mutex::new(BurstWindow::default()),
        }
    }

    /// Sampler consulted once the burst for the current period is spent
    #[must_use]
    pub fn with_next<S: Sampler + 'static>(mut self, next: S) -> Self {
        self.next = Some(Arc::new(next));
        self
    }

    fn take_from_burst(&self) -> bool {
        if self.burst == 0 || self.period.is_zero() {
            return false;
        }
        let now = Instant::now();
        let mut window = self.window.lock();
        if window.resets_at.map_or(true, |at| now >= at) {
            window.resets_at = Some(now + self.period);
            window.count = 0;
        }
        if window.count < self.burst {
            window.count += 1;
            true
        } else {
            false
        }
    }
}

impl Sampler for BurstSampler {
    fn sample(&self, level: LogLevel) -> bool {
        if self.take_from_burst() {
            return true;
        }
        self.next.as_ref().is_some_and(|next| next.sample(level))
    }
}

impl std::fmt::Debug for BurstSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BurstSampler")
            .field("burst", &self.burst)
            .field("period", &self.period)
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

/// Applies a different sampler per severity
///
/// Levels without a sampler, and fatal, panic and no-level records, always
/// pass.
#[derive(Default)]
pub struct LevelSampler {
    pub trace: Option<Arc<dyn Sampler>>,
    pub debug: Option<Arc<dyn Sampler>>,
    pub info: Option<Arc<dyn Sampler>>,
    pub warn: Option<Arc<dyn Sampler>>,
    pub error: Option<Arc<dyn Sampler>>,
}

impl LevelSampler {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level<S: Sampler + 'static>(mut self, level: LogLevel, sampler: S) -> Self {
        let sampler: Arc<dyn Sampler> = Arc::new(sampler);
        match level {
            LogLevel::Trace => self.trace = Some(sampler),
            LogLevel::Debug => self.debug = Some(sampler),
            LogLevel::Info => self.info = Some(sampler),
            LogLevel::Warn => self.warn = Some(sampler),
            LogLevel::Error => self.error = Some(sampler),
            _ => {}
        }
        self
    }
}

impl Sampler for LevelSampler {
    fn sample(&self, level: LogLevel) -> bool {
        let sampler = match level {
            LogLevel::Trace => &self.trace,
            LogLevel::Debug => &self.debug,
            LogLevel::Info => &self.info,
            LogLevel::Warn => &self.warn,
            LogLevel::Error => &self.error,
            _ => return true,
        };
        sampler.as_ref().map_or(true, |s| s.sample(level))
    }
}

/// Configuration for [`RandomSampler`]
///
/// # Example
///
/// ```
/// use rz_logger::prelude::*;
///
/// // Sample 10% of logs, but always log warnings and above
/// let config = SamplingConfig::new(0.1)
///     .with_always_sample(vec![LogLevel::Warn, LogLevel::Error, LogLevel::Fatal]);
/// assert_eq!(config.rate, 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Sample rate between 0.0 and 1.0
    ///
    /// - 1.0 = no sampling (log everything)
    /// - 0.5 = sample 50% of logs
    /// - 0.0 = drop all logs (except always_sample levels)
    pub rate: f64,

    /// Log levels that are never sampled (always logged)
    pub always_sample: Vec<LogLevel>,

    /// Enable adaptive sampling based on throughput
    ///
    /// When enabled, the sampling rate is reduced when throughput exceeds
    /// `adaptive_threshold`.
    pub adaptive: bool,

    /// Threshold (messages per second) to trigger adaptive sampling
    pub adaptive_threshold: usize,

    /// The sampling rate never goes below this value, even under extreme load
    pub adaptive_min_rate: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            always_sample: vec![LogLevel::Error, LogLevel::Fatal, LogLevel::Panic],
            adaptive: false,
            adaptive_threshold: 10000,
            adaptive_min_rate: 0.01,
        }
    }
}

impl SamplingConfig {
    /// Create a new sampling config with the specified rate, clamped to [0, 1]
    pub fn new(rate: f64) -> Self {
        Self {
            rate: rate.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Set the levels that should always be logged
    #[must_use]
    pub fn with_always_sample(mut self, levels: Vec<LogLevel>) -> Self {
        self.always_sample = levels;
        self
    }

    /// Enable adaptive sampling
    #[must_use]
    pub fn with_adaptive(mut self, threshold: usize, min_rate: f64) -> Self {
        self.adaptive = true;
        self.adaptive_threshold = threshold;
        self.adaptive_min_rate = min_rate.clamp(0.0, 1.0);
        self
    }
}

/// Pass/drop counters of a [`RandomSampler`]
#[derive(Debug, Default)]
pub struct SamplerMetrics {
    sampled: AtomicU64,
    dropped: AtomicU64,
}

impl SamplerMetrics {
    pub const fn new() -> Self {
        Self {
            sampled: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    pub fn sampled_count(&self) -> u64 {
        self.sampled.load(Ordering::Relaxed)
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn total_count(&self) -> u64 {
        self.sampled_count() + self.dropped_count()
    }

    pub(crate) fn record(&self, sampled: bool) {
        let counter = if sampled { &self.sampled } else { &self.dropped };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Fraction of decisions that passed; 1.0 before the first decision
    pub fn effective_sample_rate(&self) -> f64 {
        match self.total_count() {
            0 => 1.0,
            total => self.sampled_count() as f64 / total as f64,
        }
    }

    pub fn reset(&self) {
        self.sampled.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
    }
}

/// Length of the window throughput is measured over
const RATE_WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug)]
struct RateWindow {
    started: Instant,
    count: u64,
}

/// Messages per second over a rolling one-second window
#[derive(Debug)]
struct RateTracker {
    window: Mutex<RateWindow>,
    last_rate: AtomicU64,
}

impl RateTracker {
    fn new() -> Self {
        Self {
            window: Mutex::new(RateWindow {
                started: Instant::now(),
                count: 0,
            }),
            last_rate: AtomicU64::new(0f64.to_bits()),
        }
    }

    /// Count one message and return the rate of the current window
    fn record(&self) -> f64 {
        let mut window = self.window.lock();
        let now = Instant::now();
        if now.duration_since(window.started) >= RATE_WINDOW {
            window.started = now;
            window.count = 0;
        }
        window.count += 1;

        // Never divide by less than a millisecond so early bursts stay finite
        let elapsed = now
            .duration_since(window.started)
            .max(Duration::from_millis(1))
            .as_secs_f64();
        let rate = window.count as f64 / elapsed;
        self.last_rate.store(rate.to_bits(), Ordering::Relaxed);
        rate
    }

    fn current(&self) -> f64 {
        f64::from_bits(self.last_rate.load(Ordering::Relaxed))
    }
}

/// Random sampler driven by a [`SamplingConfig`]
///
/// Levels listed in `always_sample` always pass. Other records pass with
/// probability `rate`, scaled down under adaptive sampling when throughput
/// exceeds `adaptive_threshold`, but never below `adaptive_min_rate`.
///
/// # Example
///
/// ```
/// use rz_logger::prelude::*;
///
/// let sampler = RandomSampler::new(SamplingConfig::new(0.5));
///
/// // Critical logs are always sampled
/// assert!(sampler.sample(LogLevel::Error));
/// ```
pub struct RandomSampler {
    config: SamplingConfig,
    metrics: SamplerMetrics,
    throughput: RateTracker,
}

impl RandomSampler {
    pub fn new(config: SamplingConfig) -> Self {
        Self {
            config,
            metrics: SamplerMetrics::new(),
            throughput: RateTracker::new(),
        }
    }

    fn current_probability(&self) -> f64 {
        let base = self.config.rate;
        if !self.config.adaptive {
            return base;
        }
        let threshold = self.config.adaptive_threshold as f64;
        let observed = self.throughput.record();
        if observed <= threshold {
            return base;
        }
        (base * threshold / observed).max(self.config.adaptive_min_rate)
    }

    pub fn metrics(&self) -> &SamplerMetrics {
        &self.metrics
    }

    /// Observed pass ratio so far
    pub fn effective_sample_rate(&self) -> f64 {
        self.metrics.effective_sample_rate()
    }

    /// Last measured throughput; only updated with adaptive sampling
    pub fn current_message_rate(&self) -> f64 {
        self.throughput.current()
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }
}

impl Sampler for RandomSampler {
    fn sample(&self, level: LogLevel) -> bool {
        let keep = self.config.always_sample.contains(&level) || {
            let p = self.current_probability();
            p >= 1.0 || (p > 0.0 && rand::thread_rng().gen_bool(p))
        };
        self.metrics.record(keep);
        keep
    }
}

impl std::fmt::Debug for RandomSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomSampler")
            .field("config", &self.config)
            .field("metrics", &self.metrics)
            .finish()
    }
}
