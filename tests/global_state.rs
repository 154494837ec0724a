//! Process-wide threshold and sampling switch
//!
//! Everything here mutates the process instance, so it runs as a single
//! test to keep the steps ordered.

use parking_lot::Mutex;
use rz_logger::prelude::*;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
struct Counter(Arc<Mutex<usize>>);

impl Counter {
    fn get(&self) -> usize {
        *self.0.lock()
    }
}

impl Write for Counter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        *self.0.lock() += 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct Rejecting {
    calls: AtomicUsize,
}

impl Sampler for Rejecting {
    fn sample(&self, _level: LogLevel) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        false
    }
}

#[test]
fn test_process_wide_switches() {
    assert_eq!(global_level(), LogLevel::Trace);
    assert!(!rz_logger::sampling_disabled());

    let counter = Counter::default();
    let logger = Logger::builder()
        .writer(counter.clone())
        .level(LogLevel::Trace)
        .build();

    logger.trace("visible", |_| {});
    assert_eq!(counter.get(), 1);

    // The global threshold applies to loggers created before the change
    set_global_level(LogLevel::Warn);
    logger.info("hidden", |_| {});
    logger.warn("visible", |_| {});
    assert_eq!(counter.get(), 2);

    set_global_level(LogLevel::Disabled);
    logger.error("hidden", |_| {});
    logger.log("hidden", |_| {});
    (&logger).write_all(b"hidden\n").unwrap();
    assert_eq!(counter.get(), 2);

    set_global_level(LogLevel::Trace);
    logger.log("visible", |_| {});
    assert_eq!(counter.get(), 3);

    let sampler = Arc::new(Rejecting::default());
    let sampled = logger.config([options::shared_sampler(sampler.clone())]);
    sampled.info("sampled out", |_| {});
    assert_eq!(counter.get(), 3);
    assert_eq!(sampler.calls.load(Ordering::SeqCst), 1);

    disable_sampling(true);
    assert!(rz_logger::sampling_disabled());
    sampled.info("always emitted", |_| {});
    assert_eq!(counter.get(), 4);
    assert_eq!(sampler.calls.load(Ordering::SeqCst), 1);

    disable_sampling(false);
    sampled.info("sampled out again", |_| {});
    assert_eq!(counter.get(), 4);
    assert_eq!(sampler.calls.load(Ordering::SeqCst), 2);

    // An injected instance ignores the process switches
    set_global_level(LogLevel::Disabled);
    let isolated = logger.config([options::globals(Arc::new(GlobalConfig::new()))]);
    isolated.info("visible", |_| {});
    assert_eq!(counter.get(), 5);
    set_global_level(LogLevel::Trace);
}
