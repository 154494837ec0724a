//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Records from concurrent callers never interleave
//! - Concurrent derivation keeps contexts separate
//! - Samplers keep exact counts under contention
//! - High-volume file logging loses nothing

use parking_lot::Mutex;
use rz_logger::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

/// Sink that splits its input into chunks to expose interleaving
#[derive(Clone, Default)]
struct Chunked {
    out: Arc<Mutex<Vec<u8>>>,
}

impl Write for Chunked {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for chunk in buf.chunks(7) {
            self.out.lock().extend_from_slice(chunk);
            thread::yield_now();
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn isolated() -> Arc<GlobalConfig> {
    Arc::new(GlobalConfig::new())
}

#[test]
fn test_concurrent_records_do_not_interleave() {
    let sink = Chunked::default();
    let logger = Logger::builder()
        .writer(sink.clone())
        .globals(isolated())
        .build();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.info("concurrent", |e| {
                        e.uint("thread", t as u64).uint("seq", i as u64);
                    });
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let out = sink.out.lock();
    let text = std::str::from_utf8(&out).unwrap();
    let mut per_thread: HashMap<u64, Vec<u64>> = HashMap::new();
    for line in text.lines() {
        let record: Value = serde_json::from_str(line).expect("record was interleaved");
        per_thread
            .entry(record["thread"].as_u64().unwrap())
            .or_default()
            .push(record["seq"].as_u64().unwrap());
    }

    assert_eq!(per_thread.len(), THREADS);
    for seqs in per_thread.values() {
        // Each thread's records arrive in the order it logged them
        let expected: Vec<u64> = (0..PER_THREAD as u64).collect();
        assert_eq!(seqs, &expected);
    }
}

#[test]
fn test_concurrent_derivation_keeps_context_separate() {
    let sink = Chunked::default();
    let root = Logger::builder()
        .writer(sink.clone())
        .globals(isolated())
        .fields(|e| {
            e.string("root", "shared");
        })
        .build();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let root = root.clone();
            thread::spawn(move || {
                for i in 0..50u64 {
                    let child = root.config([options::fields(move |e| {
                        e.uint("worker", t as u64).uint("job", i);
                    })]);
                    child.info("job", |_| {});
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    assert_eq!(root.context(), br#""root":"shared""#);

    let out = sink.out.lock();
    let text = std::str::from_utf8(&out).unwrap();
    let records: Vec<Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(records.len(), THREADS * 50);
    for record in &records {
        let object = record.as_object().unwrap();
        assert_eq!(object.len(), 5, "unexpected fields in {}", record);
        assert_eq!(record["root"], "shared");
    }
}

#[test]
fn test_basic_sampler_exact_under_contention() {
    let sink = Chunked::default();
    let logger = Logger::builder()
        .writer(sink.clone())
        .globals(isolated())
        .sampler(BasicSampler::new(10))
        .build();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = logger.clone();
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    logger.info("sampled", |_| {});
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let out = sink.out.lock();
    let count = std::str::from_utf8(&out).unwrap().lines().count();
    assert_eq!(count, THREADS * PER_THREAD / 10);
}

#[test]
fn test_burst_sampler_limits_each_period() {
    let sampler = BurstSampler::new(5, Duration::from_millis(200));

    let first: usize = (0..50).filter(|_| sampler.sample(LogLevel::Info)).count();
    assert_eq!(first, 5);

    thread::sleep(Duration::from_millis(250));
    let second: usize = (0..50).filter(|_| sampler.sample(LogLevel::Info)).count();
    assert_eq!(second, 5);
}

#[test]
fn test_random_sampler_keeps_critical_levels() {
    let sampler = Arc::new(RandomSampler::new(SamplingConfig::new(0.0)));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let sampler = Arc::clone(&sampler);
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    assert!(!sampler.sample(LogLevel::Info));
                    assert!(sampler.sample(LogLevel::Error));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("sampling thread panicked");
    }

    let metrics = sampler.metrics();
    assert_eq!(metrics.sampled_count(), (THREADS * PER_THREAD) as u64);
    assert_eq!(metrics.dropped_count(), (THREADS * PER_THREAD) as u64);
    assert_eq!(metrics.total_count(), (2 * THREADS * PER_THREAD) as u64);
}

#[test]
fn test_high_volume_file_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.log");

    {
        let logger = Logger::builder()
            .level_writer(FileWriter::new(&log_file).expect("Failed to create writer"))
            .globals(isolated())
            .level(LogLevel::Trace)
            .build();

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let logger = logger.clone();
                thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        logger.trace("volume", |e| {
                            e.uint("t", t as u64).uint("i", i as u64);
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("logging thread panicked");
        }
        logger.flush().expect("Failed to flush");
    }

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    for line in lines {
        let _: Value = serde_json::from_str(line).expect("intact record");
    }
}
