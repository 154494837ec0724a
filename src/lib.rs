//! # rz_logger
//!
//! Structured, leveled JSON logging with zero allocation for disabled calls.
//!
//! Each logging call produces one JSON object on one line. Records are
//! gated by an instance threshold, a process-wide threshold and an optional
//! sampler before anything is allocated.
//!
//! ## Features
//!
//! - **Immutable loggers**: derive children with bound context; parents never change
//! - **Fixed field order**: level, bound context, call fields, hook fields, message
//! - **Level-aware sinks**: writers can route or filter by severity
//! - **Hooks and samplers**: enrich or thin records without touching call sites
//!
//! ```
//! use rz_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .writer(std::io::sink())
//!     .fields(|e| {
//!         e.string("service", "api");
//!     })
//!     .build();
//!
//! logger.info("listening", |e| {
//!     e.uint("port", 8080u16);
//! });
//! ```

pub mod bridge;
pub mod core;
pub mod macros;
pub mod writers;

pub use crate::core::options;

pub mod prelude {
    pub use crate::core::options::{self, LoggerOption};
    pub use crate::core::{
        disable_sampling, global_level, set_global_level, BasicSampler, BurstSampler, Event,
        FnHook, GlobalConfig, Hook, LevelSampler, LevelWriter, LevelWriterAdapter, LogLevel,
        LogPanic, Logger, LoggerBuilder, LoggerConfig, LoggerError, RandomSampler, Result,
        Sampler, SamplerMetrics, SamplingConfig, TimestampHook,
    };
    #[cfg(feature = "console")]
    pub use crate::writers::ConsoleWriter;
    pub use crate::writers::{FileWriter, LevelFilterWriter, MultiLevelWriter};
}

pub use crate::core::{
    disable_sampling, global, global_level, sampling_disabled, set_global_level, BasicSampler,
    BurstSampler, Encoder, Event, FnHook, GlobalConfig, Hook, JsonEncoder, LevelSampler,
    LevelWriter, LevelWriterAdapter, LogLevel, LogPanic, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerOption, RandomSampler, Result, Sampler, SamplerMetrics, SamplingConfig,
    TimestampHook,
};
#[cfg(feature = "console")]
pub use writers::ConsoleWriter;
pub use writers::{FileWriter, LevelFilterWriter, MultiLevelWriter};
