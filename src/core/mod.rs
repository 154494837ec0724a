//! Core logger types and traits

pub mod config;
pub mod encoder;
pub mod error;
pub mod event;
pub mod global;
pub mod hook;
pub mod log_level;
pub mod logger;
pub mod options;
pub mod sampling;
pub mod writer;

pub use config::LoggerConfig;
pub use encoder::{Encoder, JsonEncoder};
pub use error::{LogPanic, LoggerError, Result};
pub use event::{
    Event, CALLER_FIELD_NAME, ERROR_FIELD_NAME, LEVEL_FIELD_NAME, MESSAGE_FIELD_NAME,
    STACK_FIELD_NAME, TIMESTAMP_FIELD_NAME,
};
pub use global::{
    disable_sampling, global, global_level, sampling_disabled, set_global_level, GlobalConfig,
};
pub use hook::{FnHook, Hook, TimestampHook};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use options::LoggerOption;
pub use sampling::{
    BasicSampler, BurstSampler, LevelSampler, RandomSampler, Sampler, SamplerMetrics,
    SamplingConfig,
};
pub use writer::{LevelWriter, LevelWriterAdapter};
