//! Serializable logger configuration
//!
//! ```
//! use rz_logger::prelude::*;
//!
//! let config = LoggerConfig::from_json(
//!     r#"{"level": "warn", "caller": true, "fields": {"service": "api"}}"#,
//! )
//! .unwrap();
//! assert_eq!(config.level, LogLevel::Warn);
//!
//! let logger = LoggerBuilder::from_config(config)
//!     .writer(std::io::sink())
//!     .build();
//! assert_eq!(logger.level(), LogLevel::Warn);
//! ```

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::options::{self, LoggerOption};
use super::sampling::{RandomSampler, SamplingConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level emitted
    pub level: LogLevel,

    /// Add the call site to every record
    pub caller: bool,

    /// Add a backtrace to every record
    pub stack: bool,

    /// Random sampling, off when absent
    pub sampling: Option<SamplingConfig>,

    /// Context bound to every record, in document order
    pub fields: Map<String, Value>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            caller: false,
            stack: false,
            sampling: None,
            fields: Map::new(),
        }
    }
}

impl LoggerConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(ref sampling) = self.sampling {
            if !(0.0..=1.0).contains(&sampling.rate) {
                return Err(LoggerError::config(
                    "sampling",
                    format!("rate must be between 0.0 and 1.0, got {}", sampling.rate),
                ));
            }
            if sampling.adaptive && !(0.0..=1.0).contains(&sampling.adaptive_min_rate) {
                return Err(LoggerError::config(
                    "sampling",
                    format!(
                        "adaptive_min_rate must be between 0.0 and 1.0, got {}",
                        sampling.adaptive_min_rate
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Options reproducing this configuration, in application order
    pub fn into_options(self) -> Vec<LoggerOption> {
        let mut opts = vec![
            options::level(self.level),
            options::caller(self.caller),
            options::stack(self.stack),
        ];
        if let Some(sampling) = self.sampling {
            opts.push(options::sampler(RandomSampler::new(sampling)));
        }
        if !self.fields.is_empty() {
            let fields = self.fields;
            opts.push(options::fields(move |e| {
                for (key, value) in &fields {
                    e.serialize(key, value);
                }
            }));
        }
        opts
    }
}
