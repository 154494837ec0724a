//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Records built
//! this way carry only the bound context; use the [`Logger`](crate::Logger)
//! methods directly to add per-call fields.
//!
//! The level gate runs before the message is formatted, so a disabled call
//! never evaluates its format arguments.
//!
//! # Examples
//!
//! ```
//! use rz_logger::prelude::*;
//! use rz_logger::info;
//!
//! let logger = Logger::builder().writer(std::io::sink()).build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a formatted message at a runtime level.
///
/// # Examples
///
/// ```
/// # use rz_logger::prelude::*;
/// # let logger = Logger::builder().writer(std::io::sink()).build();
/// use rz_logger::log_at;
/// log_at!(logger, LogLevel::Info, "Simple message");
/// log_at!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        {
            let logger = &$logger;
            let level = $level;
            if logger.enabled(level) {
                logger.log_at(level, format!($($arg)+), |_| {})
            }
        }
    };
}

/// Log a formatted message without a level field.
///
/// # Examples
///
/// ```
/// # use rz_logger::prelude::*;
/// # let logger = Logger::builder().writer(std::io::sink()).build();
/// use rz_logger::log;
/// log!(logger, "{} bytes received", 512);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $($arg:tt)+) => {
        {
            let logger = &$logger;
            if logger.enabled($crate::LogLevel::NoLevel) {
                logger.log(format!($($arg)+), |_| {})
            }
        }
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use rz_logger::prelude::*;
/// # let logger = Logger::builder().writer(std::io::sink()).level(LogLevel::Trace).build();
/// use rz_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        {
            let logger = &$logger;
            if logger.enabled($crate::LogLevel::Trace) {
                logger.trace(format!($($arg)+), |_| {})
            }
        }
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        {
            let logger = &$logger;
            if logger.enabled($crate::LogLevel::Debug) {
                logger.debug(format!($($arg)+), |_| {})
            }
        }
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        {
            let logger = &$logger;
            if logger.enabled($crate::LogLevel::Info) {
                logger.info(format!($($arg)+), |_| {})
            }
        }
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rz_logger::prelude::*;
/// # let logger = Logger::builder().writer(std::io::sink()).build();
/// use rz_logger::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        {
            let logger = &$logger;
            if logger.enabled($crate::LogLevel::Warn) {
                logger.warn(format!($($arg)+), |_| {})
            }
        }
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        {
            let logger = &$logger;
            if logger.enabled($crate::LogLevel::Error) {
                logger.error(format!($($arg)+), |_| {})
            }
        }
    };
}

/// Log a fatal-level message, then exit the process.
///
/// # Examples
///
/// ```no_run
/// # use rz_logger::prelude::*;
/// # let logger = Logger::new([]);
/// use rz_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        {
            let logger = &$logger;
            if logger.enabled($crate::LogLevel::Fatal) {
                logger.fatal(format!($($arg)+), |_| {})
            }
        }
    };
}
