//! Writer implementations

#[cfg(feature = "console")]
pub mod console;
pub mod file;
pub mod multi;

#[cfg(feature = "console")]
pub use console::ConsoleWriter;
pub use file::FileWriter;
pub use multi::{LevelFilterWriter, MultiLevelWriter};

// Re-export traits for convenience
pub use crate::core::{LevelWriter, LevelWriterAdapter};
