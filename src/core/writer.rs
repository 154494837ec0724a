//! Level-aware sink dispatch

use super::log_level::LogLevel;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// A sink that can route or filter records by severity.
///
/// Loggers always dispatch through `write_level`, once per record, with the
/// complete serialized record including its trailing newline.
///
/// The call is made while the logger's sink lock is held, and that lock is
/// not reentrant. A sink must not log through the logger that owns it,
/// directly or through [`bridge::LogBridge`](crate::bridge::LogBridge), or
/// the call deadlocks.
pub trait LevelWriter: Write {
    fn write_level(&mut self, level: LogLevel, buf: &[u8]) -> io::Result<usize>;
}

/// Gives any plain [`Write`] the level-aware interface by discarding the level.
#[derive(Debug)]
pub struct LevelWriterAdapter<W> {
    inner: W,
}

impl<W: Write> LevelWriterAdapter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for LevelWriterAdapter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write> LevelWriter for LevelWriterAdapter<W> {
    fn write_level(&mut self, _level: LogLevel, buf: &[u8]) -> io::Result<usize> {
        self.inner.write_all(buf)?;
        Ok(buf.len())
    }
}

/// Sink handle shared by a logger and every logger derived from it
pub(crate) type SharedWriter = Arc<Mutex<Box<dyn LevelWriter + Send>>>;

pub(crate) fn shared<W: LevelWriter + Send + 'static>(writer: W) -> SharedWriter {
    let boxed: Box<dyn LevelWriter + Send> = Box::new(writer);
    Arc::new(Mutex::new(boxed))
}

#[cfg(test)]
mod tests {
    use super::*;

    type Seen = Arc<Mutex<Vec<(LogLevel, Vec<u8>)>>>;

    struct Routing {
        seen: Seen,
    }

    impl Write for Routing {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.write_level(LogLevel::NoLevel, buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LevelWriter for Routing {
        fn write_level(&mut self, level: LogLevel, buf: &[u8]) -> io::Result<usize> {
            self.seen.lock().push((level, buf.to_vec()));
            Ok(buf.len())
        }
    }

    #[test]
    fn test_adapter_discards_level() {
        let mut adapter = LevelWriterAdapter::new(Vec::new());
        assert_eq!(adapter.write_level(LogLevel::Error, b"abc\n").unwrap(), 4);
        assert_eq!(adapter.write_level(LogLevel::Info, b"def\n").unwrap(), 4);
        assert_eq!(adapter.into_inner(), b"abc\ndef\n");
    }

    #[test]
    fn test_shared_uses_native_level_path() {
        let seen = Seen::default();
        let writer = shared(Routing {
            seen: Arc::clone(&seen),
        });
        writer.lock().write_level(LogLevel::Warn, b"x").unwrap();
        writer.lock().write_level(LogLevel::Error, b"y").unwrap();

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], (LogLevel::Warn, b"x".to_vec()));
        assert_eq!(seen[1], (LogLevel::Error, b"y".to_vec()));
    }
}
