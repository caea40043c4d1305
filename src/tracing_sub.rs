//! Subscriber setup for hosts embedding the engine.
//!
//! Events go to the global [`crate::log_buffer`] when a host has installed
//! one (an in-app log panel next to the map), otherwise to stderr. The sink
//! is chosen per event, so a buffer installed after startup still catches
//! later events.

use std::io::{self, Write};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::log_buffer::{LogBufferWriter, global_log_buffer};

/// Destination for one formatted event.
pub enum LogSink {
    Panel(LogBufferWriter),
    Stderr(io::Stderr),
}

impl LogSink {
    fn current() -> Self {
        global_log_buffer()
            .map(|handle| LogSink::Panel(handle.writer()))
            .unwrap_or_else(|| LogSink::Stderr(io::stderr()))
    }

    fn as_write(&mut self) -> &mut dyn Write {
        match self {
            LogSink::Panel(writer) => writer,
            LogSink::Stderr(stderr) => stderr,
        }
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.as_write().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.as_write().flush()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EngineLogWriter;

impl<'a> MakeWriter<'a> for EngineLogWriter {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        LogSink::current()
    }
}

/// Initialize the global subscriber at DEBUG. See [`init_with_level`].
pub fn init_default() {
    init_with_level(Level::DEBUG);
}

/// Install a compact subscriber capped at `level`. ANSI styling is only
/// enabled when events go to stderr. Later calls are no-ops.
pub fn init_with_level(level: Level) {
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .with_writer(EngineLogWriter)
        .with_ansi(global_log_buffer().is_none())
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_buffer::{LogBufferHandle, set_global_log_buffer};

    #[test]
    fn events_land_in_the_global_log_buffer() {
        let handle = LogBufferHandle::default();
        if !set_global_log_buffer(handle.clone()) {
            return;
        }
        init_default();
        tracing::info!(window_id = "w1", "focused window");
        assert!(
            handle
                .lines()
                .iter()
                .any(|line| line.contains("focused window") && line.contains("w1"))
        );
    }

    #[test]
    fn panel_sink_splits_lines_into_the_buffer() {
        let handle = LogBufferHandle::new(8);
        let mut sink = LogSink::Panel(handle.writer());
        write!(sink, "opened Legend\nclosed ").unwrap();
        sink.flush().unwrap();
        assert_eq!(handle.lines(), ["opened Legend", "closed "]);
    }
}
