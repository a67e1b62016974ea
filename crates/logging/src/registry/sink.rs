//! crates/logging/src/registry/sink.rs
//! Output sink management for a registry.

use std::io::{self, Write};
use std::sync::MutexGuard;
use std::sync::atomic::Ordering;

use sitelog_sink::{DynSink, LineMode, MessageSink};

use super::Registry;

impl Registry {
    pub(super) fn lock_sink(&self) -> MutexGuard<'_, Option<DynSink>> {
        self.sink.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    /// Routes output to `writer` using the registry's current line mode.
    ///
    /// The sink lock is held while `writer` runs. Lines the writer logs through
    /// this registry are dropped; calling the sink methods of this registry
    /// from inside `writer` deadlocks.
    pub fn set_sink<W>(&self, writer: W)
    where
        W: Write + Send + 'static,
    {
        self.set_sink_with_mode(writer, self.line_mode());
    }

    /// Routes output to `writer` and switches the registry to `line_mode`.
    pub fn set_sink_with_mode<W>(&self, writer: W, line_mode: LineMode)
    where
        W: Write + Send + 'static,
    {
        self.set_message_sink(MessageSink::with_line_mode(writer, line_mode).boxed());
    }

    /// Installs a prepared sink, adopting its line mode, and returns the one
    /// it replaces.
    pub fn set_message_sink(&self, sink: DynSink) -> Option<DynSink> {
        let mut slot = self.lock_sink();
        self.append_newline
            .store(sink.line_mode().append_newline(), Ordering::Relaxed);
        let previous = slot.replace(sink);
        self.sink_ready.store(true, Ordering::Relaxed);
        previous
    }

    /// Removes the sink. Call sites stay registered but write nothing.
    pub fn clear_sink(&self) -> Option<DynSink> {
        let mut slot = self.lock_sink();
        self.sink_ready.store(false, Ordering::Relaxed);
        slot.take()
    }

    /// Reports whether a sink is installed.
    #[must_use]
    pub fn has_sink(&self) -> bool {
        self.sink_ready.load(Ordering::Relaxed)
    }

    /// Returns whether emitted lines receive a trailing newline.
    #[must_use]
    pub fn line_mode(&self) -> LineMode {
        LineMode::from(self.append_newline.load(Ordering::Relaxed))
    }

    /// Changes the line mode of the registry and of the installed sink.
    pub fn set_line_mode(&self, line_mode: LineMode) {
        let mut slot = self.lock_sink();
        self.append_newline
            .store(line_mode.append_newline(), Ordering::Relaxed);
        if let Some(sink) = slot.as_mut() {
            sink.set_line_mode(line_mode);
        }
    }

    /// Flushes the installed sink, if any.
    pub fn flush(&self) -> io::Result<()> {
        match self.lock_sink().as_mut() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }
}
