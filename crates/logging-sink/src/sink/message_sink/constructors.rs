use super::{DynSink, MessageSink};
use crate::line_mode::LineMode;
use std::io::{self, Write};

impl<W> MessageSink<W> {
    /// Creates a new sink that appends a newline after each line.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self { writer, line_mode }
    }

    /// Returns the current [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Updates the [`LineMode`] used for subsequent writes.
    pub fn set_line_mode(&mut self, line_mode: LineMode) {
        self.line_mode = line_mode;
    }
}

impl<W> MessageSink<W>
where
    W: Write + Send + 'static,
{
    /// Erases the writer type so the sink can be stored by the registry.
    #[must_use]
    pub fn boxed(self) -> DynSink {
        let Self { writer, line_mode } = self;
        MessageSink::with_line_mode(Box::new(writer), line_mode)
    }
}

impl DynSink {
    /// Creates the default destination: the process's standard error stream.
    #[must_use]
    pub fn stderr() -> Self {
        MessageSink::new(io::stderr()).boxed()
    }
}
