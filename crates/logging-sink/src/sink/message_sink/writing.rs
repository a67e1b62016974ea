use super::MessageSink;
use std::io::{self, Write};

impl<W> MessageSink<W>
where
    W: Write,
{
    /// Writes a single rendered line using the sink's current
    /// [`LineMode`](crate::LineMode).
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        if self.line_mode.append_newline() {
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
