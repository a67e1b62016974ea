use std::fmt;
use std::io::Write;

use crate::line_mode::LineMode;

mod constructors;
mod writing;

/// Line-oriented sink that writes rendered log lines into an
/// [`std::io::Write`] target.
///
/// The sink owns the underlying writer together with the [`LineMode`] that
/// decides whether each line is terminated with a newline.
///
/// # Examples
///
/// Collect lines into a [`Vec<u8>`] with newline terminators:
///
/// ```
/// use sitelog_sink::MessageSink;
///
/// let mut output = Vec::new();
/// let mut sink = MessageSink::new(&mut output);
///
/// sink.write_line("E: failed 3")?;
/// sink.write_line("N: recovered")?;
/// drop(sink);
///
/// assert_eq!(output, b"E: failed 3\nN: recovered\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone)]
pub struct MessageSink<W> {
    writer: W,
    line_mode: LineMode,
}

/// Type-erased sink stored by the registry.
pub type DynSink = MessageSink<Box<dyn Write + Send>>;

impl<W> fmt::Debug for MessageSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageSink")
            .field("writer", &self.writer)
            .field("line_mode", &self.line_mode)
            .finish()
    }
}
