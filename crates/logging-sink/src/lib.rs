#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `sitelog-sink` provides the output destination used by the `sitelog`
//! call-site registry. A [`MessageSink`] wraps any [`std::io::Write`]
//! implementor and writes one rendered log line per call, optionally followed
//! by a newline terminator selected through [`LineMode`].
//!
//! # Design
//!
//! The registry owns a single type-erased sink ([`DynSink`]) and replaces it
//! wholesale whenever the process reconfigures its destination. The default
//! destination is standard error, built by `DynSink::stderr`.
//! Rendering happens before the sink is touched, so the sink only ever sees
//! finished text and never re-enters the logging facility.
//!
//! # Invariants
//!
//! - `LineMode::WithNewline` is the default and terminates every line with
//!   `\n`, matching one diagnostic per line.
//! - The sink performs no buffering of its own; buffering is whatever the
//!   wrapped writer provides.
//!
//! # Errors
//!
//! All operations surface [`std::io::Error`] values originating from the
//! underlying writer unchanged.
//!
//! # Examples
//!
//! ```
//! use sitelog_sink::{LineMode, MessageSink};
//!
//! let mut output = Vec::new();
//! let mut sink = MessageSink::new(&mut output);
//! sink.write_line("N: starting up").unwrap();
//! sink.set_line_mode(LineMode::WithoutNewline);
//! sink.write_line("I: progress 10%").unwrap();
//! drop(sink);
//!
//! assert_eq!(output, b"N: starting up\nI: progress 10%");
//! ```

mod line_mode;
mod sink;

pub use line_mode::LineMode;
pub use sink::{DynSink, MessageSink};
