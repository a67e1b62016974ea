#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `sitelog` is a call-site registry logger. Every textual log statement owns
//! a registry entry holding its message template and a cached enabled flag.
//! Entries register lazily, the first time their call site runs, and stay in
//! the [`Registry`] for the rest of the process.
//!
//! # Design
//!
//! - The [`sitelog!`] macro expands to a `static` [`Entry`] and one flag check.
//!   A disabled call site costs one relaxed load and never evaluates its
//!   arguments.
//! - The first character of each template is a severity marker decoded by
//!   [`rank_of`]. [`Registry::set_level`] recomputes every flag from the
//!   marker rank and the new threshold.
//! - [`Registry::enable_by_pattern`] overrides flags for every template that
//!   contains a regular-expression match, regardless of severity.
//! - [`init`] returns a [`Session`] guard; dropping it logs a [`Summary`] of
//!   the registry through the facility itself and flushes the sink.
//!
//! # Invariants
//!
//! - A call site registers at most once, however many threads reach it.
//! - Entries are never removed. Their templates are never copied or freed.
//! - Only registration and the two engines write an entry's flag, and all of
//!   them are serialized by the registry lock.
//! - The registry lock is never held while a line is formatted or written.
//!
//! # Errors
//!
//! Templates with an unknown marker follow the registry's [`MarkerPolicy`];
//! they never fail registration. A pattern that does not compile yields a
//! [`PatternError`] after the registry logs `e: bad regex expression`.
//! Write failures on the sink are dropped by log calls.
//!
//! # Examples
//!
//! ```
//! use sitelog::{Registry, Severity, sitelog};
//!
//! let registry = Registry::without_sink();
//! registry.set_sink(Vec::<u8>::new());
//!
//! for code in [1, 2] {
//!     sitelog!(in &registry; "E: failed {}", code);
//!     sitelog!(in &registry; "D: trace {}", code);
//! }
//! assert_eq!(registry.len(), 2);
//! assert_eq!(registry.enabled_count(), 1);
//!
//! registry.set_severity(Severity::Debug);
//! assert_eq!(registry.enabled_count(), 2);
//!
//! let sink = registry.clear_sink().unwrap();
//! assert!(!registry.has_sink());
//! drop(sink);
//! ```
//!
//! # See also
//!
//! - [`sitelog_sink`] for the output destination wrapper.
//! - [`debug_registry`] for the facility's own tracing hooks.

mod config;
pub mod debug_registry;
mod entry;
mod error;
mod levels;
mod macros;
mod pattern;
mod registry;
mod report;
mod thread_local;

pub use config::{ENV_INVALID_MARKER, ENV_LEVEL, ENV_PATTERNS, ENV_QUIET, LogConfig};
pub use entry::{Entry, RegistryId, Slot};
pub use error::{ConfigError, LevelError, PatternError};
pub use levels::{MARKERS, MarkerPolicy, Severity, rank_of, severity_of};
pub use pattern::PatternDirective;
pub use registry::{Entries, Registry};
pub use report::{Session, Summary, init};
pub use sitelog_sink::{DynSink, LineMode, MessageSink};

/// Version reported in the shutdown summary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
