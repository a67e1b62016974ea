//! crates/logging/src/registry/mod.rs
//! The call-site registry: append-only entry storage, lazy registration, and
//! the emission path shared by every call site.

use std::fmt;
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};

use sitelog_sink::DynSink;

use crate::config::LogConfig;
use crate::debug_registry;
use crate::entry::{Entry, RegistryId, Slot};
use crate::error::ConfigError;
use crate::levels::Severity;
use crate::thread_local::{enter_sink, with_scratch};

mod level;
mod sink;

macro_rules! bad_pattern_template {
    () => {
        "e: bad regex expression '{}'"
    };
}

macro_rules! report_template {
    () => {
        "i: sitelog v{}: {}"
    };
}

pub(crate) use report_template;

/// Call sites the registry itself logs through.
///
/// They are owned by the registry and never join the call-site list, so
/// traversals, counts and the shutdown summary see user call sites only.
/// The level engine still recomputes them with every threshold change.
struct InternalSites {
    bad_pattern: Entry,
    report: Entry,
}

impl InternalSites {
    const fn new() -> Self {
        Self {
            bad_pattern: Entry::new(bad_pattern_template!()),
            report: Entry::new(report_template!()),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &Entry> {
        [&self.bad_pattern, &self.report].into_iter()
    }
}

/// Process-wide collection of call-site entries.
///
/// Entries join lazily, the first time their call site runs, and stay for the
/// lifetime of the process. The registry also holds the shared threshold, the
/// output sink, and the policy applied to templates with an unknown marker.
///
/// All topology changes, threshold stores, and engine traversals are
/// serialized by one mutex. That mutex is never held while a line is being
/// formatted or written, so the registry can log its own diagnostics.
///
/// # Examples
///
/// ```
/// use sitelog::{Entry, Registry, Severity};
///
/// let registry = Registry::without_sink();
/// let failed = Entry::leak("E: failed {}");
/// let started = Entry::leak("I: started");
/// registry.register(failed);
/// registry.register(started);
///
/// registry.set_severity(Severity::Error);
/// assert!(failed.is_enabled());
/// assert!(!started.is_enabled());
/// ```
pub struct Registry {
    id: RegistryId,
    entries: Mutex<Vec<&'static Entry>>,
    threshold: AtomicU8,
    invalid_marker_enabled: AtomicBool,
    quiet: AtomicBool,
    append_newline: AtomicBool,
    sink: Mutex<Option<DynSink>>,
    sink_ready: AtomicBool,
    internal: InternalSites,
}

impl Registry {
    /// Creates a registry writing to standard error with the Notice threshold.
    #[must_use]
    pub fn new() -> Self {
        let registry = Self::without_sink();
        registry.set_message_sink(DynSink::stderr());
        registry
    }

    /// Creates a registry with no sink; every call site stays silent until
    /// one is configured.
    #[must_use]
    pub fn without_sink() -> Self {
        let registry = Self {
            id: RegistryId::next(),
            entries: Mutex::new(Vec::new()),
            threshold: AtomicU8::new(Severity::Notice.rank()),
            invalid_marker_enabled: AtomicBool::new(true),
            quiet: AtomicBool::new(false),
            append_newline: AtomicBool::new(true),
            sink: Mutex::new(None),
            sink_ready: AtomicBool::new(false),
            internal: InternalSites::new(),
        };
        registry.recompute_internal();
        registry
    }

    /// Creates a standard-error registry and applies `config` to it.
    pub fn with_config(config: &LogConfig) -> Result<Self, ConfigError> {
        let registry = Self::new();
        config.apply(&registry)?;
        Ok(registry)
    }

    /// Returns the process-wide registry used by [`sitelog!`](crate::sitelog)
    /// when no explicit registry is named.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Returns this registry's identifier.
    #[must_use]
    pub const fn id(&self) -> RegistryId {
        self.id
    }

    pub(crate) fn lock_entries(&self) -> MutexGuard<'_, Vec<&'static Entry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    /// Registers `entry`, computing its initial enabled state from the current
    /// threshold.
    ///
    /// Returns `true` when this call performed the registration and `false`
    /// when the entry had already joined this or another registry.
    pub fn register(&self, entry: &'static Entry) -> bool {
        let mut inserted = false;
        entry.slot_or_init(|| {
            inserted = true;
            self.insert(entry)
        });
        inserted
    }

    fn insert(&self, entry: &'static Entry) -> Slot {
        let mut entries = self.lock_entries();
        let enabled = self.decide(entry.message());
        entry.store_enabled(enabled);
        let slot = Slot::new(self.id, entries.len());
        entries.push(entry);
        drop(entries);

        debug_registry::trace_entry_registered(entry.message(), enabled, slot.index());
        slot
    }

    /// Hot-path check performed by every call site.
    ///
    /// Registers the entry on its first use, then reports whether a line
    /// should be written: the entry is enabled, a sink is configured, and the
    /// entry belongs to this registry.
    #[inline(always)]
    pub fn admit(&self, entry: &'static Entry) -> bool {
        let slot = entry.slot_or_init(|| self.insert(entry));
        entry.is_enabled() && self.sink_ready.load(Ordering::Relaxed) && slot.owner() == self.id
    }

    /// Formats `args` and writes the result as one line to the sink.
    ///
    /// Formatting completes before the sink is locked. Write failures are the
    /// sink's concern and are discarded.
    ///
    /// A line produced while this thread is already inside the sink (a
    /// writer that itself logs) is dropped instead of deadlocking.
    pub fn emit(&self, args: fmt::Arguments<'_>) {
        with_scratch(|line| {
            if fmt::write(line, args).is_err() {
                return;
            }
            enter_sink(|| {
                if let Some(sink) = self.lock_sink().as_mut() {
                    let _ = sink.write_line(line);
                }
            });
        });
    }

    /// Returns a snapshot traversal of every registered entry, most recently
    /// registered first.
    ///
    /// Entries registered after the snapshot is taken are not visited. The
    /// returned iterator can be cloned to walk the same snapshot again.
    #[must_use]
    pub fn entries(&self) -> Entries {
        let snapshot = self.lock_entries().clone();
        Entries {
            inner: snapshot.into_iter().rev(),
        }
    }

    /// Visits every registered entry. The visitor may log freely.
    pub fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&'static Entry),
    {
        self.entries().for_each(visit);
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// Reports whether no entry has registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    /// Number of registered entries currently enabled.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.lock_entries()
            .iter()
            .filter(|entry| entry.is_enabled())
            .count()
    }

    /// Enables or silences the registry's own informational output.
    pub fn set_quiet(&self, quiet: bool) {
        self.quiet.store(quiet, Ordering::Relaxed);
    }

    /// Reports whether the registry's own informational output is silenced.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.quiet.load(Ordering::Relaxed)
    }

    /// Recomputes the internal call sites. Callers that race with the level
    /// engine must hold the entries lock.
    pub(super) fn recompute_internal(&self) {
        for site in self.internal.iter() {
            site.store_enabled(self.decide(site.message()));
        }
    }

    fn admit_internal(&self, site: &Entry) -> bool {
        site.is_enabled() && self.sink_ready.load(Ordering::Relaxed)
    }

    pub(crate) fn log_bad_pattern(&self, pattern: &str) {
        if self.admit_internal(&self.internal.bad_pattern) {
            self.emit(format_args!(bad_pattern_template!(), pattern));
        }
    }

    pub(crate) fn log_report(&self, args: fmt::Arguments<'_>) {
        if self.admit_internal(&self.internal.report) {
            self.emit(args);
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("id", &self.id)
            .field("entries", &self.len())
            .field("level", &self.level())
            .field("has_sink", &self.has_sink())
            .field("quiet", &self.is_quiet())
            .finish_non_exhaustive()
    }
}

/// Snapshot iterator returned by [`Registry::entries`].
#[derive(Clone, Debug)]
pub struct Entries {
    inner: std::iter::Rev<std::vec::IntoIter<&'static Entry>>,
}

impl Iterator for Entries {
    type Item = &'static Entry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Entries {}

impl FusedIterator for Entries {}
