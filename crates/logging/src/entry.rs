//! crates/logging/src/entry.rs
//! Per-call-site registry entries.

use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::levels::{Severity, severity_of};

/// Identifies one [`Registry`](crate::Registry) instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegistryId(u64);

impl RegistryId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Position of an entry inside the registry that owns it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    owner: RegistryId,
    index: usize,
}

impl Slot {
    pub(crate) const fn new(owner: RegistryId, index: usize) -> Self {
        Self { owner, index }
    }

    /// Registry the entry joined.
    #[must_use]
    pub const fn owner(self) -> RegistryId {
        self.owner
    }

    /// Registration order within that registry, starting at zero.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

/// Registry record for one call site.
///
/// Call sites hold their entry in a `static`, so an entry lives for the whole
/// process. The template is never copied or freed. The slot is written once,
/// when the entry first joins a registry, and doubles as the call site's
/// "already registered" latch.
///
/// ```
/// use sitelog::{Entry, Registry};
///
/// static ENTRY: Entry = Entry::new("W: low disk space");
///
/// let registry = Registry::without_sink();
/// assert!(!ENTRY.is_registered());
/// assert!(registry.register(&ENTRY));
/// assert!(!registry.register(&ENTRY));
/// assert!(ENTRY.is_enabled());
/// ```
pub struct Entry {
    enabled: AtomicBool,
    message: &'static str,
    slot: OnceLock<Slot>,
}

impl Entry {
    /// Creates an unregistered, disabled entry for `message`.
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self {
            enabled: AtomicBool::new(false),
            message,
            slot: OnceLock::new(),
        }
    }

    /// Allocates an entry that lives for the rest of the process.
    #[must_use]
    pub fn leak(message: &'static str) -> &'static Self {
        Box::leak(Box::new(Self::new(message)))
    }

    /// Returns the message template, marker included.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// Returns the cached enabled decision.
    #[inline(always)]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        // No ordering needed: the flag guards no other data.
        self.enabled.load(Ordering::Relaxed)
    }

    pub(crate) fn store_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Returns the slot assigned at registration.
    #[must_use]
    pub fn slot(&self) -> Option<Slot> {
        self.slot.get().copied()
    }

    /// Reports whether the entry has joined a registry.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Decodes the template's severity marker.
    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        severity_of(self.message)
    }

    #[inline(always)]
    pub(crate) fn slot_or_init(&self, init: impl FnOnce() -> Slot) -> Slot {
        *self.slot.get_or_init(init)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("message", &self.message)
            .field("enabled", &self.is_enabled())
            .field("slot", &self.slot())
            .finish()
    }
}
