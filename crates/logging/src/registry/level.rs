//! crates/logging/src/registry/level.rs
//! Threshold engine: recomputes every entry's enabled flag from its marker.

use std::sync::atomic::Ordering;

use super::Registry;
use crate::debug_registry;
use crate::levels::{MarkerPolicy, Severity, severity_of};

impl Registry {
    /// Sets the threshold and recomputes every registered entry.
    ///
    /// An entry is enabled when its marker rank is at most `level`. Entries
    /// with an invalid marker follow the [`MarkerPolicy`]. Values above 7
    /// behave like 7 and enable every valid entry. The lowest threshold is 0,
    /// which still enables Emergency entries. To silence every valid entry
    /// while invalid ones stay enabled, disable them by pattern afterwards.
    ///
    /// The store and the walk happen under the registry lock, so a concurrent
    /// registration either sees the new threshold or is visited by the walk.
    /// Any pattern overrides applied earlier are lost.
    pub fn set_level(&self, level: u8) {
        let entries = self.lock_entries();
        self.threshold.store(level, Ordering::Relaxed);
        let mut enabled = 0;
        for entry in entries.iter() {
            let decision = self.decide(entry.message());
            entry.store_enabled(decision);
            enabled += usize::from(decision);
        }
        self.recompute_internal();
        let total = entries.len();
        drop(entries);

        debug_registry::trace_threshold_applied(level, total, enabled);
    }

    /// Typed form of [`Registry::set_level`].
    pub fn set_severity(&self, severity: Severity) {
        self.set_level(severity.rank());
    }

    /// Returns the most recently applied threshold.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.threshold.load(Ordering::Relaxed)
    }

    /// Returns the threshold as a severity, clamping values above 7 to
    /// [`Severity::Debug`].
    #[must_use]
    pub fn severity(&self) -> Severity {
        Severity::from_rank(self.level()).unwrap_or(Severity::Debug)
    }

    /// Returns the policy applied to templates with an invalid marker.
    #[must_use]
    pub fn marker_policy(&self) -> MarkerPolicy {
        MarkerPolicy::from(self.invalid_marker_enabled.load(Ordering::Relaxed))
    }

    /// Changes the invalid-marker policy.
    ///
    /// Takes effect at the next registration or threshold change; the flags of
    /// already-registered entries are left alone.
    pub fn set_marker_policy(&self, policy: MarkerPolicy) {
        self.invalid_marker_enabled
            .store(policy.admits(), Ordering::Relaxed);
    }

    pub(super) fn decide(&self, template: &str) -> bool {
        match severity_of(template) {
            Some(severity) => severity.rank() <= self.level(),
            None => self.marker_policy().admits(),
        }
    }
}
