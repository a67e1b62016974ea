//! crates/logging/src/debug_registry.rs
//! Tracing hooks for registry maintenance.
//!
//! The facility's own developer diagnostics (which call sites registered,
//! when thresholds and patterns were applied) are emitted through the
//! `tracing` crate when the `tracing` feature is enabled, and compile to
//! empty inline functions otherwise.

#[cfg(feature = "tracing")]
use crate::report::Summary;

/// Target name for registry tracing events.
#[cfg(feature = "tracing")]
const REGISTRY_TARGET: &str = "sitelog::registry";

// ============================================================================
// Tracing functions (feature-gated)
// ============================================================================

/// Traces a call site joining the registry.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_entry_registered(message: &str, enabled: bool, index: usize) {
    tracing::trace!(
        target: REGISTRY_TARGET,
        template = %message,
        enabled = enabled,
        index = index,
        "entry_registered"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_entry_registered(_message: &str, _enabled: bool, _index: usize) {}

/// Traces a threshold recompute across all entries.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_threshold_applied(level: u8, entries: usize, enabled: usize) {
    tracing::debug!(
        target: REGISTRY_TARGET,
        level = level,
        entries = entries,
        enabled = enabled,
        "threshold_applied"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_threshold_applied(_level: u8, _entries: usize, _enabled: usize) {}

/// Traces a pattern toggle.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_pattern_applied(pattern: &str, enabled: bool, matched: usize) {
    tracing::debug!(
        target: REGISTRY_TARGET,
        pattern = %pattern,
        enabled = enabled,
        matched = matched,
        "pattern_applied"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_pattern_applied(_pattern: &str, _enabled: bool, _matched: usize) {}

/// Traces a pattern that failed to compile.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_pattern_rejected(pattern: &str, error: &regex::Error) {
    tracing::warn!(
        target: REGISTRY_TARGET,
        pattern = %pattern,
        error = %error,
        "pattern_rejected"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_pattern_rejected(_pattern: &str, _error: &regex::Error) {}

/// Traces the shutdown summary.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_report(summary: &Summary) {
    tracing::info!(
        target: REGISTRY_TARGET,
        level = summary.level,
        entries = summary.entries,
        enabled = summary.enabled,
        "report"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_report(_summary: &crate::report::Summary) {}
