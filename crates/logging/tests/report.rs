//! Integration tests for the shutdown summary and session guard.
//!
//! The report counts registered and enabled call sites, then logs the result
//! through the registry's own informational call site.

use sitelog::{Entry, LogConfig, Registry, Session, Severity, Summary, VERSION, sitelog};
use sitelog_test_support::CaptureBuffer;

fn capture_registry() -> (Registry, CaptureBuffer) {
    let registry = Registry::without_sink();
    let capture = CaptureBuffer::new();
    registry.set_sink(capture.clone());
    (registry, capture)
}

fn scenario_population(registry: &Registry) {
    for template in ["E: failed {}", "I: started", "D: trace {}"] {
        registry.register(Entry::leak(template));
    }
}

// ============================================================================
// Summary Tests
// ============================================================================

/// Verifies the report counts the three scenario entries.
#[test]
fn report_counts_scenario_population() {
    let (registry, _capture) = capture_registry();
    scenario_population(&registry);
    registry.set_level(3);

    let summary = registry.report();

    assert_eq!(
        summary,
        Summary {
            level: 3,
            entries: 3,
            enabled: 1,
        }
    );
}

/// Verifies the summary line is logged when Info is enabled.
#[test]
fn report_is_logged_at_info() {
    let (registry, capture) = capture_registry();
    scenario_population(&registry);
    registry.set_level(6);

    registry.report();

    assert_eq!(
        capture.lines(),
        [format!(
            "i: sitelog v{VERSION}: level = 6, n_entries = 3, n_enabled = 2"
        )]
    );
}

/// Verifies the default Notice threshold hides the report line.
#[test]
fn report_is_hidden_at_notice() {
    let (registry, capture) = capture_registry();
    scenario_population(&registry);

    let summary = registry.report();

    assert_eq!(summary.entries, 3);
    assert!(capture.is_empty());
}

/// Verifies quiet mode suppresses the line but still returns counts.
#[test]
fn quiet_mode_suppresses_report() {
    let (registry, capture) = capture_registry();
    scenario_population(&registry);
    registry.set_level(7);
    registry.set_quiet(true);

    let summary = registry.report();

    assert_eq!(summary.enabled, 3);
    assert!(capture.is_empty());
    assert_eq!(registry.len(), 3);
}

/// Verifies `summary` never logs.
#[test]
fn summary_is_silent() {
    let (registry, capture) = capture_registry();
    registry.set_level(7);
    sitelog!(in &registry; "d: one");
    capture.take();

    let summary = registry.summary();

    assert_eq!(summary.entries, 1);
    assert!(capture.is_empty());
}

/// Verifies the scenario sequence on one registry still reports three entries.
#[test]
fn scenario_sequence_reports_only_call_sites() {
    let (registry, capture) = capture_registry();
    scenario_population(&registry);

    registry.set_level(3);
    registry.set_level(7);
    registry.set_level(3);
    assert_eq!(registry.enable_by_pattern("trace", true).unwrap(), 1);
    assert!(registry.enable_by_pattern("[invalid(", true).is_err());

    let summary = registry.report();
    assert_eq!(
        summary,
        Summary {
            level: 3,
            entries: 3,
            enabled: 2,
        }
    );
    assert_eq!(registry.report(), summary);
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.entries().count(), 3);
    assert_eq!(capture.lines(), ["e: bad regex expression '[invalid('"]);
}

/// Verifies a pattern matching every template leaves internal sites alone.
#[test]
fn catch_all_pattern_counts_only_call_sites() {
    let (registry, _capture) = capture_registry();
    registry.set_level(6);
    registry.report();
    assert!(registry.enable_by_pattern("(", true).is_err());
    scenario_population(&registry);

    assert_eq!(registry.enable_by_pattern("", false).unwrap(), 3);
    assert_eq!(registry.summary().enabled, 0);
}

// ============================================================================
// Session Tests
// ============================================================================

/// Verifies dropping a session produces one report.
#[test]
fn session_reports_on_drop() {
    let (registry, capture) = capture_registry();
    registry.set_level(6);
    {
        let _session = Session::for_registry(&registry);
        sitelog!(in &registry; "n: working");
    }

    let lines = capture.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "n: working");
    assert!(lines[1].ends_with("level = 6, n_entries = 1, n_enabled = 1"));
}

/// Verifies `finish` returns the summary and does not report twice.
#[test]
fn session_finish_reports_once() {
    let (registry, capture) = capture_registry();
    registry.set_level(7);
    let session = Session::for_registry(&registry);
    scenario_population(&registry);

    let summary = session.finish();

    assert_eq!(summary.entries, 3);
    assert_eq!(capture.lines().len(), 1);
}

/// Verifies the global startup hook applies the configuration.
#[test]
fn init_configures_global_registry() {
    let config = LogConfig::default()
        .with_level(Severity::Warning)
        .with_quiet(true);
    let session = sitelog::init(&config).unwrap();
    let registry = session.registry();

    sitelog!("W: visible through the global registry");
    sitelog!("n: hidden through the global registry");

    assert!(std::ptr::eq(registry, Registry::global()));
    assert_eq!(registry.level(), 4);
    assert!(registry.has_sink());
    let summary = session.finish();
    assert_eq!(summary.entries, 2);
    assert_eq!(summary.enabled, 1);
}
