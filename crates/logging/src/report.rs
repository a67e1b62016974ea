//! crates/logging/src/report.rs
//! Shutdown summary and the session guard that brackets a program's use of
//! the facility.

use std::fmt;

use crate::config::LogConfig;
use crate::debug_registry;
use crate::error::ConfigError;
use crate::registry::{Registry, report_template};

/// Registry counts produced at shutdown.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Threshold in force.
    pub level: u8,
    /// Registered call sites.
    pub entries: usize,
    /// Registered call sites currently enabled.
    pub enabled: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level = {}, n_entries = {}, n_enabled = {}",
            self.level, self.entries, self.enabled
        )
    }
}

impl Registry {
    /// Counts the registry without logging anything.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let entries = self.lock_entries();
        Summary {
            level: self.level(),
            entries: entries.len(),
            enabled: entries.iter().filter(|entry| entry.is_enabled()).count(),
        }
    }

    /// Produces the shutdown report.
    ///
    /// The counts are taken first; unless the registry is quiet the summary is
    /// then logged at Info severity through the registry's own call site.
    /// Internal call sites are never part of the counts.
    pub fn report(&self) -> Summary {
        let summary = self.summary();
        if !self.is_quiet() {
            self.log_report(format_args!(report_template!(), crate::VERSION, summary));
        }
        debug_registry::trace_report(&summary);
        summary
    }
}

/// Guard returned by [`init`] that runs the shutdown hook when dropped.
///
/// Dropping the session logs the report and flushes the sink. Use
/// [`Session::finish`] to run the hook early and keep the counts.
#[must_use = "dropping the session immediately runs the shutdown report"]
pub struct Session<'a> {
    registry: &'a Registry,
    finished: bool,
}

impl<'a> Session<'a> {
    /// Binds a session to an explicit registry.
    pub fn for_registry(registry: &'a Registry) -> Self {
        Self {
            registry,
            finished: false,
        }
    }

    /// Returns the registry this session reports on.
    #[must_use]
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Runs the shutdown hook now and returns its summary.
    pub fn finish(mut self) -> Summary {
        self.finished = true;
        self.shutdown()
    }

    fn shutdown(&self) -> Summary {
        let summary = self.registry.report();
        let _ = self.registry.flush();
        summary
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.shutdown();
        }
    }
}

impl fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("registry", &self.registry.id())
            .field("finished", &self.finished)
            .finish()
    }
}

/// Startup hook for the process-wide registry.
///
/// Applies `config` to [`Registry::global`], whose sink defaults to standard
/// error, and returns the session that reports at shutdown.
///
/// ```no_run
/// use sitelog::{LogConfig, Severity, sitelog};
///
/// fn main() -> Result<(), sitelog::ConfigError> {
///     let _session = sitelog::init(&LogConfig::default().with_level(Severity::Info))?;
///     sitelog!("I: started with {} workers", 4);
///     Ok(())
/// }
/// ```
pub fn init(config: &LogConfig) -> Result<Session<'static>, ConfigError> {
    let registry = Registry::global();
    config.apply(registry)?;
    Ok(Session::for_registry(registry))
}
