//! crates/logging/src/pattern.rs
//! Pattern engine: bulk enable or disable of call sites whose template
//! matches a regular expression, independent of severity.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::debug_registry;
use crate::error::PatternError;
use crate::registry::Registry;

impl Registry {
    /// Sets `enabled` on every registered entry whose template contains a
    /// match for `pattern`, returning how many entries matched.
    ///
    /// Matching is an unanchored search, so `"trace"` matches
    /// `"D: trace {}"`. The override lasts until the next threshold change.
    /// Only entries registered before the call are affected.
    ///
    /// When `pattern` does not compile, the diagnostic
    /// `e: bad regex expression '<pattern>'` is written through the registry
    /// itself and the error is returned without touching any entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitelog::{Entry, Registry};
    ///
    /// let registry = Registry::without_sink();
    /// let trace = Entry::leak("D: trace {}");
    /// registry.register(trace);
    /// assert!(!trace.is_enabled());
    ///
    /// assert_eq!(registry.enable_by_pattern("trace", true).unwrap(), 1);
    /// assert!(trace.is_enabled());
    /// assert!(registry.enable_by_pattern("[invalid(", true).is_err());
    /// ```
    pub fn enable_by_pattern(&self, pattern: &str, enabled: bool) -> Result<usize, PatternError> {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(error) => {
                self.log_bad_pattern(pattern);
                debug_registry::trace_pattern_rejected(pattern, &error);
                return Err(PatternError::new(pattern, error));
            }
        };
        Ok(self.enable_by_regex(&regex, enabled))
    }

    /// Precompiled form of [`Registry::enable_by_pattern`].
    pub fn enable_by_regex(&self, regex: &Regex, enabled: bool) -> usize {
        let entries = self.lock_entries();
        let mut matched = 0;
        for entry in entries.iter().filter(|entry| regex.is_match(entry.message())) {
            entry.store_enabled(enabled);
            matched += 1;
        }
        drop(entries);

        debug_registry::trace_pattern_applied(regex.as_str(), enabled, matched);
        matched
    }

    /// Applies `directives` in order and returns the total number of matches.
    ///
    /// Stops at the first directive that fails to compile; directives before
    /// it stay applied.
    pub fn apply_directives<'a, I>(&self, directives: I) -> Result<usize, PatternError>
    where
        I: IntoIterator<Item = &'a PatternDirective>,
    {
        directives.into_iter().try_fold(0, |total, directive| {
            self.enable_by_pattern(&directive.pattern, directive.enabled)
                .map(|matched| total + matched)
        })
    }
}

/// One enable or disable request, written `+pattern` or `-pattern`.
///
/// A pattern without a sign means enable. Only the first character is
/// treated as a sign, so `--x` disables entries matching `-x`.
///
/// ```
/// use sitelog::PatternDirective;
///
/// let directive: PatternDirective = "-^D: ".parse().unwrap();
/// assert_eq!(directive.pattern, "^D: ");
/// assert!(!directive.enabled);
/// assert_eq!(directive.to_string(), "-^D: ");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternDirective {
    /// Regular expression searched for in each template.
    pub pattern: String,
    /// State given to matching entries.
    pub enabled: bool,
}

impl PatternDirective {
    /// Builds a directive that enables matching entries.
    pub fn enable(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            enabled: true,
        }
    }

    /// Builds a directive that disables matching entries.
    pub fn disable(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            enabled: false,
        }
    }

    /// Compiles the pattern without applying it.
    pub fn compile(&self) -> Result<Regex, PatternError> {
        Regex::new(&self.pattern).map_err(|error| PatternError::new(&*self.pattern, error))
    }
}

impl FromStr for PatternDirective {
    type Err = std::convert::Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let directive = if let Some(pattern) = text.strip_prefix('+') {
            Self::enable(pattern)
        } else if let Some(pattern) = text.strip_prefix('-') {
            Self::disable(pattern)
        } else {
            Self::enable(text)
        };
        Ok(directive)
    }
}

impl fmt::Display for PatternDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.enabled { '+' } else { '-' };
        write!(f, "{sign}{}", self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Entry;

    fn population(registry: &Registry) -> [&'static Entry; 3] {
        let entries = [
            Entry::leak("E: failed {}"),
            Entry::leak("I: started"),
            Entry::leak("D: trace {}"),
        ];
        for entry in entries {
            registry.register(entry);
        }
        entries
    }

    #[test]
    fn pattern_overrides_threshold() {
        let registry = Registry::without_sink();
        let [failed, started, trace] = population(&registry);
        registry.set_level(3);

        assert_eq!(registry.enable_by_pattern("trace", true).unwrap(), 1);
        assert!(failed.is_enabled());
        assert!(!started.is_enabled());
        assert!(trace.is_enabled());
    }

    #[test]
    fn disable_matches_marker_prefix() {
        let registry = Registry::without_sink();
        registry.set_level(7);
        let [failed, started, trace] = population(&registry);

        assert_eq!(registry.enable_by_pattern("^[ID]:", false).unwrap(), 2);
        assert!(failed.is_enabled());
        assert!(!started.is_enabled());
        assert!(!trace.is_enabled());
    }

    #[test]
    fn invalid_pattern_leaves_entries_alone() {
        let registry = Registry::without_sink();
        let [failed, started, trace] = population(&registry);
        let before = [failed, started, trace].map(Entry::is_enabled);

        let error = registry.enable_by_pattern("[invalid(", true).unwrap_err();
        assert_eq!(error.pattern(), "[invalid(");
        assert_eq!([failed, started, trace].map(Entry::is_enabled), before);
    }

    #[test]
    fn threshold_change_clears_overrides() {
        let registry = Registry::without_sink();
        let [_, _, trace] = population(&registry);
        registry.enable_by_pattern("trace", true).unwrap();
        registry.set_level(5);
        assert!(!trace.is_enabled());
    }

    #[test]
    fn directives_parse_signs() {
        assert_eq!("+io".parse(), Ok(PatternDirective::enable("io")));
        assert_eq!("-io".parse(), Ok(PatternDirective::disable("io")));
        assert_eq!("io".parse(), Ok(PatternDirective::enable("io")));
        assert_eq!("--x".parse(), Ok(PatternDirective::disable("-x")));
    }

    #[test]
    fn apply_directives_sums_matches() {
        let registry = Registry::without_sink();
        population(&registry);
        let directives = [
            PatternDirective::enable("."),
            PatternDirective::disable("trace"),
        ];
        assert_eq!(registry.apply_directives(&directives).unwrap(), 4);
    }

    #[test]
    fn compile_reports_bad_patterns() {
        assert!(PatternDirective::enable("(").compile().is_err());
        assert!(PatternDirective::enable("a+").compile().is_ok());
    }
}
