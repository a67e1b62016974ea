//! crates/logging/src/config.rs
//! Startup configuration: threshold, invalid-marker policy, quiet mode, line
//! mode and pattern directives, optionally read from the environment.

use sitelog_sink::LineMode;

use crate::error::ConfigError;
use crate::levels::{MarkerPolicy, Severity};
use crate::pattern::PatternDirective;
use crate::registry::Registry;

/// Environment variable holding the threshold.
pub const ENV_LEVEL: &str = "SITELOG_LEVEL";
/// Environment variable silencing the shutdown report.
pub const ENV_QUIET: &str = "SITELOG_QUIET";
/// Environment variable holding comma-separated pattern directives.
pub const ENV_PATTERNS: &str = "SITELOG_PATTERNS";
/// Environment variable selecting the invalid-marker policy.
pub const ENV_INVALID_MARKER: &str = "SITELOG_INVALID_MARKER";

/// Settings applied to a [`Registry`] at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Threshold for the level engine.
    pub level: Severity,
    /// Decision for templates without a valid marker.
    pub invalid_marker: MarkerPolicy,
    /// Suppresses the shutdown report.
    pub quiet: bool,
    /// Whether emitted lines end with a newline.
    pub line_mode: LineMode,
    /// Pattern toggles applied after the threshold.
    pub directives: Vec<PatternDirective>,
}

impl LogConfig {
    /// Sets the threshold.
    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    /// Sets the invalid-marker policy.
    pub fn with_invalid_marker(mut self, policy: MarkerPolicy) -> Self {
        self.invalid_marker = policy;
        self
    }

    /// Enables or disables quiet mode.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Sets the line mode.
    pub fn with_line_mode(mut self, line_mode: LineMode) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Appends a pattern directive.
    pub fn with_directive(mut self, directive: PatternDirective) -> Self {
        self.directives.push(directive);
        self
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value. Unset variables keep their defaults.
    ///
    /// ```
    /// use sitelog::{LogConfig, Severity};
    ///
    /// let config = LogConfig::from_env_with(|name| match name {
    ///     "SITELOG_LEVEL" => Some("debug".to_owned()),
    ///     "SITELOG_PATTERNS" => Some("-trace, +io".to_owned()),
    ///     _ => None,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(config.level, Severity::Debug);
    /// assert_eq!(config.directives.len(), 2);
    /// ```
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup(ENV_LEVEL) {
            config.level = level.parse()?;
        }

        if let Some(quiet) = lookup(ENV_QUIET) {
            config.quiet = parse_switch(ENV_QUIET, &quiet)?;
        }

        if let Some(policy) = lookup(ENV_INVALID_MARKER) {
            config.invalid_marker = match policy.trim().to_ascii_lowercase().as_str() {
                "enabled" | "enable" | "on" => MarkerPolicy::AlwaysEnabled,
                "disabled" | "disable" | "off" => MarkerPolicy::AlwaysDisabled,
                _ => return Err(invalid(ENV_INVALID_MARKER, &policy)),
            };
        }

        if let Some(patterns) = lookup(ENV_PATTERNS) {
            config.directives = parse_directives(&patterns);
        }

        Ok(config)
    }

    /// Applies the configuration to `registry` and returns how many entries
    /// the directives matched.
    ///
    /// Policy, quiet mode and line mode are set first, then the threshold,
    /// then the directives in order. Directives only reach call sites that
    /// have already registered.
    pub fn apply(&self, registry: &Registry) -> Result<usize, ConfigError> {
        registry.set_marker_policy(self.invalid_marker);
        registry.set_quiet(self.quiet);
        registry.set_line_mode(self.line_mode);
        registry.set_severity(self.level);
        Ok(registry.apply_directives(&self.directives)?)
    }
}

/// Splits a comma-separated directive list, skipping empty items.
fn parse_directives(list: &str) -> Vec<PatternDirective> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match item.parse() {
            Ok(directive) => directive,
            Err(never) => match never {},
        })
        .collect()
}

fn parse_switch(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(var, value)),
    }
}

fn invalid(var: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value: value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[test]
    fn defaults_match_registry_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.level, Severity::Notice);
        assert_eq!(config.invalid_marker, MarkerPolicy::AlwaysEnabled);
        assert!(!config.quiet);
        assert_eq!(config.line_mode, LineMode::WithNewline);
        assert!(config.directives.is_empty());
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = LogConfig::from_env_with(|_| None).unwrap();
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn switches_accept_common_spellings() {
        for value in ["1", "true", "YES", "on"] {
            assert!(parse_switch(ENV_QUIET, value).unwrap(), "{value}");
        }
        for value in ["0", "false", "No", "off"] {
            assert!(!parse_switch(ENV_QUIET, value).unwrap(), "{value}");
        }
        assert!(parse_switch(ENV_QUIET, "maybe").is_err());
    }

    #[test]
    fn directive_lists_skip_blanks() {
        let directives = parse_directives(" +io, ,-trace,");
        assert_eq!(
            directives,
            [PatternDirective::enable("io"), PatternDirective::disable("trace")]
        );
    }

    #[test]
    fn invalid_policy_is_reported_with_variable_name() {
        let error = LogConfig::from_env_with(lookup(&[(ENV_INVALID_MARKER, "sometimes")]))
            .unwrap_err();
        assert!(matches!(
            error,
            ConfigError::InvalidValue { var: ENV_INVALID_MARKER, .. }
        ));
    }

    #[test]
    fn apply_sets_threshold_and_policy() {
        let registry = Registry::without_sink();
        let config = LogConfig::default()
            .with_level(Severity::Debug)
            .with_invalid_marker(MarkerPolicy::AlwaysDisabled)
            .with_quiet(true);

        assert_eq!(config.apply(&registry).unwrap(), 0);
        assert_eq!(registry.level(), 7);
        assert_eq!(registry.marker_policy(), MarkerPolicy::AlwaysDisabled);
        assert!(registry.is_quiet());
    }
}
