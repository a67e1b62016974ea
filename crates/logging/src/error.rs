//! crates/logging/src/error.rs
//! Error types for marker decoding, pattern compilation and configuration.

use thiserror::Error;

/// Errors produced while decoding severities.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    /// The template's first character is not a known severity marker.
    #[error("invalid severity marker in template {template:?}")]
    InvalidMarker {
        /// The offending template.
        template: String,
    },
    /// A level name could not be recognised.
    #[error("unknown severity level '{0}'")]
    UnknownLevel(String),
    /// A numeric rank lies outside the eight-level scale.
    #[error("severity rank {0} is outside 0..=7")]
    RankOutOfRange(u8),
}

/// Error produced when a pattern cannot be compiled into a regular expression.
#[derive(Debug, Error)]
#[error("failed to compile pattern '{pattern}': {source}")]
pub struct PatternError {
    pattern: String,
    #[source]
    source: regex::Error,
}

impl PatternError {
    pub(crate) fn new(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self {
            pattern: pattern.into(),
            source,
        }
    }

    /// Returns the offending pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Errors produced while building or applying a [`LogConfig`](crate::LogConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A level setting could not be parsed.
    #[error(transparent)]
    Level(#[from] LevelError),
    /// A pattern directive failed to compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// An environment variable carried an unusable value.
    #[error("invalid value {value:?} for {var}")]
    InvalidValue {
        /// Name of the variable.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}
