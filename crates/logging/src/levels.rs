//! crates/logging/src/levels.rs
//! Severity scale and the marker codec that maps message templates to ranks.

use std::fmt;
use std::str::FromStr;

use crate::error::LevelError;

/// Marker letters in rank order, most severe first.
pub const MARKERS: &str = "0acewnid";

/// Syslog-style severity scale. Lower rank means more severe.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Severity {
    /// System is unusable (`0`).
    Emergency = 0,
    /// Action must be taken immediately (`a`).
    Alert = 1,
    /// Critical conditions (`c`).
    Critical = 2,
    /// Error conditions (`e`).
    Error = 3,
    /// Warning conditions (`w`).
    Warning = 4,
    /// Normal but significant conditions (`n`).
    #[default]
    Notice = 5,
    /// Informational messages (`i`).
    Info = 6,
    /// Debug-level messages (`d`).
    Debug = 7,
}

impl Severity {
    /// Every severity, most severe first.
    pub const ALL: [Self; 8] = [
        Self::Emergency,
        Self::Alert,
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Notice,
        Self::Info,
        Self::Debug,
    ];

    /// Returns the numeric rank in `0..=7`.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Looks up the severity for a rank.
    #[must_use]
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(Self::Emergency),
            1 => Some(Self::Alert),
            2 => Some(Self::Critical),
            3 => Some(Self::Error),
            4 => Some(Self::Warning),
            5 => Some(Self::Notice),
            6 => Some(Self::Info),
            7 => Some(Self::Debug),
            _ => None,
        }
    }

    /// Returns the lower-case marker letter for this severity.
    #[must_use]
    pub const fn marker(self) -> char {
        MARKERS.as_bytes()[self as usize] as char
    }

    /// Decodes a marker character, ignoring ASCII case.
    ///
    /// ```
    /// use sitelog::Severity;
    ///
    /// assert_eq!(Severity::from_marker('E'), Some(Severity::Error));
    /// assert_eq!(Severity::from_marker('0'), Some(Severity::Emergency));
    /// assert_eq!(Severity::from_marker('x'), None);
    /// ```
    #[must_use]
    pub fn from_marker(marker: char) -> Option<Self> {
        let lowered = marker.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|severity| severity.marker() == lowered)
    }

    /// Returns the lower-case name of the severity.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Alert => "alert",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let severity = match name {
            "emergency" | "emerg" | "panic" => Self::Emergency,
            "alert" => Self::Alert,
            "critical" | "crit" => Self::Critical,
            "error" | "err" => Self::Error,
            "warning" | "warn" => Self::Warning,
            "notice" => Self::Notice,
            "info" => Self::Info,
            "debug" => Self::Debug,
            _ => return None,
        };
        Some(severity)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Severity {
    type Error = LevelError;

    fn try_from(rank: u8) -> Result<Self, LevelError> {
        Self::from_rank(rank).ok_or(LevelError::RankOutOfRange(rank))
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.rank()
    }
}

impl FromStr for Severity {
    type Err = LevelError;

    /// Accepts a decimal rank, a single marker letter, or a level name.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            let rank: u8 = token
                .parse()
                .map_err(|_| LevelError::UnknownLevel(token.to_owned()))?;
            return Self::try_from(rank);
        }

        let mut chars = token.chars();
        if let (Some(marker), None) = (chars.next(), chars.next()) {
            return Self::from_marker(marker)
                .ok_or_else(|| LevelError::UnknownLevel(token.to_owned()));
        }

        Self::from_name(&token.to_ascii_lowercase())
            .ok_or_else(|| LevelError::UnknownLevel(token.to_owned()))
    }
}

/// What the registry decides for templates whose marker cannot be decoded.
///
/// The rank lookup reports "not found" with a value below every valid rank,
/// which satisfies any threshold comparison. [`MarkerPolicy::AlwaysEnabled`]
/// keeps that behaviour; [`MarkerPolicy::AlwaysDisabled`] silences such sites
/// instead.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MarkerPolicy {
    /// Invalid markers pass every threshold.
    #[default]
    AlwaysEnabled,
    /// Invalid markers pass no threshold.
    AlwaysDisabled,
}

impl MarkerPolicy {
    /// Returns the enabled state given to entries with an invalid marker.
    #[must_use]
    pub const fn admits(self) -> bool {
        matches!(self, Self::AlwaysEnabled)
    }
}

impl From<bool> for MarkerPolicy {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::AlwaysEnabled
        } else {
            Self::AlwaysDisabled
        }
    }
}

/// Decodes the severity of a template from its first character.
///
/// Returns `None` for an empty template or an unknown marker. Never allocates.
#[must_use]
pub fn severity_of(template: &str) -> Option<Severity> {
    template.chars().next().and_then(Severity::from_marker)
}

/// Returns the rank of a template's severity marker.
///
/// ```
/// use sitelog::{LevelError, rank_of};
///
/// assert_eq!(rank_of("E: failed {}"), Ok(3));
/// assert_eq!(rank_of("d: trace"), Ok(7));
/// assert!(matches!(rank_of("?: odd"), Err(LevelError::InvalidMarker { .. })));
/// ```
pub fn rank_of(template: &str) -> Result<u8, LevelError> {
    severity_of(template)
        .map(Severity::rank)
        .ok_or_else(|| LevelError::InvalidMarker {
            template: template.to_owned(),
        })
}
