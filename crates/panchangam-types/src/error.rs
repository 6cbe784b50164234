use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Resolution stage at which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Sunrise,
    Sunset,
    NextSunrise,
    SankrantiSearch,
    EpochDay,
    CivilConversion,
    TithiSearch,
    NakshatraSearch,
    Chart,
    Export,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Sunrise => "sunrise",
            Stage::Sunset => "sunset",
            Stage::NextSunrise => "next sunrise",
            Stage::SankrantiSearch => "sankranti search",
            Stage::EpochDay => "epoch day",
            Stage::CivilConversion => "civil time conversion",
            Stage::TithiSearch => "tithi search",
            Stage::NakshatraSearch => "nakshatra search",
            Stage::Chart => "chart positions",
            Stage::Export => "export",
        };
        write!(f, "{}", s)
    }
}

/// Errors from panchangam operations.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum PanchangError {
    /// The ephemeris reported a non-zero status or returned an unusable value.
    #[error("Ephemeris failure (status {status}): {reason}")]
    Ephemeris { status: i32, reason: String },

    /// No zodiac ingress was found in the backward search window.
    #[error("No sankranti found within {days} days before JD {before_jd:.5}")]
    BoundaryNotFound { before_jd: f64, days: u32 },

    /// The derived day ordinal is below 1.
    #[error("Day ordinal {day} is below 1 for {date}")]
    CalendarInvariant { date: NaiveDate, day: i64 },

    /// Place name not present in the registry.
    #[error("Unknown place: {place}")]
    LocationResolution { place: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Text that does not name a value of the expected kind.
    #[error("Cannot parse '{input}' as {expected}")]
    Parse { input: String, expected: String },

    /// An index outside the range of its type.
    #[error("{what} {value} outside {range}")]
    OutOfRange { what: String, value: i64, range: String },

    /// A failure tagged with the stage it came from.
    #[error("{stage} failed: {source}")]
    AtStage {
        stage: Stage,
        source: Box<PanchangError>,
    },
}

impl PanchangError {
    /// Creates an `Ephemeris` error.
    pub fn ephemeris(status: i32, reason: impl Into<String>) -> Self {
        Self::Ephemeris { status, reason: reason.into() }
    }

    /// Creates an `InvalidConfiguration` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }

    /// Creates a `Parse` error.
    pub fn parse(input: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::Parse { input: input.into(), expected: expected.into() }
    }

    /// Creates an `OutOfRange` error.
    pub fn out_of_range(what: impl Into<String>, value: impl Into<i64>, range: impl Into<String>) -> Self {
        Self::OutOfRange { what: what.into(), value: value.into(), range: range.into() }
    }

    /// Wraps this error with the stage it occurred in.
    pub fn at(self, stage: Stage) -> Self {
        Self::AtStage { stage, source: Box::new(self) }
    }

    /// Innermost error, looking through stage wrappers.
    pub fn root_cause(&self) -> &PanchangError {
        match self {
            Self::AtStage { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Outermost stage tag, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::AtStage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Tags the error side of a result with a [`Stage`].
pub trait StageExt<T> {
    fn at_stage(self, stage: Stage) -> Result<T, PanchangError>;
}

impl<T> StageExt<T> for Result<T, PanchangError> {
    fn at_stage(self, stage: Stage) -> Result<T, PanchangError> {
        self.map_err(|e| e.at(stage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_sees_through_stages() {
        let err = PanchangError::ephemeris(-2, "circumpolar")
            .at(Stage::Sunrise)
            .at(Stage::EpochDay);
        assert_eq!(err.stage(), Some(Stage::EpochDay));
        assert!(matches!(err.root_cause(), PanchangError::Ephemeris { status: -2, .. }));
    }

    #[test]
    fn test_display_names_stage() {
        let res: Result<(), PanchangError> =
            Err(PanchangError::BoundaryNotFound { before_jd: 2460000.5, days: 40 });
        let msg = res.at_stage(Stage::SankrantiSearch).unwrap_err().to_string();
        assert!(msg.starts_with("sankranti search failed"));
        assert!(msg.contains("40 days"));
    }

    #[test]
    fn test_parse_and_range_errors_display() {
        let err = PanchangError::parse("Ramadhan", "a Malayalam month");
        assert_eq!(err.to_string(), "Cannot parse 'Ramadhan' as a Malayalam month");
        let err = PanchangError::out_of_range("Tithi index", 30u8, "0..30");
        assert_eq!(err.to_string(), "Tithi index 30 outside 0..30");
        assert!(!matches!(err, PanchangError::InvalidConfiguration { .. }));
    }
}
