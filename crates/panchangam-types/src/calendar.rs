use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PanchangError;
use crate::script::Script;
use crate::zodiac::{MalayalamMonth, ZodiacSign};

/// Instant (JD UT) at which the Sun's sidereal longitude crossed into `entered`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SankrantiEvent {
    pub jd_ut: f64,
    pub entered: ZodiacSign,
}

/// Malayalam solar date for one civil date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarCalendarDate {
    /// Civil (Gregorian) date this snapshot describes.
    pub date: NaiveDate,
    /// Kollam era year (Chingam 1 epoch).
    pub kollam_year: i32,
    /// Kali era year (Medam 1 epoch).
    pub kali_year: i32,
    pub month: MalayalamMonth,
    /// 1-based day of the month.
    pub day: u32,
    /// Civil date of day 1 of this month.
    pub first_day: NaiveDate,
    /// Ingress that opened this month.
    pub sankranti: SankrantiEvent,
}

impl SolarCalendarDate {
    pub fn label(&self) -> SolarDateLabel {
        SolarDateLabel { kali_year: self.kali_year, month: self.month, day: self.day }
    }

    /// `"<kali year> <month> <day:02>"` in the given script.
    pub fn format(&self, script: Script) -> String {
        self.label().format(script)
    }
}

impl fmt::Display for SolarCalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The textual form of a solar date: Kali year, month and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolarDateLabel {
    pub kali_year: i32,
    pub month: MalayalamMonth,
    pub day: u32,
}

impl SolarDateLabel {
    pub fn format(&self, script: Script) -> String {
        format!("{} {} {:02}", self.kali_year, self.month.name(script), self.day)
    }
}

impl fmt::Display for SolarDateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(Script::English))
    }
}

impl FromStr for SolarDateLabel {
    type Err = PanchangError;

    /// Parses `"5127 Medam 18"` or `"5127 മേടം 18"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || PanchangError::parse(s, "a solar date like '5127 Medam 18'");
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(bad());
        }
        let kali_year = parts[0].parse::<i32>().map_err(|_| bad())?;
        let month = MalayalamMonth::from_name(parts[1]).ok_or_else(bad)?;
        let day = parts[2].parse::<u32>().map_err(|_| bad())?;
        if day == 0 || day > 32 {
            return Err(PanchangError::out_of_range("Solar day", day, "1..=32"));
        }
        Ok(Self { kali_year, month, day })
    }
}
