//! Batch export of solar dates over a civil date range.

use chrono::NaiveDate;
use panchangam_astronomy::Ephemeris;
use panchangam_types::{PanchangError, SankrantiEvent, SolarCalendarDate, Stage};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::PanchangConfig;
use crate::solar::solar_date_with_hint;

/// One exported day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarRecord {
    /// Civil date at 00:00, e.g. `2025-04-14T00:00:00Z`.
    pub gregorian_date: String,
    /// Kali era year.
    pub ml_year: i32,
    pub ml_month: String,
    /// 1 (Medam) to 12 (Meenam).
    pub ml_month_number: u8,
    pub ml_day: u32,
}

impl CalendarRecord {
    pub fn from_solar_date(solar: &SolarCalendarDate, config: &PanchangConfig) -> Self {
        Self {
            gregorian_date: solar.date.format("%Y-%m-%dT00:00:00Z").to_string(),
            ml_year: solar.kali_year,
            ml_month: solar.month.name(config.script).to_string(),
            ml_month_number: solar.month.number(),
            ml_day: solar.day,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFailure {
    pub date: NaiveDate,
    pub error: PanchangError,
}

/// Records in date order plus the dates that could not be resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportReport {
    pub records: Vec<CalendarRecord>,
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Records as a pretty-printed JSON array.
    pub fn records_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.records)
    }
}

/// Resolves every date in `from..=to`.
///
/// A date that fails is recorded in `failures` and skipped. Consecutive dates
/// share the previous day's sankranti while it still governs.
///
/// # Errors
/// `InvalidConfiguration` when `from` is after `to`.
pub fn export_range<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    from: NaiveDate,
    to: NaiveDate,
    config: &PanchangConfig,
) -> Result<ExportReport, PanchangError> {
    if from > to {
        return Err(PanchangError::invalid_config(format!("Export range starts after it ends: {} > {}", from, to)));
    }

    let mut report = ExportReport::default();
    let mut last: Option<SankrantiEvent> = None;

    for date in from.iter_days().take_while(|d| *d <= to) {
        match solar_date_with_hint(ephemeris, date, config, last.as_ref()) {
            Ok(solar) => {
                last = Some(solar.sankranti);
                report.records.push(CalendarRecord::from_solar_date(&solar, config));
            }
            Err(err) => {
                warn!(%date, error = %err, "export skipped date");
                report.failures.push(ExportFailure { date, error: err.at(Stage::Export) });
            }
        }
    }

    info!(records = report.records.len(), failures = report.failures.len(), "export finished");
    Ok(report)
}
