//! Extension trait for `NaiveDate`.

use chrono::{Days, NaiveDate};
use panchangam_astronomy::Ephemeris;
use panchangam_types::{PanchangError, SolarCalendarDate, Tithi};

use crate::Panchang;

/// A solar month never runs past 32 days.
const MONTH_SEARCH_DAYS: u64 = 40;

/// Extends `NaiveDate` with Malayalam calendar lookups.
///
/// The plain methods use the default engine (analytic ephemeris, Palakkad,
/// IST). The `_with` variants take an engine of any ephemeris.
pub trait MalayalamDateExt {
    /// Solar date, or `None` when it cannot be resolved.
    fn malayalam_date(&self) -> Option<SolarCalendarDate>;

    /// Solar date with the failure reason.
    fn try_malayalam_date(&self) -> Result<SolarCalendarDate, PanchangError>;

    /// Tithi current at sunrise.
    fn tithi(&self) -> Result<Tithi, PanchangError>;

    /// First day of the next solar month (up to 40 days ahead).
    fn next_month_start(&self) -> Option<NaiveDate>;

    fn malayalam_date_with<E: Ephemeris>(&self, engine: &Panchang<E>) -> Result<SolarCalendarDate, PanchangError>;

    fn tithi_with<E: Ephemeris>(&self, engine: &Panchang<E>) -> Result<Tithi, PanchangError>;

    fn next_month_start_with<E: Ephemeris>(&self, engine: &Panchang<E>) -> Option<NaiveDate>;
}

impl MalayalamDateExt for NaiveDate {
    fn malayalam_date(&self) -> Option<SolarCalendarDate> {
        self.try_malayalam_date().ok()
    }

    fn try_malayalam_date(&self) -> Result<SolarCalendarDate, PanchangError> {
        self.malayalam_date_with(&Panchang::new())
    }

    fn tithi(&self) -> Result<Tithi, PanchangError> {
        self.tithi_with(&Panchang::new())
    }

    fn next_month_start(&self) -> Option<NaiveDate> {
        self.next_month_start_with(&Panchang::new())
    }

    fn malayalam_date_with<E: Ephemeris>(&self, engine: &Panchang<E>) -> Result<SolarCalendarDate, PanchangError> {
        engine.solar_date(*self)
    }

    fn tithi_with<E: Ephemeris>(&self, engine: &Panchang<E>) -> Result<Tithi, PanchangError> {
        engine.lunar_day(*self).map(|day| day.tithi.value)
    }

    fn next_month_start_with<E: Ephemeris>(&self, engine: &Panchang<E>) -> Option<NaiveDate> {
        let first = self.succ_opt()?;
        let last = self.checked_add_days(Days::new(MONTH_SEARCH_DAYS))?;
        for solar in engine.solar_dates(first..=last) {
            // Stop at the first unresolvable date
            let solar = solar.ok()?;
            if solar.day == 1 {
                return Some(solar.date);
            }
        }
        None
    }
}
