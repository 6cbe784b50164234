//! Malayalam solar calendar resolution.
//!
//! A civil date belongs to the month opened by the most recent sankranti on or
//! before that date's sunset. The month's first day is the sankranti's own
//! civil date, or the day after when the ingress falls at or after that
//! date's sunset.

use chrono::{Datelike, Days, NaiveDate};
use panchangam_astronomy::julian::{civil_midnight_jd, jd_to_civil};
use panchangam_astronomy::{Body, Ephemeris, RiseSet, SiderealFrame, find_transition};
use panchangam_types::{PanchangError, SankrantiEvent, SolarCalendarDate, Stage, StageExt, ZodiacSign};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::PanchangConfig;

/// A reused sankranti must be younger than the shortest solar month.
const HINT_MAX_AGE_DAYS: f64 = 29.0;

/// Which sign names the month and drives the era-year branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignSource {
    /// The sign entered at the governing sankranti.
    #[default]
    SunsetCrossing,
    /// The sign the Sun occupies at sunrise of the date.
    SunriseSign,
}

/// Civil midnight, sunrise and sunset of one date, as JD UT.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayBounds {
    pub midnight_jd: f64,
    pub sunrise_jd: f64,
    pub sunset_jd: f64,
}

/// Sun's zodiac sign at `jd_ut`.
pub fn sun_sign<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    jd_ut: f64,
    frame: &SiderealFrame,
) -> Result<ZodiacSign, PanchangError> {
    ephemeris.sun_sign(jd_ut, frame)
}

/// Kollam era year. Chingam through Dhanu keep the year the era began in.
pub fn kollam_year(first_day_year: i32, sign: ZodiacSign) -> i32 {
    if (4..9).contains(&sign.index()) {
        first_day_year - 824
    } else {
        first_day_year - 825
    }
}

/// Kali era year. Makaram through Meenam start in the following Gregorian year.
pub fn kali_year(first_day_year: i32, sign: ZodiacSign) -> i32 {
    if sign.index() < 9 {
        first_day_year + 3102
    } else {
        first_day_year + 3101
    }
}

/// Sunrise and sunset following civil midnight of `date`.
pub fn day_bounds<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    date: NaiveDate,
    config: &PanchangConfig,
) -> Result<DayBounds, PanchangError> {
    let midnight_jd = civil_midnight_jd(date, config.civil_offset_minutes);
    let sunrise_jd = ephemeris
        .rise_or_set(midnight_jd, Body::Sun, RiseSet::Rise, &config.location, &config.atmosphere)
        .at_stage(Stage::Sunrise)?;
    let sunset_jd = ephemeris
        .rise_or_set(midnight_jd, Body::Sun, RiseSet::Set, &config.location, &config.atmosphere)
        .at_stage(Stage::Sunset)?;
    Ok(DayBounds { midnight_jd, sunrise_jd, sunset_jd })
}

/// Most recent sign ingress on or before `jd_end`.
///
/// Tests `[jd_end - 1, jd_end]` first, then marches back one day at a time
/// for up to `config.max_backward_days` brackets.
///
/// # Errors
/// `BoundaryNotFound` when no bracket holds a crossing; ephemeris failures
/// propagate unchanged.
pub fn previous_sankranti<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    jd_end: f64,
    config: &PanchangConfig,
) -> Result<SankrantiEvent, PanchangError> {
    let frame = &config.frame;
    let sign_at = |jd: f64| sun_sign(ephemeris, jd, frame);

    if let Some(jd_ut) = find_transition(sign_at, jd_end - 1.0, jd_end, &config.search)? {
        let entered = sign_at(jd_end)?;
        debug!(jd_ut, entered = %entered, "sankranti inside the last day");
        return Ok(SankrantiEvent { jd_ut, entered });
    }

    for i in 1..=config.max_backward_days {
        let hi = jd_end - i as f64;
        let lo = hi - 1.0;
        trace!(step = i, lo, hi, "sankranti march");
        if let Some(jd_ut) = find_transition(sign_at, lo, hi, &config.search)? {
            let entered = sign_at(hi)?;
            debug!(jd_ut, entered = %entered, days_back = i, "sankranti found by backward march");
            return Ok(SankrantiEvent { jd_ut, entered });
        }
    }

    Err(PanchangError::BoundaryNotFound { before_jd: jd_end, days: config.max_backward_days })
}

/// Civil date of day 1 of the month opened by `event`.
pub fn epoch_day<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    event: &SankrantiEvent,
    config: &PanchangConfig,
) -> Result<NaiveDate, PanchangError> {
    let offset = config.civil_offset_minutes;
    let sankranti_date = jd_to_civil(event.jd_ut, offset).at_stage(Stage::CivilConversion)?.date();
    let sunset = ephemeris
        .rise_or_set(
            civil_midnight_jd(sankranti_date, offset),
            Body::Sun,
            RiseSet::Set,
            &config.location,
            &config.atmosphere,
        )
        .at_stage(Stage::Sunset)?;

    let first_day = if event.jd_ut >= sunset {
        sankranti_date
            .checked_add_days(Days::new(1))
            .ok_or(PanchangError::CalendarInvariant { date: sankranti_date, day: 0 })?
    } else {
        sankranti_date
    };
    debug!(%sankranti_date, %first_day, after_sunset = event.jd_ut >= sunset, "epoch day");
    Ok(first_day)
}

/// Solar calendar date of `date`.
pub fn solar_date<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    date: NaiveDate,
    config: &PanchangConfig,
) -> Result<SolarCalendarDate, PanchangError> {
    solar_date_with_hint(ephemeris, date, config, None)
}

/// Solar calendar date of `date`, reusing `hint` when it still governs.
///
/// The hint is taken when the Sun is still in `hint.entered` at this date's
/// sunset and fewer than 29 days have passed since the ingress; otherwise the
/// full backward search runs. The result is the same either way.
pub fn solar_date_with_hint<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    date: NaiveDate,
    config: &PanchangConfig,
    hint: Option<&SankrantiEvent>,
) -> Result<SolarCalendarDate, PanchangError> {
    let bounds = day_bounds(ephemeris, date, config)?;
    let current_sign = sun_sign(ephemeris, bounds.sunrise_jd, &config.frame).at_stage(Stage::Sunrise)?;

    let reusable = match hint {
        Some(h) => {
            let age = bounds.sunset_jd - h.jd_ut;
            (0.0..HINT_MAX_AGE_DAYS).contains(&age)
                && sun_sign(ephemeris, bounds.sunset_jd, &config.frame).at_stage(Stage::SankrantiSearch)? == h.entered
        }
        None => false,
    };
    let sankranti = match hint {
        Some(h) if reusable => *h,
        _ => previous_sankranti(ephemeris, bounds.sunset_jd, config).at_stage(Stage::SankrantiSearch)?,
    };

    let first_day = epoch_day(ephemeris, &sankranti, config).at_stage(Stage::EpochDay)?;
    let day = (date - first_day).num_days() + 1;
    if day < 1 {
        return Err(PanchangError::CalendarInvariant { date, day });
    }

    let governing = match config.sign_source {
        SignSource::SunsetCrossing => sankranti.entered,
        SignSource::SunriseSign => current_sign,
    };
    let year = first_day.year();

    Ok(SolarCalendarDate {
        date,
        kollam_year: kollam_year(year, governing),
        kali_year: kali_year(year, governing),
        month: governing.month(),
        day: day as u32,
        first_day,
        sankranti,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_years_all_signs() {
        let expected_kollam = [-825, -825, -825, -825, -824, -824, -824, -824, -824, -825, -825, -825];
        let expected_kali = [3102, 3102, 3102, 3102, 3102, 3102, 3102, 3102, 3102, 3101, 3101, 3101];
        for sign in ZodiacSign::ALL {
            let i = sign.index() as usize;
            assert_eq!(kollam_year(2025, sign), 2025 + expected_kollam[i], "kollam for {:?}", sign);
            assert_eq!(kali_year(2025, sign), 2025 + expected_kali[i], "kali for {:?}", sign);
        }
    }

    #[test]
    fn test_chingam_starts_new_kollam_year() {
        // Chingam 1, 1201 fell in August 2025; Karkidakam before it was 1200.
        assert_eq!(kollam_year(2025, ZodiacSign::Simha), 1201);
        assert_eq!(kollam_year(2025, ZodiacSign::Karka), 1200);
    }

    #[test]
    fn test_medam_starts_new_kali_year() {
        assert_eq!(kali_year(2025, ZodiacSign::Mesha), 5127);
        assert_eq!(kali_year(2025, ZodiacSign::Meena), 5126);
    }
}
