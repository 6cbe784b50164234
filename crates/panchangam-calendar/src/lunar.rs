//! Tithi and nakshatra resolution.
//!
//! Two query modes: the attributes current at an explicit civil instant, and
//! the attributes current at sunrise together with the instant each one ends
//! (searched up to the next sunrise).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use panchangam_astronomy::julian::{civil_midnight_jd, civil_to_jd, jd_to_civil};
use panchangam_astronomy::{Body, Ephemeris, RiseSet, SiderealFrame, find_transition};
use panchangam_types::{
    NAKSHATRA_SPAN_DEG, Nakshatra, PanchangError, Stage, StageExt, TITHI_SPAN_DEG, Timed, Tithi, Vaaram,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PanchangConfig;

/// Fixed shift subtracted from tithi and nakshatra end times before display.
///
/// The value has no documented derivation; it is kept as a literal.
pub const DISPLAY_CLOCK_SHIFT: TimeDelta = TimeDelta::minutes(6 * 60 + 30);

/// Tithi for the given sidereal longitudes, from `(moon - sun) mod 360`.
pub fn tithi_index(moon_deg: f64, sun_deg: f64) -> Tithi {
    let elongation = (moon_deg - sun_deg).rem_euclid(360.0);
    Tithi::wrapping((elongation / TITHI_SPAN_DEG).floor() as u32)
}

/// Nakshatra for the given sidereal lunar longitude.
pub fn nakshatra_index(moon_deg: f64) -> Nakshatra {
    Nakshatra::wrapping((moon_deg.rem_euclid(360.0) / NAKSHATRA_SPAN_DEG).floor() as u32)
}

pub fn tithi_at<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    jd_ut: f64,
    frame: &SiderealFrame,
) -> Result<Tithi, PanchangError> {
    let moon = ephemeris.sidereal_longitude(jd_ut, Body::Moon, frame)?;
    let sun = ephemeris.sidereal_longitude(jd_ut, Body::Sun, frame)?;
    Ok(tithi_index(moon, sun))
}

pub fn nakshatra_at<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    jd_ut: f64,
    frame: &SiderealFrame,
) -> Result<Nakshatra, PanchangError> {
    Ok(nakshatra_index(ephemeris.sidereal_longitude(jd_ut, Body::Moon, frame)?))
}

/// Lunar attributes at one civil instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarSnapshot {
    pub datetime: NaiveDateTime,
    pub jd_ut: f64,
    pub weekday: Vaaram,
    pub tithi: Tithi,
    pub nakshatra: Nakshatra,
}

/// Lunar attributes current at sunrise of a civil date, with their ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarDay {
    pub date: NaiveDate,
    pub weekday: Vaaram,
    pub sunrise_jd: f64,
    pub next_sunrise_jd: f64,
    pub tithi: Timed<Tithi>,
    pub nakshatra: Timed<Nakshatra>,
}

impl LunarDay {
    /// Display clock time at which the sunrise tithi ends.
    pub fn tithi_end_display(&self, offset_minutes: i32) -> Result<NaiveTime, PanchangError> {
        display_end_time(self.tithi.ends_jd, offset_minutes)
    }

    /// Display clock time at which the sunrise nakshatra ends.
    pub fn nakshatra_end_display(&self, offset_minutes: i32) -> Result<NaiveTime, PanchangError> {
        display_end_time(self.nakshatra.ends_jd, offset_minutes)
    }
}

/// Local clock time of `jd_ut` less [`DISPLAY_CLOCK_SHIFT`], wrapping at midnight.
pub fn display_end_time(jd_ut: f64, offset_minutes: i32) -> Result<NaiveTime, PanchangError> {
    let local = jd_to_civil(jd_ut, offset_minutes).at_stage(Stage::CivilConversion)?;
    let (shifted, _) = local.time().overflowing_sub_signed(DISPLAY_CLOCK_SHIFT);
    Ok(shifted)
}

/// Weekday, tithi and nakshatra at a civil date-time.
pub fn lunar_at<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    datetime: NaiveDateTime,
    config: &PanchangConfig,
) -> Result<LunarSnapshot, PanchangError> {
    let jd_ut = civil_to_jd(datetime, config.civil_offset_minutes);
    Ok(LunarSnapshot {
        datetime,
        jd_ut,
        weekday: Vaaram::of(datetime.date()),
        tithi: tithi_at(ephemeris, jd_ut, &config.frame).at_stage(Stage::TithiSearch)?,
        nakshatra: nakshatra_at(ephemeris, jd_ut, &config.frame).at_stage(Stage::NakshatraSearch)?,
    })
}

/// Tithi and nakshatra at sunrise of `date`, each valid until its transition
/// or, when none occurs before the next sunrise, until that sunrise.
pub fn lunar_day<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    date: NaiveDate,
    config: &PanchangConfig,
) -> Result<LunarDay, PanchangError> {
    let jd0 = civil_midnight_jd(date, config.civil_offset_minutes);
    let sunrise = ephemeris
        .rise_or_set(jd0, Body::Sun, RiseSet::Rise, &config.location, &config.atmosphere)
        .at_stage(Stage::Sunrise)?;
    let next_sunrise = ephemeris
        .rise_or_set(jd0 + 1.0, Body::Sun, RiseSet::Rise, &config.location, &config.atmosphere)
        .at_stage(Stage::NextSunrise)?;

    let frame = &config.frame;
    let tithi = tithi_at(ephemeris, sunrise, frame).at_stage(Stage::TithiSearch)?;
    let tithi_end = find_transition(|jd| tithi_at(ephemeris, jd, frame), sunrise, next_sunrise, &config.search)
        .at_stage(Stage::TithiSearch)?
        .unwrap_or(next_sunrise);

    let nakshatra = nakshatra_at(ephemeris, sunrise, frame).at_stage(Stage::NakshatraSearch)?;
    let nakshatra_end =
        find_transition(|jd| nakshatra_at(ephemeris, jd, frame), sunrise, next_sunrise, &config.search)
            .at_stage(Stage::NakshatraSearch)?
            .unwrap_or(next_sunrise);

    debug!(%date, tithi = tithi.index(), tithi_end, nakshatra = nakshatra.index(), nakshatra_end, "lunar day");

    Ok(LunarDay {
        date,
        weekday: Vaaram::of(date),
        sunrise_jd: sunrise,
        next_sunrise_jd: next_sunrise,
        tithi: Timed::new(tithi, tithi_end),
        nakshatra: Timed::new(nakshatra, nakshatra_end),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use panchangam_astronomy::{LinearMotion, SyntheticEphemeris};

    fn ist(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 14).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    /// Sun fixed at 0, Moon at `lon` degrees at 12:00 IST moving 12 degrees a day.
    fn moon_through(lon: f64) -> SyntheticEphemeris {
        let noon = civil_to_jd(ist(12, 0), 330);
        SyntheticEphemeris::new()
            .with_sun(LinearMotion::fixed(0.0))
            .with_moon(LinearMotion::new(noon, lon, 12.0))
    }

    #[test]
    fn test_lunar_at_converts_civil_time() {
        let snapshot = lunar_at(&moon_through(12.0), ist(12, 0), &PanchangConfig::default()).unwrap();
        // 12:00 IST is 06:30 UT
        assert!((snapshot.jd_ut - (2_460_779.5 + 6.5 / 24.0)).abs() < 1e-9);
        assert_eq!(snapshot.datetime, ist(12, 0));

        // the same wall clock at UTC+0 is five and a half hours later
        let utc = PanchangConfig::default().civil_offset_minutes(0);
        let shifted = lunar_at(&moon_through(12.0), ist(12, 0), &utc).unwrap();
        assert!((shifted.jd_ut - snapshot.jd_ut - 5.5 / 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_lunar_at_either_side_of_tithi_boundary() {
        let eph = moon_through(TITHI_SPAN_DEG);
        let config = PanchangConfig::default();

        let before = lunar_at(&eph, ist(11, 59), &config).unwrap();
        let after = lunar_at(&eph, ist(12, 1), &config).unwrap();
        assert_eq!(before.tithi.index(), 0);
        assert_eq!(after.tithi.index(), 1);
        assert_eq!(before.nakshatra, after.nakshatra);
    }

    #[test]
    fn test_lunar_at_either_side_of_nakshatra_boundary() {
        let eph = moon_through(NAKSHATRA_SPAN_DEG);
        let config = PanchangConfig::default();

        let before = lunar_at(&eph, ist(11, 59), &config).unwrap();
        let after = lunar_at(&eph, ist(12, 1), &config).unwrap();
        assert_eq!(before.nakshatra.index(), 0);
        assert_eq!(after.nakshatra.index(), 1);
        assert_eq!(before.tithi.index(), 1);
        assert_eq!(after.tithi.index(), 1);
    }

    #[test]
    fn test_lunar_at_weekday_follows_the_civil_date() {
        // 00:10 IST on Monday is still Sunday in UT
        let snapshot = lunar_at(&moon_through(50.0), ist(0, 10), &PanchangConfig::default()).unwrap();
        assert_eq!(snapshot.weekday, Vaaram::Thinkal);
        let (_, _, ut_day, _) = panchangam_astronomy::from_julian_day(snapshot.jd_ut).unwrap();
        assert_eq!(ut_day, 13);
    }

    #[test]
    fn test_tithi_index_boundaries() {
        assert_eq!(tithi_index(0.0, 0.0).index(), 0);
        assert_eq!(tithi_index(11.999, 0.0).index(), 0);
        assert_eq!(tithi_index(12.0, 0.0).index(), 1);
        assert_eq!(tithi_index(180.0, 0.0), Tithi::new(15).unwrap());
        assert_eq!(tithi_index(10.0, 20.0), Tithi::AMAVASYA);
    }

    #[test]
    fn test_tithi_ignores_full_turns() {
        assert_eq!(tithi_index(100.0, 40.0), tithi_index(460.0, 40.0));
        assert_eq!(tithi_index(100.0, 40.0), tithi_index(100.0, 400.0));
    }

    #[test]
    fn test_nakshatra_index() {
        assert_eq!(nakshatra_index(0.0).index(), 0);
        assert_eq!(nakshatra_index(13.34).index(), 1);
        assert_eq!(nakshatra_index(359.9).index(), 26);
        assert_eq!(nakshatra_index(-0.1).index(), 26);
    }

    #[test]
    fn test_display_shift_wraps_midnight() {
        // 2025-04-14 05:00 IST -> 22:30 on the display clock
        let jd = civil_to_jd(
            NaiveDate::from_ymd_opt(2025, 4, 14).unwrap().and_hms_opt(5, 0, 0).unwrap(),
            330,
        );
        let shown = display_end_time(jd, 330).unwrap();
        assert_eq!(shown, NaiveTime::from_hms_opt(22, 30, 0).unwrap());
    }
}
