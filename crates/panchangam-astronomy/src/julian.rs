//! Julian Day conversions and civil-time helpers.
//!
//! Gregorian <-> JD goes through `astro::time`; civil date-times are tied to
//! UT by a fixed offset in minutes (UTC+5:30 is 330).

use astro::time::{self, CalType, Date};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use panchangam_types::PanchangError;

/// Julian Day of J2000.0 (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Civil offset of Indian Standard Time in minutes east of UTC.
pub const IST_OFFSET_MINUTES: i32 = 330;

/// Gregorian calendar date and fractional hour (UT) to Julian Day.
pub fn to_julian_day(year: i32, month: u32, day: u32, hour_fraction: f64) -> f64 {
    let date = Date {
        year: year as i16,
        month: month as u8,
        decimal_day: day as f64 + hour_fraction / 24.0,
        cal_type: CalType::Gregorian,
    };
    time::julian_day(&date)
}

/// Julian Day to Gregorian `(year, month, day, hour_fraction)` in UT.
///
/// # Errors
/// Returns `Ephemeris` if the reverse conversion fails or yields fields
/// outside their calendar ranges.
pub fn from_julian_day(jd: f64) -> Result<(i32, u32, u32, f64), PanchangError> {
    if !jd.is_finite() {
        return Err(PanchangError::ephemeris(-1, format!("Non-finite Julian Day {}", jd)));
    }
    let (year, month, decimal_day) = time::date_frm_julian_day(jd)
        .map_err(|e| PanchangError::ephemeris(-1, format!("Reverse Julian conversion of {}: {}", jd, e)))?;

    let day = decimal_day.floor();
    let hour_fraction = (decimal_day - day) * 24.0;
    if !(1..=12).contains(&month) || !(1.0..32.0).contains(&day) || !(0.0..24.0).contains(&hour_fraction) {
        return Err(PanchangError::ephemeris(
            -1,
            format!("Malformed reverse Julian result for {}: {}-{}-{}", jd, year, month, decimal_day),
        ));
    }
    Ok((year as i32, month as u32, day as u32, hour_fraction))
}

/// Civil date-time at a fixed offset to JD UT.
pub fn civil_to_jd(datetime: NaiveDateTime, offset_minutes: i32) -> f64 {
    let utc = datetime - Duration::minutes(offset_minutes as i64);
    let hour_fraction = utc.hour() as f64
        + utc.minute() as f64 / 60.0
        + (utc.second() as f64 + utc.nanosecond() as f64 * 1e-9) / 3600.0;
    to_julian_day(utc.year(), utc.month(), utc.day(), hour_fraction)
}

/// JD UT of civil midnight at the start of `date`.
pub fn civil_midnight_jd(date: NaiveDate, offset_minutes: i32) -> f64 {
    civil_to_jd(date.and_time(chrono::NaiveTime::MIN), offset_minutes)
}

/// JD UT to civil date-time at a fixed offset, rounded to the second.
pub fn jd_to_civil(jd: f64, offset_minutes: i32) -> Result<NaiveDateTime, PanchangError> {
    let (year, month, day, hour_fraction) = from_julian_day(jd)?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        PanchangError::ephemeris(-1, format!("Invalid calendar date {}-{}-{} from JD {}", year, month, day, jd))
    })?;
    let seconds = (hour_fraction * 3600.0).round() as i64;
    Ok(date.and_time(chrono::NaiveTime::MIN)
        + Duration::seconds(seconds)
        + Duration::minutes(offset_minutes as i64))
}

/// Julian centuries since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / 36525.0
}

/// ΔT = TT - UT in seconds (Espenak & Meeus polynomial fits).
pub fn delta_t_seconds(jd_ut: f64) -> f64 {
    let y = 2000.0 + (jd_ut - J2000_JD) / 365.25;
    if y < 1941.0 || y >= 2150.0 {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    } else if y < 1961.0 {
        let t = y - 1950.0;
        29.07 + 0.407 * t - t * t / 233.0 + t * t * t / 2547.0
    } else if y < 1986.0 {
        let t = y - 1975.0;
        45.45 + 1.067 * t - t * t / 260.0 - t * t * t / 718.0
    } else if y < 2005.0 {
        let t = y - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if y < 2050.0 {
        let t = y - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
    }
}

/// JD UT to JD TT.
pub fn ut_to_tt(jd_ut: f64) -> f64 {
    jd_ut + delta_t_seconds(jd_ut) / 86_400.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j2000_epoch() {
        assert!((to_julian_day(2000, 1, 1, 12.0) - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn test_reverse_round_trip() {
        let jd = to_julian_day(2025, 4, 14, 9.6);
        let (y, m, d, h) = from_julian_day(jd).unwrap();
        assert_eq!((y, m, d), (2025, 4, 14));
        assert!((h - 9.6).abs() < 1e-6);
    }

    #[test]
    fn test_reverse_rejects_nan() {
        assert!(matches!(from_julian_day(f64::NAN), Err(PanchangError::Ephemeris { .. })));
    }

    #[test]
    fn test_ist_midnight_is_previous_utc_evening() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 14).unwrap();
        let jd = civil_midnight_jd(date, IST_OFFSET_MINUTES);
        // 2025-04-13 18:30 UT
        assert!((jd - to_julian_day(2025, 4, 13, 18.5)).abs() < 1e-9);
        let back = jd_to_civil(jd, IST_OFFSET_MINUTES).unwrap();
        assert_eq!(back, date.and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_delta_t_plausible() {
        let dt_2025 = delta_t_seconds(to_julian_day(2025, 1, 1, 0.0));
        assert!(dt_2025 > 60.0 && dt_2025 < 80.0, "ΔT(2025) = {dt_2025}");
        let dt_1970 = delta_t_seconds(to_julian_day(1970, 1, 1, 0.0));
        assert!(dt_1970 > 35.0 && dt_1970 < 45.0, "ΔT(1970) = {dt_1970}");
    }
}
