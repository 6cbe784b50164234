//! Rise/set by iterative hour-angle refinement.
//!
//! Starting from an approximate local noon, the transit is located from the
//! body's hour angle, the event is placed `H0` either side of it, and the
//! estimate is refined with the body's position at the event time.

use std::f64::consts::{PI, TAU};

use panchangam_types::{GeoPosition, PanchangError};

use crate::ephemeris::{Atmosphere, RiseSet};
use crate::julian::centuries_since_j2000;

const MAX_ITERATIONS: usize = 5;

/// Convergence threshold in days (~0.086 seconds).
const CONVERGENCE_DAYS: f64 = 1.0e-6;

/// Sidereal rotation rate in radians per solar day.
const SIDEREAL_RATE: f64 = TAU * 1.002_737_811_911_354_6;

/// Horizontal refraction at 1010 mbar and 10 °C, arcminutes.
const HORIZON_REFRACTION_ARCMIN: f64 = 34.0;

/// Apparent equatorial place of a body plus the disc quantities that shift
/// its rise/set altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonPlace {
    pub ra_rad: f64,
    pub dec_rad: f64,
    pub semidiameter_deg: f64,
    pub parallax_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiseSetResult {
    Event(f64),
    NeverRises,
    NeverSets,
}

/// Greenwich mean sidereal time in radians (IAU 1982 expression).
pub fn gmst_rad(jd_ut: f64) -> f64 {
    let t = centuries_since_j2000(jd_ut);
    let seconds = 67_310.548_41 + (876_600.0 * 3600.0 + 8_640_184.812_866) * t + 0.093_104 * t * t
        - 6.2e-6 * t * t * t;
    (seconds / 86_400.0 * TAU).rem_euclid(TAU)
}

/// Ecliptic longitude of the ascendant in radians, `[0, 2π)`.
///
/// `lst_rad` is the local sidereal time, `obliquity_rad` the obliquity of the
/// ecliptic and `latitude_rad` the observer's geographic latitude.
pub fn ascendant_rad(lst_rad: f64, obliquity_rad: f64, latitude_rad: f64) -> f64 {
    let (sin_e, cos_e) = obliquity_rad.sin_cos();
    lst_rad
        .cos()
        .atan2(-(lst_rad.sin() * cos_e + latitude_rad.tan() * sin_e))
        .rem_euclid(TAU)
}

/// Approximate local noon JD from 0h UT JD and east longitude.
pub fn approximate_local_noon_jd(jd_ut_midnight: f64, longitude_deg: f64) -> f64 {
    jd_ut_midnight + 0.5 - longitude_deg / 360.0
}

/// Standard pressure at `altitude_m`, mbar.
pub fn standard_pressure_mbar(altitude_m: f64) -> f64 {
    1013.25 * (1.0 - 0.0065 * altitude_m / 288.0).powf(5.255)
}

/// Horizon refraction in degrees, scaled for pressure and temperature.
///
/// Zero pressure selects the standard pressure for the observer's altitude.
pub fn horizon_refraction_deg(atmosphere: &Atmosphere, altitude_m: f64) -> f64 {
    let pressure = if atmosphere.pressure_mbar > 0.0 {
        atmosphere.pressure_mbar
    } else {
        standard_pressure_mbar(altitude_m)
    };
    let scale = (pressure / 1010.0) * (283.0 / (273.0 + atmosphere.temperature_c));
    HORIZON_REFRACTION_ARCMIN * scale / 60.0
}

/// Geometric altitude of the disc centre at the instant of rise or set.
pub fn target_altitude_deg(place: &HorizonPlace, refraction_deg: f64) -> f64 {
    place.parallax_deg - refraction_deg - place.semidiameter_deg
}

fn wrap_pi(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if a > PI { a - TAU } else { a }
}

fn cos_hour_angle(place: &HorizonPlace, phi: f64, refraction_deg: f64) -> f64 {
    let h0 = target_altitude_deg(place, refraction_deg).to_radians();
    (h0.sin() - phi.sin() * place.dec_rad.sin()) / (phi.cos() * place.dec_rad.cos())
}

/// Computes the rise or set nearest to `jd_noon`.
///
/// `place_at` supplies the body's apparent place at a JD UT.
pub fn rise_set_near_noon<F>(
    mut place_at: F,
    geo: &GeoPosition,
    kind: RiseSet,
    jd_noon: f64,
    refraction_deg: f64,
) -> Result<RiseSetResult, PanchangError>
where
    F: FnMut(f64) -> Result<HorizonPlace, PanchangError>,
{
    let phi = geo.latitude.to_radians();
    let lambda = geo.longitude.to_radians();

    let noon_place = place_at(jd_noon)?;
    let cos_h0 = cos_hour_angle(&noon_place, phi, refraction_deg);
    if cos_h0 > 1.0 {
        return Ok(RiseSetResult::NeverRises);
    }
    if cos_h0 < -1.0 {
        return Ok(RiseSetResult::NeverSets);
    }

    let ha_noon = wrap_pi(gmst_rad(jd_noon) + lambda - noon_place.ra_rad);
    let transit = jd_noon - ha_noon / SIDEREAL_RATE;
    let half_arc = cos_h0.acos() / SIDEREAL_RATE;
    let mut event = match kind {
        RiseSet::Rise => transit - half_arc,
        RiseSet::Set => transit + half_arc,
    };

    for _ in 0..MAX_ITERATIONS {
        let place = place_at(event)?;
        let cos_h = cos_hour_angle(&place, phi, refraction_deg);
        if cos_h > 1.0 {
            return Ok(RiseSetResult::NeverRises);
        }
        if cos_h < -1.0 {
            return Ok(RiseSetResult::NeverSets);
        }
        let ha_target = match kind {
            RiseSet::Rise => -cos_h.acos(),
            RiseSet::Set => cos_h.acos(),
        };
        let ha_actual = wrap_pi(gmst_rad(event) + lambda - place.ra_rad);
        let correction = wrap_pi(ha_target - ha_actual) / SIDEREAL_RATE;
        event += correction;
        if correction.abs() < CONVERGENCE_DAYS {
            break;
        }
    }

    Ok(RiseSetResult::Event(event))
}

/// First rise or set at or after `jd_start`.
///
/// Tries the local noons around `jd_start` in order and keeps the first event
/// that does not precede it.
pub fn next_rise_set<F>(
    mut place_at: F,
    geo: &GeoPosition,
    kind: RiseSet,
    jd_start: f64,
    refraction_deg: f64,
) -> Result<RiseSetResult, PanchangError>
where
    F: FnMut(f64) -> Result<HorizonPlace, PanchangError>,
{
    let ut_midnight = (jd_start - 0.5).floor() + 0.5;
    let mut noon = approximate_local_noon_jd(ut_midnight, geo.longitude);
    while noon > jd_start - 0.5 {
        noon -= 1.0;
    }

    let mut last = RiseSetResult::NeverRises;
    for _ in 0..4 {
        match rise_set_near_noon(&mut place_at, geo, kind, noon, refraction_deg)? {
            RiseSetResult::Event(jd) if jd >= jd_start => return Ok(RiseSetResult::Event(jd)),
            RiseSetResult::Event(_) => {}
            polar => last = polar,
        }
        noon += 1.0;
    }
    Ok(last)
}
