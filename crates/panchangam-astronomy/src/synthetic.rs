//! Deterministic ephemeris for manufacturing exact calendar scenarios.
//!
//! Longitudes advance at constant rates from a chosen epoch, and every UT day
//! has its rise at one fixed hour and its set at another. Rise/set failures
//! can be injected with an arbitrary status code.

use std::collections::HashMap;

use panchangam_types::{GeoPosition, PanchangError};
use serde::{Deserialize, Serialize};

use crate::ayanamsa::SiderealMode;
use crate::ephemeris::{Atmosphere, Body, Ephemeris, RiseSet, RiseSetOutcome, SiderealFrame};

/// Constant-rate motion in sidereal longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearMotion {
    pub epoch_jd: f64,
    pub longitude_deg: f64,
    pub rate_deg_per_day: f64,
}

impl LinearMotion {
    pub const fn new(epoch_jd: f64, longitude_deg: f64, rate_deg_per_day: f64) -> Self {
        Self { epoch_jd, longitude_deg, rate_deg_per_day }
    }

    /// A body that never moves.
    pub const fn fixed(longitude_deg: f64) -> Self {
        Self::new(0.0, longitude_deg, 0.0)
    }

    pub fn longitude_at(&self, jd: f64) -> f64 {
        let lon = (self.longitude_deg + self.rate_deg_per_day * (jd - self.epoch_jd)).rem_euclid(360.0);
        if lon >= 360.0 { 0.0 } else { lon }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticEphemeris {
    pub sun: LinearMotion,
    pub moon: LinearMotion,
    /// Motions of the remaining bodies.
    #[serde(default)]
    pub planets: HashMap<Body, LinearMotion>,
    /// Ascendant; the same motion for every observer.
    pub ascendant: LinearMotion,
    /// UT hour of every rise.
    pub rise_hour_ut: f64,
    /// UT hour of every set.
    pub set_hour_ut: f64,
    /// Status returned for every event of this kind instead of a time.
    pub failure: Option<(RiseSet, i32)>,
}

impl Default for SyntheticEphemeris {
    fn default() -> Self {
        let j2000 = crate::julian::J2000_JD;
        // mean daily motions, rounded
        let planets = [
            (Body::Mercury, 4.0),
            (Body::Venus, 1.6),
            (Body::Mars, 0.5),
            (Body::Jupiter, 0.08),
            (Body::Saturn, 0.03),
            (Body::TrueNode, -0.053),
        ]
        .into_iter()
        .map(|(body, rate)| (body, LinearMotion::new(j2000, 0.0, rate)))
        .collect();
        Self {
            sun: LinearMotion::new(j2000, 0.0, 1.0),
            moon: LinearMotion::new(j2000, 0.0, 13.0),
            planets,
            ascendant: LinearMotion::new(j2000, 0.0, 361.0),
            // 06:30 and 18:30 at UTC+5:30
            rise_hour_ut: 1.0,
            set_hour_ut: 13.0,
            failure: None,
        }
    }
}

impl SyntheticEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sun(mut self, motion: LinearMotion) -> Self {
        self.sun = motion;
        self
    }

    pub fn with_moon(mut self, motion: LinearMotion) -> Self {
        self.moon = motion;
        self
    }

    /// Sets the motion of any body, the Sun and Moon included.
    pub fn with_body(mut self, body: Body, motion: LinearMotion) -> Self {
        match body {
            Body::Sun => self.sun = motion,
            Body::Moon => self.moon = motion,
            other => {
                self.planets.insert(other, motion);
            }
        }
        self
    }

    pub fn with_ascendant(mut self, motion: LinearMotion) -> Self {
        self.ascendant = motion;
        self
    }

    pub fn with_hours(mut self, rise_hour_ut: f64, set_hour_ut: f64) -> Self {
        self.rise_hour_ut = rise_hour_ut;
        self.set_hour_ut = set_hour_ut;
        self
    }

    pub fn failing(mut self, kind: RiseSet, status: i32) -> Self {
        self.failure = Some((kind, status));
        self
    }

    /// First event at `hour_ut` on or after `jd_start`.
    fn next_event(jd_start: f64, hour_ut: f64) -> f64 {
        let offset = 0.5 + hour_ut / 24.0;
        // absorbs rounding when jd_start is itself an event time
        (jd_start - offset - 1e-7).ceil() + offset
    }
}

impl Ephemeris for SyntheticEphemeris {
    fn sidereal_longitude(&self, jd_ut: f64, body: Body, _frame: &SiderealFrame) -> Result<f64, PanchangError> {
        if !jd_ut.is_finite() {
            return Err(PanchangError::ephemeris(-1, format!("Non-finite Julian Day {}", jd_ut)));
        }
        let motion = match body {
            Body::Sun => &self.sun,
            Body::Moon => &self.moon,
            other => self
                .planets
                .get(&other)
                .ok_or_else(|| PanchangError::ephemeris(-1, format!("No synthetic motion for {:?}", other)))?,
        };
        Ok(motion.longitude_at(jd_ut))
    }

    fn ascendant(&self, jd_ut: f64, _geo: &GeoPosition, _mode: SiderealMode) -> Result<f64, PanchangError> {
        if !jd_ut.is_finite() {
            return Err(PanchangError::ephemeris(-1, format!("Non-finite Julian Day {}", jd_ut)));
        }
        Ok(self.ascendant.longitude_at(jd_ut))
    }

    fn rise_or_set_raw(
        &self,
        jd_start: f64,
        _body: Body,
        kind: RiseSet,
        _geo: &GeoPosition,
        _atmosphere: &Atmosphere,
    ) -> RiseSetOutcome {
        match self.failure {
            Some((failing, status)) if failing == kind => RiseSetOutcome::failed(status),
            _ => {
                let hour = match kind {
                    RiseSet::Rise => self.rise_hour_ut,
                    RiseSet::Set => self.set_hour_ut,
                };
                RiseSetOutcome::ok(Self::next_event(jd_start, hour))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julian::J2000_JD;

    #[test]
    fn test_events_at_fixed_hours() {
        let eph = SyntheticEphemeris::new();
        let geo = GeoPosition::PALAKKAD;
        let atm = Atmosphere::default();
        // civil midnight of 2025-04-14 at UTC+5:30
        let jd0 = 2_460_779.270_833_333;
        let rise = eph.rise_or_set(jd0, Body::Sun, RiseSet::Rise, &geo, &atm).unwrap();
        let set = eph.rise_or_set(jd0, Body::Sun, RiseSet::Set, &geo, &atm).unwrap();
        assert!((rise - (2_460_779.5 + 1.0 / 24.0)).abs() < 1e-9);
        assert!((set - (2_460_779.5 + 13.0 / 24.0)).abs() < 1e-9);
    }

    #[test]
    fn test_event_exactly_at_start_is_kept() {
        let start = 2_460_779.5 + 1.0 / 24.0;
        assert!((SyntheticEphemeris::next_event(start, 1.0) - start).abs() < 1e-9);
    }

    #[test]
    fn test_injected_failure() {
        let eph = SyntheticEphemeris::new().failing(RiseSet::Set, -2);
        let geo = GeoPosition::PALAKKAD;
        let atm = Atmosphere::default();
        assert!(eph.rise_or_set(2_460_779.3, Body::Sun, RiseSet::Rise, &geo, &atm).is_ok());
        let err = eph.rise_or_set(2_460_779.3, Body::Sun, RiseSet::Set, &geo, &atm).unwrap_err();
        assert!(matches!(err, PanchangError::Ephemeris { status: -2, .. }));
    }

    #[test]
    fn test_every_body_has_a_motion() {
        let eph = SyntheticEphemeris::new().with_body(Body::Jupiter, LinearMotion::fixed(65.0));
        for body in Body::ALL {
            assert!(eph.sidereal_longitude(J2000_JD, body, &SiderealFrame::LAHIRI).is_ok(), "{:?}", body);
        }
        assert_eq!(eph.sidereal_longitude(J2000_JD, Body::Jupiter, &SiderealFrame::LAHIRI).unwrap(), 65.0);
        // the node runs backwards
        let node = eph.sidereal_longitude(J2000_JD + 10.0, Body::TrueNode, &SiderealFrame::LAHIRI).unwrap();
        assert!(node > 359.0);
    }

    #[test]
    fn test_missing_motion_is_an_error() {
        let mut eph = SyntheticEphemeris::new();
        eph.planets.remove(&Body::Mars);
        let err = eph.sidereal_longitude(J2000_JD, Body::Mars, &SiderealFrame::LAHIRI).unwrap_err();
        assert!(matches!(err, PanchangError::Ephemeris { status: -1, .. }));
    }

    #[test]
    fn test_linear_motion_wraps() {
        let m = LinearMotion::new(100.0, 359.5, 1.0);
        assert!((m.longitude_at(101.0) - 0.5).abs() < 1e-9);
        assert!((m.longitude_at(99.0) - 358.5).abs() < 1e-9);
    }
}
