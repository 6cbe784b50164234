//! Ephemeris adapter contract.
//!
//! Backends supply sidereal longitudes and rise/set events. The sidereal mode
//! and the optional topocentric observer travel with each query as a
//! [`SiderealFrame`] value; no backend keeps them as hidden global state.

use panchangam_types::{GeoPosition, PanchangError, ZodiacSign};
use serde::{Deserialize, Serialize};

use crate::ayanamsa::SiderealMode;

/// Status code of a successful rise/set computation.
pub const STATUS_OK: i32 = 0;
/// Status code when the body neither rises nor sets on the requested day.
pub const STATUS_CIRCUMPOLAR: i32 = -2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    /// True ascending node of the Moon's orbit.
    TrueNode,
}

impl Body {
    pub const ALL: [Body; 8] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::TrueNode,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiseSet {
    Rise,
    Set,
}

/// Atmospheric conditions for refraction.
///
/// A pressure of 0 means "standard pressure for the observer's altitude".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Atmosphere {
    pub pressure_mbar: f64,
    pub temperature_c: f64,
}

/// Sidereal mode plus optional topocentric observer for longitude queries.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SiderealFrame {
    pub mode: SiderealMode,
    #[serde(default)]
    pub topocentric: Option<GeoPosition>,
}

impl SiderealFrame {
    /// Geocentric Lahiri frame used for Panchangam quantities.
    pub const LAHIRI: SiderealFrame = SiderealFrame { mode: SiderealMode::Lahiri, topocentric: None };

    pub fn topocentric(mode: SiderealMode, observer: GeoPosition) -> Self {
        Self { mode, topocentric: Some(observer) }
    }
}

/// Raw result of a rise/set computation: status code, event time and the
/// backend's own explanation when it has one.
#[derive(Debug, Clone, PartialEq)]
pub struct RiseSetOutcome {
    pub status: i32,
    pub jd_ut: f64,
    pub reason: Option<String>,
}

impl RiseSetOutcome {
    pub fn ok(jd_ut: f64) -> Self {
        Self { status: STATUS_OK, jd_ut, reason: None }
    }

    pub fn failed(status: i32) -> Self {
        Self { status, jd_ut: f64::NAN, reason: None }
    }

    /// A failure that keeps the backend's message.
    pub fn failed_with(status: i32, reason: impl Into<String>) -> Self {
        Self { reason: Some(reason.into()), ..Self::failed(status) }
    }

    /// Converts a non-zero status into an `Ephemeris` error.
    pub fn into_result(self, body: Body, kind: RiseSet) -> Result<f64, PanchangError> {
        if self.status != STATUS_OK {
            let reason = match self.reason {
                Some(reason) => format!("{:?} {:?}: {}", body, kind, reason),
                None => format!("{:?} {:?} calculation failed with status {}", body, kind, self.status),
            };
            return Err(PanchangError::ephemeris(self.status, reason));
        }
        if !self.jd_ut.is_finite() {
            return Err(PanchangError::ephemeris(-1, format!("{:?} {:?} returned a non-finite time", body, kind)));
        }
        Ok(self.jd_ut)
    }
}

/// Source of sidereal positions and rise/set events.
pub trait Ephemeris: std::fmt::Debug {
    /// Sidereal ecliptic longitude of `body` at `jd_ut`, in `[0, 360)`.
    fn sidereal_longitude(&self, jd_ut: f64, body: Body, frame: &SiderealFrame) -> Result<f64, PanchangError>;

    /// Sidereal longitude of the ecliptic point rising on the eastern horizon
    /// of `geo` at `jd_ut`, in `[0, 360)`.
    fn ascendant(&self, jd_ut: f64, geo: &GeoPosition, mode: SiderealMode) -> Result<f64, PanchangError>;

    /// First rise or set of `body` at or after `jd_start`, with its status code.
    fn rise_or_set_raw(
        &self,
        jd_start: f64,
        body: Body,
        kind: RiseSet,
        geo: &GeoPosition,
        atmosphere: &Atmosphere,
    ) -> RiseSetOutcome;

    /// First rise or set of `body` at or after `jd_start`.
    ///
    /// # Errors
    /// Returns `Ephemeris` when the backend reports a non-zero status.
    fn rise_or_set(
        &self,
        jd_start: f64,
        body: Body,
        kind: RiseSet,
        geo: &GeoPosition,
        atmosphere: &Atmosphere,
    ) -> Result<f64, PanchangError> {
        self.rise_or_set_raw(jd_start, body, kind, geo, atmosphere).into_result(body, kind)
    }

    /// Zodiac sign occupied by the Sun.
    fn sun_sign(&self, jd_ut: f64, frame: &SiderealFrame) -> Result<ZodiacSign, PanchangError> {
        self.sidereal_longitude(jd_ut, Body::Sun, frame).map(ZodiacSign::from_longitude)
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn sidereal_longitude(&self, jd_ut: f64, body: Body, frame: &SiderealFrame) -> Result<f64, PanchangError> {
        (**self).sidereal_longitude(jd_ut, body, frame)
    }

    fn ascendant(&self, jd_ut: f64, geo: &GeoPosition, mode: SiderealMode) -> Result<f64, PanchangError> {
        (**self).ascendant(jd_ut, geo, mode)
    }

    fn rise_or_set_raw(
        &self,
        jd_start: f64,
        body: Body,
        kind: RiseSet,
        geo: &GeoPosition,
        atmosphere: &Atmosphere,
    ) -> RiseSetOutcome {
        (**self).rise_or_set_raw(jd_start, body, kind, geo, atmosphere)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_status_is_error() {
        let err = RiseSetOutcome::failed(STATUS_CIRCUMPOLAR).into_result(Body::Sun, RiseSet::Rise).unwrap_err();
        assert!(matches!(err, PanchangError::Ephemeris { status: -2, .. }));
    }

    #[test]
    fn test_failure_reason_reaches_the_error() {
        let err = RiseSetOutcome::failed_with(-1, "Non-finite Sun place at JD NaN")
            .into_result(Body::Sun, RiseSet::Set)
            .unwrap_err();
        match err {
            PanchangError::Ephemeris { status, reason } => {
                assert_eq!(status, -1);
                assert_eq!(reason, "Sun Set: Non-finite Sun place at JD NaN");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_ok_status_passes_time() {
        assert_eq!(RiseSetOutcome::ok(2460779.54).into_result(Body::Sun, RiseSet::Set).unwrap(), 2460779.54);
    }
}
