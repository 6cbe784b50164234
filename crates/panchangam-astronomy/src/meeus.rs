//! Analytic ephemeris backend on the `astro` crate.
//!
//! Sun and planets from VSOP87, Moon from the ELP-2000 series of Meeus ch. 47,
//! nutation from the IAU 1980 theory. Positions are referred to the mean
//! equinox of date before the Lahiri ayanamsa is removed.

use std::f64::consts::{PI, TAU};

use astro::planet::Planet;

use panchangam_types::{GeoPosition, PanchangError};
use tracing::trace;

use crate::ayanamsa::{self, SiderealMode};
use crate::ephemeris::{
    Atmosphere, Body, Ephemeris, RiseSet, RiseSetOutcome, STATUS_CIRCUMPOLAR, SiderealFrame,
};
use crate::julian::{centuries_since_j2000, ut_to_tt};
use crate::nodes;
use crate::riseset::{self, HorizonPlace, RiseSetResult};

const AU_KM: f64 = 149_597_870.7;
const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.14;
const MOON_RADIUS_KM: f64 = 1737.4;
/// Solar semidiameter at 1 AU, arcseconds.
const SUN_SEMIDIAMETER_ARCSEC: f64 = 959.63;
/// Constant of annual aberration, arcseconds.
const ABERRATION_ARCSEC: f64 = 20.4898;
/// Polar to equatorial radius ratio of the reference ellipsoid.
const EARTH_FLATTENING_RATIO: f64 = 0.996_647_19;
/// Light travel time over one astronomical unit, days.
const LIGHT_TIME_DAYS_PER_AU: f64 = 0.005_775_518_3;

/// Geocentric ecliptic place, mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
struct EclipticPlace {
    long_rad: f64,
    lat_rad: f64,
    distance_km: f64,
}

/// Analytic ephemeris, accurate to a few arcseconds for the Sun and planets
/// and a few tens of arcseconds for the Moon over several centuries around
/// J2000.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeeusEphemeris;

impl MeeusEphemeris {
    pub fn new() -> Self {
        Self
    }

    fn ecliptic_place(&self, jd_tt: f64, body: Body) -> EclipticPlace {
        match body {
            Body::Sun => {
                let (point, distance_au) = astro::sun::geocent_ecl_pos(jd_tt);
                let aberration = (ABERRATION_ARCSEC / distance_au / 3600.0).to_radians();
                EclipticPlace {
                    long_rad: point.long - aberration,
                    lat_rad: point.lat,
                    distance_km: distance_au * AU_KM,
                }
            }
            Body::Moon => {
                let (point, distance_km) = astro::lunar::geocent_ecl_pos(jd_tt);
                EclipticPlace { long_rad: point.long, lat_rad: point.lat, distance_km }
            }
            Body::Mercury => Self::planet_place(jd_tt, &Planet::Mercury),
            Body::Venus => Self::planet_place(jd_tt, &Planet::Venus),
            Body::Mars => Self::planet_place(jd_tt, &Planet::Mars),
            Body::Jupiter => Self::planet_place(jd_tt, &Planet::Jupiter),
            Body::Saturn => Self::planet_place(jd_tt, &Planet::Saturn),
            // a direction, not a body: no distance, no parallax
            Body::TrueNode => EclipticPlace {
                long_rad: nodes::true_node_deg(jd_tt).to_radians(),
                lat_rad: 0.0,
                distance_km: f64::INFINITY,
            },
        }
    }

    /// Heliocentric rectangular ecliptic coordinates, AU.
    fn heliocentric_xyz(planet: &Planet, jd_tt: f64) -> [f64; 3] {
        let (long, lat, radius) = astro::planet::heliocent_coords(planet, jd_tt);
        [radius * lat.cos() * long.cos(), radius * lat.cos() * long.sin(), radius * lat.sin()]
    }

    /// Geocentric apparent place of a planet, corrected for light time and
    /// annual aberration (Meeus ch. 33 and 23).
    fn planet_place(jd_tt: f64, planet: &Planet) -> EclipticPlace {
        let earth = Self::heliocentric_xyz(&Planet::Earth, jd_tt);
        let mut rel = [0.0; 3];
        let mut distance_au = 0.0;
        let mut tau = 0.0;
        for _ in 0..3 {
            let body = Self::heliocentric_xyz(planet, jd_tt - tau);
            rel = [body[0] - earth[0], body[1] - earth[1], body[2] - earth[2]];
            distance_au = (rel[0] * rel[0] + rel[1] * rel[1] + rel[2] * rel[2]).sqrt();
            tau = LIGHT_TIME_DAYS_PER_AU * distance_au;
        }

        let long = rel[1].atan2(rel[0]);
        let lat = rel[2].atan2(rel[0].hypot(rel[1]));
        let sun_long = earth[1].atan2(earth[0]) + PI;
        let kappa = (ABERRATION_ARCSEC / 3600.0).to_radians();
        EclipticPlace {
            long_rad: long - kappa * (sun_long - long).cos() / lat.cos(),
            lat_rad: lat - kappa * (sun_long - long).sin() * lat.sin(),
            distance_km: distance_au * AU_KM,
        }
    }

    /// True obliquity of the ecliptic, radians.
    fn true_obliquity(jd_tt: f64, nutation_obliquity: f64) -> f64 {
        let t = centuries_since_j2000(jd_tt);
        let mean_arcsec = 84_381.406 - 46.836_769 * t - 0.000_183_1 * t * t + 0.002_003_40 * t * t * t;
        (mean_arcsec / 3600.0).to_radians() + nutation_obliquity
    }

    /// Shifts an ecliptic place to the observer (Meeus ch. 40, ecliptic form).
    fn topocentric(place: EclipticPlace, observer: &GeoPosition, jd_ut: f64, obliquity: f64) -> EclipticPlace {
        let phi = observer.latitude.to_radians();
        let u = (EARTH_FLATTENING_RATIO * phi.tan()).atan();
        let height = observer.altitude / (EARTH_EQUATORIAL_RADIUS_KM * 1000.0);
        let rho_sin = EARTH_FLATTENING_RATIO * u.sin() + height * phi.sin();
        let rho_cos = u.cos() + height * phi.cos();

        let sin_pi = EARTH_EQUATORIAL_RADIUS_KM / place.distance_km;
        let theta = riseset::gmst_rad(jd_ut) + observer.longitude.to_radians();
        let (sin_l, cos_l) = place.long_rad.sin_cos();
        let (sin_b, cos_b) = place.lat_rad.sin_cos();
        let (sin_e, cos_e) = obliquity.sin_cos();

        let n = cos_l * cos_b - rho_cos * sin_pi * theta.cos();
        let long = (sin_l * cos_b - sin_pi * (rho_sin * sin_e + rho_cos * cos_e * theta.sin())).atan2(n);
        let lat = (long.cos() * (sin_b - sin_pi * (rho_sin * cos_e - rho_cos * sin_e * theta.sin())) / n).atan();

        EclipticPlace { long_rad: long, lat_rad: lat, distance_km: place.distance_km }
    }

    fn horizon_place(&self, jd_ut: f64, body: Body) -> Result<HorizonPlace, PanchangError> {
        if !jd_ut.is_finite() {
            return Err(PanchangError::ephemeris(-1, format!("Non-finite Julian Day {}", jd_ut)));
        }
        let jd_tt = ut_to_tt(jd_ut);
        let place = self.ecliptic_place(jd_tt, body);
        let (nutation_long, nutation_obliquity) = astro::nutation::nutation(jd_tt);
        let obliquity = Self::true_obliquity(jd_tt, nutation_obliquity);

        let long = place.long_rad + nutation_long;
        let (sin_l, cos_l) = long.sin_cos();
        let (sin_e, cos_e) = obliquity.sin_cos();
        let ra = (sin_l * cos_e - place.lat_rad.tan() * sin_e).atan2(cos_l).rem_euclid(TAU);
        let dec = (place.lat_rad.sin() * cos_e + place.lat_rad.cos() * sin_e * sin_l).asin();

        let parallax_deg = (EARTH_EQUATORIAL_RADIUS_KM / place.distance_km).asin().to_degrees();
        let semidiameter_deg = match body {
            Body::Sun => SUN_SEMIDIAMETER_ARCSEC * AU_KM / place.distance_km / 3600.0,
            Body::Moon => (MOON_RADIUS_KM / place.distance_km).asin().to_degrees(),
            _ => 0.0,
        };

        if !(ra.is_finite() && dec.is_finite()) {
            return Err(PanchangError::ephemeris(-1, format!("Non-finite {:?} place at JD {}", body, jd_ut)));
        }
        Ok(HorizonPlace { ra_rad: ra, dec_rad: dec, semidiameter_deg, parallax_deg })
    }

    /// Removes the Lahiri ayanamsa from a tropical longitude.
    fn to_sidereal(tropical_deg: f64, jd_ut: f64, jd_tt: f64, what: &str) -> Result<f64, PanchangError> {
        let sidereal = (tropical_deg - ayanamsa::lahiri_deg(centuries_since_j2000(jd_tt))).rem_euclid(360.0);
        if !sidereal.is_finite() {
            return Err(PanchangError::ephemeris(-1, format!("Non-finite {} longitude at JD {}", what, jd_ut)));
        }
        // rem_euclid can round up to exactly 360.0
        Ok(if sidereal >= 360.0 { 0.0 } else { sidereal })
    }
}

impl Ephemeris for MeeusEphemeris {
    fn sidereal_longitude(&self, jd_ut: f64, body: Body, frame: &SiderealFrame) -> Result<f64, PanchangError> {
        if !jd_ut.is_finite() {
            return Err(PanchangError::ephemeris(-1, format!("Non-finite Julian Day {}", jd_ut)));
        }
        let jd_tt = ut_to_tt(jd_ut);
        let mut place = self.ecliptic_place(jd_tt, body);
        let (nutation_long, nutation_obliquity) = astro::nutation::nutation(jd_tt);

        if let Some(observer) = frame.topocentric.as_ref().filter(|_| body != Body::TrueNode) {
            let obliquity = Self::true_obliquity(jd_tt, nutation_obliquity);
            place = Self::topocentric(place, observer, jd_ut, obliquity);
        }

        let mut tropical = place.long_rad.to_degrees();
        if frame.mode.includes_nutation() {
            tropical += nutation_long.to_degrees();
        }
        Self::to_sidereal(tropical, jd_ut, jd_tt, &format!("{:?}", body))
    }

    fn ascendant(&self, jd_ut: f64, geo: &GeoPosition, mode: SiderealMode) -> Result<f64, PanchangError> {
        if !jd_ut.is_finite() {
            return Err(PanchangError::ephemeris(-1, format!("Non-finite Julian Day {}", jd_ut)));
        }
        let jd_tt = ut_to_tt(jd_ut);
        let (nutation_long, nutation_obliquity) = astro::nutation::nutation(jd_tt);
        let obliquity = Self::true_obliquity(jd_tt, nutation_obliquity);

        // apparent sidereal time: GMST plus the equation of the equinoxes
        let lst = riseset::gmst_rad(jd_ut) + nutation_long * obliquity.cos() + geo.longitude.to_radians();
        let mut tropical = riseset::ascendant_rad(lst, obliquity, geo.latitude.to_radians()).to_degrees();
        if !mode.includes_nutation() {
            tropical -= nutation_long.to_degrees();
        }
        Self::to_sidereal(tropical, jd_ut, jd_tt, "ascendant")
    }

    fn rise_or_set_raw(
        &self,
        jd_start: f64,
        body: Body,
        kind: RiseSet,
        geo: &GeoPosition,
        atmosphere: &Atmosphere,
    ) -> RiseSetOutcome {
        let refraction = riseset::horizon_refraction_deg(atmosphere, geo.altitude);
        let result = riseset::next_rise_set(|jd| self.horizon_place(jd, body), geo, kind, jd_start, refraction);
        match result {
            Ok(RiseSetResult::Event(jd)) => RiseSetOutcome::ok(jd),
            Ok(polar) => {
                trace!(?body, ?kind, jd_start, ?polar, "no rise/set event");
                RiseSetOutcome::failed(STATUS_CIRCUMPOLAR)
            }
            Err(err) => {
                trace!(?body, ?kind, jd_start, %err, "rise/set computation failed");
                match err.root_cause() {
                    PanchangError::Ephemeris { status, reason } => RiseSetOutcome::failed_with(*status, reason.clone()),
                    other => RiseSetOutcome::failed_with(-1, other.to_string()),
                }
            }
        }
    }
}
