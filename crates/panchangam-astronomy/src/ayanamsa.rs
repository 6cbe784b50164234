//! Lahiri ayanamsa.
//!
//! `ayanamsa(T) = 23.853° + p_A(T)`, where p_A is the IAU 2006 general
//! precession in ecliptic longitude and T is Julian centuries of TT since J2000.

use serde::{Deserialize, Serialize};

/// Sidereal zodiac definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SiderealMode {
    /// Lahiri (Chitrapaksha) measured from the mean equinox; nutation is left
    /// out of sidereal positions.
    #[default]
    Lahiri,
    /// Lahiri applied to apparent positions, nutation in longitude included.
    LahiriApparent,
}

impl SiderealMode {
    pub fn includes_nutation(self) -> bool {
        matches!(self, Self::LahiriApparent)
    }
}

const LAHIRI_J2000_DEG: f64 = 23.853;

/// IAU 2006 general precession in longitude, arcseconds.
pub fn general_precession_arcsec(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5
}

/// Lahiri ayanamsa in degrees for `t` Julian centuries (TT) since J2000.
pub fn lahiri_deg(t: f64) -> f64 {
    LAHIRI_J2000_DEG + general_precession_arcsec(t) / 3600.0
}
