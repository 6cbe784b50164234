use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PanchangError;

/// Observer position on the Earth's surface.
///
/// Longitude is positive east, latitude positive north, both in degrees.
/// Altitude is metres above sea level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub altitude: f64,
}

impl GeoPosition {
    /// Palakkad, Kerala. The default Panchangam location.
    pub const PALAKKAD: GeoPosition = GeoPosition { longitude: 76.6548, latitude: 10.7867, altitude: 0.0 };

    /// Ujjain, Madhya Pradesh. The default chart observer.
    pub const UJJAIN: GeoPosition = GeoPosition { longitude: 75.7681, latitude: 23.1765, altitude: 0.0 };

    /// Creates a sea-level position.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { longitude, latitude, altitude: 0.0 }
    }

    pub const fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = altitude;
        self
    }

    /// Checks coordinate ranges.
    pub fn validate(&self) -> Result<(), PanchangError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(PanchangError::invalid_config(format!(
                "Latitude {} outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(PanchangError::invalid_config(format!(
                "Longitude {} outside [-180, 180]",
                self.longitude
            )));
        }
        if !self.altitude.is_finite() {
            return Err(PanchangError::invalid_config("Altitude must be finite"));
        }
        Ok(())
    }
}

impl Default for GeoPosition {
    fn default() -> Self {
        Self::PALAKKAD
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(f, "{:.4}°{}, {:.4}°{}", self.latitude.abs(), ns, self.longitude.abs(), ew)
    }
}
