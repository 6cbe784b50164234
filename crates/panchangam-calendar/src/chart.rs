//! Sidereal chart: graha and lagna positions at a civil instant.
//!
//! Positions are topocentric for the chart observer, which is configured
//! separately from the calendar location and defaults to Ujjain.

use chrono::NaiveDateTime;
use panchangam_astronomy::julian::civil_to_jd;
use panchangam_astronomy::{Body, Ephemeris, SiderealFrame};
use panchangam_types::{GeoPosition, Graha, GrahaPosition, PanchangError, Stage, StageExt, ZodiacSign};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PanchangConfig;

/// Grahas read directly from the ephemeris.
const EPHEMERIS_GRAHAS: [(Graha, Body); 8] = [
    (Graha::Ravi, Body::Sun),
    (Graha::Chandran, Body::Moon),
    (Graha::Kujan, Body::Mars),
    (Graha::Budhan, Body::Mercury),
    (Graha::Guru, Body::Jupiter),
    (Graha::Shukran, Body::Venus),
    (Graha::Mandan, Body::Saturn),
    (Graha::Sarppi, Body::TrueNode),
];

/// Every chart point at one instant, in [`Graha::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPositions {
    pub datetime: NaiveDateTime,
    pub jd_ut: f64,
    pub observer: GeoPosition,
    pub positions: Vec<GrahaPosition>,
}

impl ChartPositions {
    pub fn get(&self, graha: Graha) -> Option<&GrahaPosition> {
        self.positions.iter().find(|p| p.graha == graha)
    }

    /// Points standing in `sign`, in chart order.
    pub fn occupants(&self, sign: ZodiacSign) -> impl Iterator<Item = Graha> + '_ {
        self.positions.iter().filter(move |p| p.sign() == sign).map(|p| p.graha)
    }
}

/// Sidereal positions of the nine grahas and the lagna at a civil date-time,
/// seen from `observer`.
///
/// Rahu (Sarppi) is the true node; Ketu (Shikhi) is placed opposite it. The
/// lagna is the sidereal ascendant; its sign is the first whole-sign house.
pub fn chart_positions<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    datetime: NaiveDateTime,
    observer: &GeoPosition,
    config: &PanchangConfig,
) -> Result<ChartPositions, PanchangError> {
    observer.validate().at_stage(Stage::Chart)?;
    let jd_ut = civil_to_jd(datetime, config.civil_offset_minutes);
    let frame = SiderealFrame::topocentric(config.frame.mode, *observer);

    let mut positions = Vec::with_capacity(Graha::ALL.len());
    for (graha, body) in EPHEMERIS_GRAHAS {
        let longitude_deg = ephemeris.sidereal_longitude(jd_ut, body, &frame).at_stage(Stage::Chart)?;
        positions.push(GrahaPosition { graha, longitude_deg });
    }
    let rahu = positions[positions.len() - 1].longitude_deg;
    positions.push(GrahaPosition { graha: Graha::Shikhi, longitude_deg: (rahu + 180.0) % 360.0 });

    let lagna = ephemeris.ascendant(jd_ut, observer, config.frame.mode).at_stage(Stage::Chart)?;
    positions.push(GrahaPosition { graha: Graha::Lagnam, longitude_deg: lagna });

    debug!(%datetime, jd_ut, %observer, lagna, "chart positions");
    Ok(ChartPositions { datetime, jd_ut, observer: *observer, positions })
}
