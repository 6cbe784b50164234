//! Moon phase from the tithi, and the shadow geometry a disc renderer needs.

use chrono::NaiveDate;
use panchangam_astronomy::julian::civil_midnight_jd;
use panchangam_astronomy::{Body, Ephemeris, RiseSet};
use panchangam_types::{MoonPhase, PanchangError, ShadowSpan, Stage, StageExt, Tithi};

use crate::config::PanchangConfig;
use crate::lunar::tithi_at;

/// `illumination = 1 - |tithi - 14| / 14`, `waxing = tithi < 15`.
pub fn moon_phase(tithi: Tithi) -> MoonPhase {
    MoonPhase::from_tithi(tithi)
}

/// Phase for the tithi current at sunrise of `date`.
pub fn moon_phase_on<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    date: NaiveDate,
    config: &PanchangConfig,
) -> Result<MoonPhase, PanchangError> {
    let jd0 = civil_midnight_jd(date, config.civil_offset_minutes);
    let sunrise = ephemeris
        .rise_or_set(jd0, Body::Sun, RiseSet::Rise, &config.location, &config.atmosphere)
        .at_stage(Stage::Sunrise)?;
    let tithi = tithi_at(ephemeris, sunrise, &config.frame).at_stage(Stage::TithiSearch)?;
    Ok(moon_phase(tithi))
}

/// Shaded span of every row of a disc of `radius` pixels, top to bottom.
/// Rows are offsets from the centre; fully lit rows are left out.
pub fn shadow_rows(phase: &MoonPhase, radius: i64) -> Vec<(i64, ShadowSpan)> {
    (1 - radius..radius)
        .filter_map(|row| phase.shadow_span(row, radius).map(|span| (row, span)))
        .collect()
}
