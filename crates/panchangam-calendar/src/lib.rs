//! Calendar resolvers for panchangam.
//!
//! Every resolver is a free function over an [`Ephemeris`](panchangam_astronomy::Ephemeris)
//! and a [`PanchangConfig`]. None of them keeps state between calls.

pub mod chart;
pub mod config;
pub mod export;
pub mod lunar;
pub mod moon_phase;
pub mod solar;
pub mod text;

pub use chart::{ChartPositions, chart_positions};
pub use config::{PanchangConfig, PanchangConfigBuilder};
pub use export::{CalendarRecord, ExportFailure, ExportReport, export_range};
pub use lunar::{
    DISPLAY_CLOCK_SHIFT, LunarDay, LunarSnapshot, lunar_at, lunar_day, nakshatra_index, tithi_index,
};
pub use moon_phase::{moon_phase, moon_phase_on, shadow_rows};
pub use solar::{
    DayBounds, SignSource, epoch_day, kali_year, kollam_year, previous_sankranti, solar_date,
    solar_date_with_hint, sun_sign,
};
pub use text::{chart_text, lunar_day_text, lunar_snapshot_text, solar_date_text};
