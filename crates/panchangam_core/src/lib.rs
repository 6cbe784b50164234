//! Panchangam engine.
//!
//! [`Panchang`] bundles an [`Ephemeris`] with a [`PanchangConfig`] so callers
//! resolve dates without threading both through every call. The resolvers
//! themselves live in `panchangam-calendar` and stay usable on their own.

pub mod extension;
pub mod places;

pub use panchangam_astronomy as astronomy;
pub use panchangam_calendar as calendar;
pub use panchangam_types as types;

pub use extension::MalayalamDateExt;
pub use places::{Place, PLACES, lookup as lookup_place};

pub use panchangam_astronomy::{
    Atmosphere, Ephemeris, MeeusEphemeris, SearchConfig, SiderealFrame, SiderealMode, SyntheticEphemeris,
};
pub use panchangam_calendar::{
    CalendarRecord, ChartPositions, ExportFailure, ExportReport, LunarDay, LunarSnapshot, PanchangConfig,
    PanchangConfigBuilder, SignSource,
};
pub use panchangam_types::{
    GeoPosition, Graha, GrahaPosition, MalayalamMonth, MoonPhase, Nakshatra, PanchangError, SankrantiEvent, Script, ShadowSpan,
    SolarCalendarDate, SolarDateLabel, Stage, Tithi, Vaaram, ZodiacSign,
};

pub mod prelude {
    pub use crate::extension::MalayalamDateExt;
    pub use crate::{Panchang, lunar_day_for, solar_date_for};
    pub use panchangam_calendar::{PanchangConfig, SignSource};
    pub use panchangam_types::*;
}

use std::ops::RangeInclusive;

use chrono::{NaiveDate, NaiveDateTime};
use panchangam_calendar::{chart, export, lunar, moon_phase, solar, text};
use panchangam_types::StageExt;
use tracing::debug;

/// Ephemeris plus configuration; the entry point for every query.
#[derive(Debug, Clone)]
pub struct Panchang<E: Ephemeris = MeeusEphemeris> {
    ephemeris: E,
    config: PanchangConfig,
}

impl Default for Panchang<MeeusEphemeris> {
    fn default() -> Self {
        Self::with_ephemeris(MeeusEphemeris::new())
    }
}

impl Panchang<MeeusEphemeris> {
    /// Analytic ephemeris, default configuration (Palakkad, IST, Lahiri).
    pub fn new() -> Self {
        Self::default()
    }

    /// Default engine observing from a registered place.
    pub fn at_place(name: &str) -> Result<Self, PanchangError> {
        let place = places::lookup(name)?;
        Ok(Self::new().place(place))
    }
}

impl<E: Ephemeris> Panchang<E> {
    pub fn with_ephemeris(ephemeris: E) -> Self {
        Self { ephemeris, config: PanchangConfig::default() }
    }

    /// Validates `config` before accepting it.
    pub fn try_new(ephemeris: E, config: PanchangConfig) -> Result<Self, PanchangError> {
        config.validate()?;
        Ok(Self { ephemeris, config })
    }

    pub fn with_config(mut self, config: PanchangConfig) -> Self {
        self.config = config;
        self
    }

    pub fn place(mut self, place: &Place) -> Self {
        self.config.location = place.position;
        self
    }

    pub fn config(&self) -> &PanchangConfig {
        &self.config
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    pub fn solar_date(&self, date: NaiveDate) -> Result<SolarCalendarDate, PanchangError> {
        solar::solar_date(&self.ephemeris, date, &self.config)
    }

    pub fn solar_date_with_hint(
        &self,
        date: NaiveDate,
        hint: Option<&SankrantiEvent>,
    ) -> Result<SolarCalendarDate, PanchangError> {
        solar::solar_date_with_hint(&self.ephemeris, date, &self.config, hint)
    }

    /// Sankranti governing `date`: the last ingress on or before its sunset.
    pub fn previous_sankranti(&self, date: NaiveDate) -> Result<SankrantiEvent, PanchangError> {
        let bounds = solar::day_bounds(&self.ephemeris, date, &self.config)?;
        solar::previous_sankranti(&self.ephemeris, bounds.sunset_jd, &self.config).at_stage(Stage::SankrantiSearch)
    }

    pub fn lunar_day(&self, date: NaiveDate) -> Result<LunarDay, PanchangError> {
        lunar::lunar_day(&self.ephemeris, date, &self.config)
    }

    pub fn lunar_at(&self, datetime: NaiveDateTime) -> Result<LunarSnapshot, PanchangError> {
        lunar::lunar_at(&self.ephemeris, datetime, &self.config)
    }

    /// Chart positions seen from the configured chart observer (Ujjain by default).
    pub fn chart(&self, datetime: NaiveDateTime) -> Result<ChartPositions, PanchangError> {
        chart::chart_positions(&self.ephemeris, datetime, &self.config.chart_observer, &self.config)
    }

    /// Chart positions seen from `place`; the calendar location is untouched.
    pub fn chart_at(&self, datetime: NaiveDateTime, place: &Place) -> Result<ChartPositions, PanchangError> {
        chart::chart_positions(&self.ephemeris, datetime, &place.position, &self.config)
    }

    /// Phase of the tithi current at sunrise of `date`.
    pub fn moon_phase(&self, date: NaiveDate) -> Result<MoonPhase, PanchangError> {
        moon_phase::moon_phase_on(&self.ephemeris, date, &self.config)
    }

    pub fn export(&self, from: NaiveDate, to: NaiveDate) -> Result<ExportReport, PanchangError> {
        export::export_range(&self.ephemeris, from, to, &self.config)
    }

    /// Solar date rendered in the configured script.
    pub fn solar_text(&self, date: NaiveDate) -> Result<String, PanchangError> {
        Ok(text::solar_date_text(&self.solar_date(date)?, self.config.script))
    }

    /// Sunrise lunar block with end times, in the configured script.
    pub fn lunar_text(&self, date: NaiveDate) -> Result<String, PanchangError> {
        let day = self.lunar_day(date)?;
        text::lunar_day_text(&day, self.config.script, self.config.civil_offset_minutes)
    }

    /// One line per chart point, in the configured script.
    pub fn chart_text(&self, datetime: NaiveDateTime) -> Result<String, PanchangError> {
        Ok(text::chart_text(&self.chart(datetime)?, self.config.script))
    }

    /// Lazily resolves every date in `range`, sharing sankrantis between days.
    pub fn solar_dates(&self, range: RangeInclusive<NaiveDate>) -> SolarDates<'_, E> {
        let (start, end) = range.into_inner();
        debug!(%start, %end, "solar date iterator");
        SolarDates { engine: self, current: Some(start), end, last: None }
    }
}

/// Iterator over consecutive solar dates. See [`Panchang::solar_dates`].
#[derive(Debug)]
pub struct SolarDates<'a, E: Ephemeris> {
    engine: &'a Panchang<E>,
    current: Option<NaiveDate>,
    end: NaiveDate,
    last: Option<SankrantiEvent>,
}

impl<E: Ephemeris> Iterator for SolarDates<'_, E> {
    type Item = Result<SolarCalendarDate, PanchangError>;

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.current.filter(|d| *d <= self.end)?;
        self.current = date.succ_opt();

        match self.engine.solar_date_with_hint(date, self.last.as_ref()) {
            Ok(solar) => {
                self.last = Some(solar.sankranti);
                Some(Ok(solar))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Solar date with the default engine.
pub fn solar_date_for(date: NaiveDate) -> Result<SolarCalendarDate, PanchangError> {
    Panchang::new().solar_date(date)
}

/// Sunrise lunar attributes with the default engine.
pub fn lunar_day_for(date: NaiveDate) -> Result<LunarDay, PanchangError> {
    Panchang::new().lunar_day(date)
}
