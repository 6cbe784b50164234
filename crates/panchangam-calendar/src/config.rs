use panchangam_astronomy::{Atmosphere, IST_OFFSET_MINUTES, SearchConfig, SiderealFrame};
use panchangam_types::{GeoPosition, PanchangError, Script};
use serde::{Deserialize, Serialize};

use crate::solar::SignSource;

const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Resolver configuration.
///
/// Missing fields take their defaults when deserialized, so a JSON file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanchangConfig {
    pub location: GeoPosition,
    /// Civil time offset east of UTC, minutes. 330 is UTC+5:30.
    pub civil_offset_minutes: i32,
    pub frame: SiderealFrame,
    pub atmosphere: Atmosphere,
    pub search: SearchConfig,
    /// Days the sankranti search may march back before giving up.
    pub max_backward_days: u32,
    pub sign_source: SignSource,
    pub script: Script,
    /// Observer for chart positions, independent of `location`.
    pub chart_observer: GeoPosition,
}

impl Default for PanchangConfig {
    fn default() -> Self {
        Self {
            location: GeoPosition::PALAKKAD,
            civil_offset_minutes: IST_OFFSET_MINUTES,
            frame: SiderealFrame::LAHIRI,
            atmosphere: Atmosphere::default(),
            search: SearchConfig::default(),
            max_backward_days: 40,
            sign_source: SignSource::default(),
            script: Script::default(),
            chart_observer: GeoPosition::UJJAIN,
        }
    }
}

impl PanchangConfig {
    pub fn new() -> Self { Self::default() }

    pub fn builder() -> PanchangConfigBuilder { PanchangConfigBuilder::new() }

    pub fn location(mut self, location: GeoPosition) -> Self {
        self.location = location;
        self
    }

    /// Stored as given; [`validate`](Self::validate) rejects offsets beyond ±14 h.
    pub fn civil_offset_minutes(mut self, minutes: i32) -> Self {
        self.civil_offset_minutes = minutes;
        self
    }

    pub fn frame(mut self, frame: SiderealFrame) -> Self {
        self.frame = frame;
        self
    }

    pub fn atmosphere(mut self, atmosphere: Atmosphere) -> Self {
        self.atmosphere = atmosphere;
        self
    }

    pub fn search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn max_backward_days(mut self, days: u32) -> Self {
        self.max_backward_days = days;
        self
    }

    pub fn sign_source(mut self, source: SignSource) -> Self {
        self.sign_source = source;
        self
    }

    pub fn script(mut self, script: Script) -> Self {
        self.script = script;
        self
    }

    pub fn chart_observer(mut self, observer: GeoPosition) -> Self {
        self.chart_observer = observer;
        self
    }

    /// Checks every field against its accepted range.
    pub fn validate(&self) -> Result<(), PanchangError> {
        self.location.validate()?;
        self.chart_observer.validate()?;
        if let Some(observer) = self.frame.topocentric.as_ref() {
            observer.validate()?;
        }
        if self.civil_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(PanchangError::invalid_config(format!(
                "Civil offset {} minutes outside [-840, 840]",
                self.civil_offset_minutes
            )));
        }
        let tol = self.search.tolerance_days;
        if !(tol > 0.0 && tol < 1.0) {
            return Err(PanchangError::invalid_config(format!(
                "Search tolerance {} days outside (0, 1)",
                tol
            )));
        }
        if !(1..=200).contains(&self.search.max_iterations) {
            return Err(PanchangError::invalid_config(format!(
                "Search iteration cap {} outside [1, 200]",
                self.search.max_iterations
            )));
        }
        if !(1..=400).contains(&self.max_backward_days) {
            return Err(PanchangError::invalid_config(format!(
                "Backward search window {} days outside [1, 400]",
                self.max_backward_days
            )));
        }
        if !self.atmosphere.pressure_mbar.is_finite()
            || self.atmosphere.pressure_mbar < 0.0
            || !self.atmosphere.temperature_c.is_finite()
            || self.atmosphere.temperature_c <= -273.0
        {
            return Err(PanchangError::invalid_config("Atmosphere must have pressure >= 0 and temperature above -273 °C"));
        }
        Ok(())
    }
}

/// Builder with validation for `PanchangConfig`.
#[derive(Debug, Default)]
pub struct PanchangConfigBuilder {
    location: Option<GeoPosition>,
    civil_offset_minutes: Option<i32>,
    frame: Option<SiderealFrame>,
    atmosphere: Option<Atmosphere>,
    search: Option<SearchConfig>,
    max_backward_days: Option<u32>,
    sign_source: Option<SignSource>,
    script: Option<Script>,
    chart_observer: Option<GeoPosition>,
}

impl PanchangConfigBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn location(mut self, location: GeoPosition) -> Self { self.location = Some(location); self }
    pub fn civil_offset_minutes(mut self, minutes: i32) -> Self { self.civil_offset_minutes = Some(minutes); self }
    pub fn frame(mut self, frame: SiderealFrame) -> Self { self.frame = Some(frame); self }
    pub fn atmosphere(mut self, atmosphere: Atmosphere) -> Self { self.atmosphere = Some(atmosphere); self }
    pub fn search(mut self, search: SearchConfig) -> Self { self.search = Some(search); self }
    pub fn max_backward_days(mut self, days: u32) -> Self { self.max_backward_days = Some(days); self }
    pub fn sign_source(mut self, source: SignSource) -> Self { self.sign_source = Some(source); self }
    pub fn script(mut self, script: Script) -> Self { self.script = Some(script); self }
    pub fn chart_observer(mut self, observer: GeoPosition) -> Self { self.chart_observer = Some(observer); self }

    /// Builds and validates.
    pub fn build(self) -> Result<PanchangConfig, PanchangError> {
        let defaults = PanchangConfig::default();
        let config = PanchangConfig {
            location: self.location.unwrap_or(defaults.location),
            civil_offset_minutes: self.civil_offset_minutes.unwrap_or(defaults.civil_offset_minutes),
            frame: self.frame.unwrap_or(defaults.frame),
            atmosphere: self.atmosphere.unwrap_or(defaults.atmosphere),
            search: self.search.unwrap_or(defaults.search),
            max_backward_days: self.max_backward_days.unwrap_or(defaults.max_backward_days),
            sign_source: self.sign_source.unwrap_or_default(),
            script: self.script.unwrap_or_default(),
            chart_observer: self.chart_observer.unwrap_or(defaults.chart_observer),
        };
        config.validate()?;
        Ok(config)
    }
}
