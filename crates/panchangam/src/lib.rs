//! # Panchangam
//!
//! Malayalam (Kollam era) solar calendar dates, tithi and nakshatra with their
//! end times, the Moon's phase and a sidereal graha chart, computed from a
//! sidereal (Lahiri) ephemeris for an observer in Kerala or elsewhere.
//!
//! This crate is a facade that re-exports functionality from the `panchangam` ecosystem.
//!
//! ## Modules
//!
//! - `types`: Core types (SolarCalendarDate, Tithi, Nakshatra, Graha, PanchangError, etc.)
//! - `astronomy`: Ephemeris trait, analytic and synthetic ephemerides, root finder
//! - `calendar`: Solar, lunar, moon-phase and chart resolvers, export, configuration
//! - `places`: Registered observer locations
//!
//! ## Usage
//!
//! ```rust,no_run
//! use panchangam::prelude::*;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
//! let solar = panchangam::solar_date_for(date); // Result<SolarCalendarDate, PanchangError>
//! let tithi = date.tithi();
//! ```

pub use panchangam_core::*;
