//! Astronomical primitives for panchangam.
//!
//! The [`Ephemeris`] trait is the only seam between the calendar resolvers and
//! an ephemeris. [`MeeusEphemeris`] is the analytic default;
//! [`SyntheticEphemeris`] produces exact, hand-built scenarios.

pub mod ayanamsa;
pub mod ephemeris;
pub mod julian;
pub mod meeus;
pub mod nodes;
pub mod riseset;
pub mod search;
pub mod synthetic;

pub use ayanamsa::SiderealMode;
pub use ephemeris::{Atmosphere, Body, Ephemeris, RiseSet, RiseSetOutcome, SiderealFrame, STATUS_CIRCUMPOLAR};
pub use julian::{from_julian_day, to_julian_day, IST_OFFSET_MINUTES};
pub use meeus::MeeusEphemeris;
pub use search::{find_transition, SearchConfig};
pub use synthetic::{LinearMotion, SyntheticEphemeris};
