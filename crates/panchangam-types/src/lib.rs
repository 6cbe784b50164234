//! Core types for panchangam: signs, months, lunar attributes, chart points, solar dates and errors.

pub mod calendar;
pub mod error;
pub mod geo;
pub mod graha;
pub mod lunar;
pub mod moon;
pub mod script;
pub mod weekday;
pub mod zodiac;

pub use calendar::{SankrantiEvent, SolarCalendarDate, SolarDateLabel};
pub use error::{PanchangError, Stage, StageExt};
pub use geo::GeoPosition;
pub use graha::{Graha, GrahaPosition};
pub use lunar::{Nakshatra, Paksha, Timed, Tithi, NAKSHATRA_SPAN_DEG, TITHI_SPAN_DEG};
pub use moon::{MoonPhase, ShadowSpan};
pub use script::Script;
pub use weekday::Vaaram;
pub use zodiac::{MalayalamMonth, ZodiacSign, SIGN_SPAN_DEG};
