//! Chart points: the nine grahas and the lagna.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::script::Script;
use crate::zodiac::ZodiacSign;

/// A point placed on the sidereal chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Graha {
    Ravi,
    Chandran,
    Kujan,
    Budhan,
    Guru,
    Shukran,
    Mandan,
    /// Ascending lunar node (Rahu).
    Sarppi,
    /// Descending lunar node (Ketu), always opposite Sarppi.
    Shikhi,
    /// Rising point of the ecliptic.
    Lagnam,
}

const GRAHA_NAMES: [(&str, &str); 10] = [
    ("Sun", "രവി"),
    ("Moon", "ചന്ദ്ര"),
    ("Mars", "കുജ"),
    ("Mercury", "ബുധ"),
    ("Jupiter", "ഗുരു"),
    ("Venus", "ശുക്ര"),
    ("Saturn", "മന്ദ"),
    ("Rahu", "സർപ്പി"),
    ("Ketu", "ശിഖി"),
    ("Lagna", "ലഗ്നം"),
];

impl Graha {
    /// Chart order: the seven planets, the two nodes, then the lagna.
    pub const ALL: [Graha; 10] = [
        Graha::Ravi,
        Graha::Chandran,
        Graha::Kujan,
        Graha::Budhan,
        Graha::Guru,
        Graha::Shukran,
        Graha::Mandan,
        Graha::Sarppi,
        Graha::Shikhi,
        Graha::Lagnam,
    ];

    pub fn name(self, script: Script) -> &'static str {
        script.pick(GRAHA_NAMES[self as usize])
    }
}

impl fmt::Display for Graha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(Script::English))
    }
}

/// Sidereal longitude of one chart point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrahaPosition {
    pub graha: Graha,
    /// Sidereal longitude in `[0, 360)`.
    pub longitude_deg: f64,
}

impl GrahaPosition {
    pub fn sign(&self) -> ZodiacSign {
        ZodiacSign::from_longitude(self.longitude_deg)
    }

    /// Degrees travelled inside the sign.
    pub fn degree_in_sign(&self) -> f64 {
        self.longitude_deg - self.sign().start_longitude()
    }
}
