use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PanchangError;
use crate::script::Script;

/// Span of one zodiac sign in degrees.
pub const SIGN_SPAN_DEG: f64 = 30.0;

/// Sidereal zodiac sign (rashi), indexed 0 (Mesha) to 11 (Meena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

const SIGN_NAMES: [&str; 12] = [
    "Mesha", "Vrishabha", "Mithuna", "Karka", "Simha", "Kanya", "Tula", "Vrischika", "Dhanu", "Makara", "Kumbha",
    "Meena",
];

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Mesha,
        ZodiacSign::Vrishabha,
        ZodiacSign::Mithuna,
        ZodiacSign::Karka,
        ZodiacSign::Simha,
        ZodiacSign::Kanya,
        ZodiacSign::Tula,
        ZodiacSign::Vrischika,
        ZodiacSign::Dhanu,
        ZodiacSign::Makara,
        ZodiacSign::Kumbha,
        ZodiacSign::Meena,
    ];

    /// Sign for an index, wrapping modulo 12.
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % 12) as usize]
    }

    /// Sign occupied by a sidereal longitude: `floor(lon / 30) mod 12`.
    pub fn from_longitude(longitude_deg: f64) -> Self {
        let idx = (longitude_deg.rem_euclid(360.0) / SIGN_SPAN_DEG).floor() as u8;
        Self::from_index(idx)
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Sidereal longitude at which the Sun enters this sign.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * SIGN_SPAN_DEG
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Sign name; in Malayalam a sign shares its month's name.
    pub fn name(self, script: Script) -> &'static str {
        script.pick((SIGN_NAMES[self.index() as usize], self.month().name(Script::Malayalam)))
    }

    /// Malayalam solar month governed by this sign.
    pub fn month(self) -> MalayalamMonth {
        MalayalamMonth::from_index(self.index())
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(Script::English))
    }
}

/// Malayalam solar month, indexed 0 (Medam) to 11 (Meenam).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MalayalamMonth {
    Medam,
    Edavam,
    Midhunam,
    Karkidakam,
    Chingam,
    Kanni,
    Thulam,
    Vrischikam,
    Dhanu,
    Makaram,
    Kumbham,
    Meenam,
}

const MONTH_NAMES: [(&str, &str); 12] = [
    ("Medam", "മേടം"),
    ("Edavam", "ഇടവം"),
    ("Midhunam", "മിഥുനം"),
    ("Karkidakam", "കർക്കിടകം"),
    ("Chingam", "ചിങ്ങം"),
    ("Kanni", "കന്നി"),
    ("Thulam", "തുലാം"),
    ("Vrischikam", "വൃശ്ചികം"),
    ("Dhanu", "ധനു"),
    ("Makaram", "മകരം"),
    ("Kumbham", "കുംഭം"),
    ("Meenam", "മീനം"),
];

impl MalayalamMonth {
    pub const ALL: [MalayalamMonth; 12] = [
        MalayalamMonth::Medam,
        MalayalamMonth::Edavam,
        MalayalamMonth::Midhunam,
        MalayalamMonth::Karkidakam,
        MalayalamMonth::Chingam,
        MalayalamMonth::Kanni,
        MalayalamMonth::Thulam,
        MalayalamMonth::Vrischikam,
        MalayalamMonth::Dhanu,
        MalayalamMonth::Makaram,
        MalayalamMonth::Kumbham,
        MalayalamMonth::Meenam,
    ];

    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % 12) as usize]
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// 1-based month number, as used in exported records.
    pub fn number(self) -> u8 {
        self.index() + 1
    }

    pub fn sign(self) -> ZodiacSign {
        ZodiacSign::from_index(self.index())
    }

    pub fn name(self, script: Script) -> &'static str {
        script.pick(MONTH_NAMES[self.index() as usize])
    }

    /// Looks a month up by name in either script.
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        MONTH_NAMES
            .iter()
            .position(|(en, ml)| en.eq_ignore_ascii_case(trimmed) || *ml == trimmed)
            .map(|i| Self::from_index(i as u8))
    }
}

impl From<ZodiacSign> for MalayalamMonth {
    fn from(sign: ZodiacSign) -> Self {
        sign.month()
    }
}

impl fmt::Display for MalayalamMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(Script::English))
    }
}

impl FromStr for MalayalamMonth {
    type Err = PanchangError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .ok_or_else(|| PanchangError::parse(s, "a Malayalam month"))
    }
}
