use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PanchangError;
use crate::script::Script;

/// Angular width of one tithi (Moon-Sun elongation) in degrees.
pub const TITHI_SPAN_DEG: f64 = 12.0;
/// Angular width of one nakshatra in degrees.
pub const NAKSHATRA_SPAN_DEG: f64 = 360.0 / 27.0;

const PHASE_NAMES: [(&str, &str); 15] = [
    ("Pratipada", "പ്രതിപദ"),
    ("Dwitiya", "ദ്വിതീയ"),
    ("Tritiya", "തൃതീയ"),
    ("Chaturthi", "ചതുർഥി"),
    ("Panchami", "പഞ്ചമി"),
    ("Shashthi", "ഷഷ്ഠി"),
    ("Saptami", "സപ്തമി"),
    ("Ashtami", "അഷ്ടമി"),
    ("Navami", "നവമി"),
    ("Dashami", "ദശമി"),
    ("Ekadashi", "ഏകാദശി"),
    ("Dwadashi", "ദ്വാദശി"),
    ("Trayodashi", "ത്രയോദശി"),
    ("Chaturdashi", "ചതുർദശി"),
    ("", ""),
];

const NAKSHATRA_NAMES: [(&str, &str); 27] = [
    ("Ashwathi", "അശ്വതി"),
    ("Bharani", "ഭരണി"),
    ("Karthika", "കാർത്തിക"),
    ("Rohini", "രോഹിണി"),
    ("Makayiram", "മകയിരം"),
    ("Thiruvathira", "തിരുവാതിര"),
    ("Punartham", "പുണർതം"),
    ("Pooyam", "പൂയം"),
    ("Ayilyam", "ആയില്യം"),
    ("Makam", "മകം"),
    ("Pooram", "പൂരം"),
    ("Uthram", "ഉത്രം"),
    ("Atham", "അത്തം"),
    ("Chithira", "ചിത്തിര"),
    ("Chothi", "ചോതി"),
    ("Vishakham", "വിശാഖം"),
    ("Anizham", "അനിഴം"),
    ("Thrikketta", "തൃക്കേട്ട"),
    ("Moolam", "മൂലം"),
    ("Pooradam", "പൂരാടം"),
    ("Uthradam", "ഉത്രാടം"),
    ("Thiruvonam", "തിരുവോണം"),
    ("Avittam", "അവിട്ടം"),
    ("Chathayam", "ചതയം"),
    ("Pooruruttathi", "പൂരുരുട്ടാതി"),
    ("Uthrattathi", "ഉത്രട്ടാതി"),
    ("Revathi", "രേവതി"),
];

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paksha {
    /// Bright half, new moon to full moon.
    Shukla,
    /// Dark half, full moon to new moon.
    Krishna,
}

impl Paksha {
    pub fn name(self, script: Script) -> &'static str {
        match self {
            Paksha::Shukla => script.pick(("Shukla", "ശുക്ല")),
            Paksha::Krishna => script.pick(("Krishna", "കൃഷ്ണ")),
        }
    }
}

/// Lunar day, 0 (Shukla Pratipada) to 29 (Amavasya).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tithi(u8);

impl Tithi {
    pub const COUNT: u8 = 30;
    /// Full moon.
    pub const POURNAMI: Tithi = Tithi(14);
    /// New moon.
    pub const AMAVASYA: Tithi = Tithi(29);

    pub fn new(index: u8) -> Result<Self, PanchangError> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(PanchangError::out_of_range("Tithi index", index, "0..30"))
        }
    }

    /// Index taken modulo 30.
    pub fn wrapping(index: u32) -> Self {
        Self((index % Self::COUNT as u32) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn paksha(self) -> Paksha {
        if self.0 < 15 { Paksha::Shukla } else { Paksha::Krishna }
    }

    /// Full name, e.g. "Shukla Ekadashi", "Pournami", "Amavasya".
    pub fn name(self, script: Script) -> String {
        match self.0 {
            14 => script.pick(("Pournami", "പൗർണമി")).to_string(),
            29 => script.pick(("Amavasya", "അമാവാസി")).to_string(),
            i => {
                let phase = script.pick(PHASE_NAMES[(i % 15) as usize]);
                format!("{} {}", self.paksha().name(script), phase)
            }
        }
    }
}

impl TryFrom<u8> for Tithi {
    type Error = PanchangError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tithi> for u8 {
    fn from(t: Tithi) -> u8 {
        t.0
    }
}

impl fmt::Display for Tithi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(Script::English))
    }
}

/// Lunar mansion, 0 (Ashwathi) to 26 (Revathi).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Nakshatra(u8);

impl Nakshatra {
    pub const COUNT: u8 = 27;

    pub fn new(index: u8) -> Result<Self, PanchangError> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(PanchangError::out_of_range("Nakshatra index", index, "0..27"))
        }
    }

    /// Index taken modulo 27.
    pub fn wrapping(index: u32) -> Self {
        Self((index % Self::COUNT as u32) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn name(self, script: Script) -> &'static str {
        script.pick(NAKSHATRA_NAMES[self.0 as usize])
    }
}

impl TryFrom<u8> for Nakshatra {
    type Error = PanchangError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Nakshatra> for u8 {
    fn from(n: Nakshatra) -> u8 {
        n.0
    }
}

impl fmt::Display for Nakshatra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(Script::English))
    }
}

/// A lunar attribute together with the instant (JD UT) at which it stops being current.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timed<T> {
    pub value: T,
    pub ends_jd: f64,
}

impl<T> Timed<T> {
    pub fn new(value: T, ends_jd: f64) -> Self {
        Self { value, ends_jd }
    }
}
