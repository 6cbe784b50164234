use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PanchangError;

/// Writing system used when rendering names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    /// Latin transliteration ("Medam", "Thiruvonam").
    English,
    /// Native Malayalam script ("മേടം", "തിരുവോണം").
    Malayalam,
}

impl Default for Script {
    fn default() -> Self {
        Self::Malayalam
    }
}

impl Script {
    /// Picks the entry of a `(english, malayalam)` name pair.
    pub fn pick(self, names: (&'static str, &'static str)) -> &'static str {
        match self {
            Script::English => names.0,
            Script::Malayalam => names.1,
        }
    }
}

impl FromStr for Script {
    type Err = PanchangError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" | "latin" => Ok(Script::English),
            "ml" | "malayalam" => Ok(Script::Malayalam),
            _ => Err(PanchangError::parse(s, "a script (english or malayalam)")),
        }
    }
}
