use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::script::Script;

/// Day of the week (vaaram).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vaaram {
    Njayar,
    Thinkal,
    Chovva,
    Budhan,
    Vyazham,
    Velli,
    Shani,
}

const VAARAM_NAMES: [(&str, &str); 7] = [
    ("Njayar", "ഞായർ"),
    ("Thinkal", "തിങ്കൾ"),
    ("Chovva", "ചൊവ്വ"),
    ("Budhan", "ബുധൻ"),
    ("Vyazham", "വ്യാഴം"),
    ("Velli", "വെള്ളി"),
    ("Shani", "ശനി"),
];

impl Vaaram {
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    pub fn name(self, script: Script) -> &'static str {
        script.pick(VAARAM_NAMES[self as usize])
    }
}

impl From<Weekday> for Vaaram {
    fn from(w: Weekday) -> Self {
        match w {
            Weekday::Sun => Vaaram::Njayar,
            Weekday::Mon => Vaaram::Thinkal,
            Weekday::Tue => Vaaram::Chovva,
            Weekday::Wed => Vaaram::Budhan,
            Weekday::Thu => Vaaram::Vyazham,
            Weekday::Fri => Vaaram::Velli,
            Weekday::Sat => Vaaram::Shani,
        }
    }
}

impl fmt::Display for Vaaram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(Script::English))
    }
}
