//! Named observer locations.

use panchangam_types::{GeoPosition, PanchangError, Script};

/// A named location with its coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Place {
    pub name_en: &'static str,
    pub name_ml: &'static str,
    pub position: GeoPosition,
}

impl Place {
    pub fn name(&self, script: Script) -> &'static str {
        script.pick((self.name_en, self.name_ml))
    }
}

pub const PALAKKAD: Place = Place { name_en: "Palakkad", name_ml: "പാലക്കാട്", position: GeoPosition::PALAKKAD };

pub const UJJAIN: Place = Place { name_en: "Ujjain", name_ml: "ഉജ്ജൈനി", position: GeoPosition::UJJAIN };

pub const VARANASI: Place = Place { name_en: "Varanasi", name_ml: "വാരണാസി", position: GeoPosition::new(25.3176, 82.9739) };

/// Every registered place; the first is the default.
pub const PLACES: [Place; 3] = [PALAKKAD, UJJAIN, VARANASI];

/// Finds a place by English (case-insensitive) or Malayalam name.
///
/// # Errors
/// `LocationResolution` for names not in [`PLACES`].
pub fn lookup(name: &str) -> Result<&'static Place, PanchangError> {
    let wanted = name.trim();
    PLACES
        .iter()
        .find(|p| p.name_en.eq_ignore_ascii_case(wanted) || p.name_ml == wanted)
        .ok_or_else(|| PanchangError::LocationResolution { place: wanted.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_either_script() {
        assert_eq!(lookup("varanasi").unwrap().position, VARANASI.position);
        assert_eq!(lookup(" UJJAIN ").unwrap().name_ml, "ഉജ്ജൈനി");
        assert_eq!(lookup("പാലക്കാട്").unwrap().position, GeoPosition::PALAKKAD);
    }

    #[test]
    fn test_unknown_place() {
        let err = lookup("Atlantis").unwrap_err();
        assert_eq!(err, PanchangError::LocationResolution { place: "Atlantis".into() });
    }

    #[test]
    fn test_default_place_first() {
        assert_eq!(PLACES[0], PALAKKAD);
    }
}
