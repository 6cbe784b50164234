use serde::{Deserialize, Serialize};

use crate::lunar::Tithi;

/// Lit fraction of the lunar disc and whether it is growing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonPhase {
    /// 0.0 at new moon, 1.0 at full moon.
    pub illumination: f64,
    pub waxing: bool,
}

/// Horizontal extent of the shadow on one row of a rendered disc, in pixels
/// relative to the disc centre. `x_left..x_right` is shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowSpan {
    pub x_left: i64,
    pub x_right: i64,
}

impl ShadowSpan {
    pub fn width(&self) -> i64 {
        self.x_right - self.x_left
    }
}

impl MoonPhase {
    /// `illumination = 1 - |tithi - 14| / 14`, clamped to `[0, 1]`;
    /// waxing through Pournami.
    pub fn from_tithi(tithi: Tithi) -> Self {
        let t = tithi.index() as f64;
        Self {
            illumination: (1.0 - (t - 14.0).abs() / 14.0).clamp(0.0, 1.0),
            waxing: tithi.index() < 15,
        }
    }

    /// Shadow on the row `row` pixels above or below the centre of a disc of
    /// `radius` pixels.
    ///
    /// The shadow hugs the left limb while waxing and the right limb while
    /// waning, covering `round(2x(1 - illumination))` of the row's half-width
    /// `x`. Rounding is half-to-even. Returns `None` outside the disc or when
    /// the row is fully lit.
    pub fn shadow_span(&self, row: i64, radius: i64) -> Option<ShadowSpan> {
        if radius <= 0 || row.abs() >= radius {
            return None;
        }
        let half = ((radius * radius - row * row) as f64).sqrt().round_ties_even() as i64;
        let shade = (2.0 * half as f64 * (1.0 - self.illumination)).round_ties_even() as i64;
        if shade <= 0 {
            return None;
        }
        Some(if self.waxing {
            ShadowSpan { x_left: -half, x_right: -half + shade }
        } else {
            ShadowSpan { x_left: half - shade, x_right: half }
        })
    }
}
