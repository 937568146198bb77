//! Colour palette for circuit boards.
//!
//! Traces sit in a cool teal/blue band by default; highlighted traces and
//! pulses are a brighter, more saturated shift of the same hue so the board
//! reads as one circuit rather than a rainbow.

use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Default base hue (cyan).
pub const HUE_BASE: f64 = 188.0;

/// Range random palettes draw their base hue from.
pub const HUE_RANGE: std::ops::Range<f64> = 160.0..280.0;

/// How far the highlight hue may drift from the base.
pub const HUE_HIGHLIGHT_VARIANCE: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: String,
    /// Plain trace stroke.
    pub trace: String,
    /// Highlighted trace stroke and pulse core.
    pub highlight: String,
    /// Node pads.
    pub pad: String,
    /// Chip body fill.
    pub chip: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_hue(HUE_BASE, HUE_BASE)
    }
}

impl Palette {
    /// Derive every colour from a base hue and a highlight hue.
    pub fn from_hue(base: f64, highlight: f64) -> Self {
        Self {
            background: hsl_to_hex(base + 30.0, 0.6, 0.04),
            trace: hsl_to_hex(base, 0.65, 0.32),
            highlight: hsl_to_hex(highlight, 0.9, 0.62),
            pad: hsl_to_hex(base, 0.8, 0.72),
            chip: hsl_to_hex(base + 30.0, 0.35, 0.12),
        }
    }

    /// A palette seeded from `seed`, so the same seed always looks the same.
    pub fn random(seed: u64) -> Self {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let base = rng.gen_range(HUE_RANGE);
        let highlight =
            base + rng.gen_range(-HUE_HIGHLIGHT_VARIANCE..HUE_HIGHLIGHT_VARIANCE);
        Self::from_hue(base, highlight)
    }
}

/// Convert HSL to hex color string
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    // Normalize hue to 0-360
    let h = ((h % 360.0) + 360.0) % 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let r = ((r + m) * 255.0).round() as u8;
    let g = ((g + m) * 255.0).round() as u8;
    let b = ((b + m) * 255.0).round() as u8;

    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
