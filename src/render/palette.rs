//! Hex color parsing and the value-to-color mapping of the heatmap.

use crate::core::{MatrixError, MatrixResult};
use crate::table::{ABSENT, PRESENT};
use plotters::style::{RGBColor, BLACK};

/// Parse `#RRGGBB` or `#RGB` (case-insensitive) into a color.
pub fn parse_hex_color(value: &str) -> MatrixResult<RGBColor> {
    let invalid = || MatrixError::InvalidColor {
        value: value.to_string(),
    };

    let digits = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| invalid());
    match digits.len() {
        6 => Ok(RGBColor(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        3 => {
            // #abc is shorthand for #aabbcc
            let short = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
            Ok(RGBColor(short(0)?, short(1)?, short(2)?))
        }
        _ => Err(invalid()),
    }
}

/// Discrete colormap over a fixed value domain.
///
/// A value is normalized into `[0, 1]` over `[vmin, vmax]`, scaled by the
/// number of colors and clamped, so the top of the domain lands on the last
/// entry.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<RGBColor>,
    vmin: f64,
    vmax: f64,
}

impl Palette {
    /// Black for absent cells, `success` for present ones, over `[0, 100]`.
    pub fn two_class(success: RGBColor) -> Self {
        Self {
            colors: vec![BLACK, success],
            vmin: f64::from(ABSENT),
            vmax: f64::from(PRESENT),
        }
    }

    pub fn index_for(&self, value: f64) -> usize {
        let last = self.colors.len().saturating_sub(1);
        let span = self.vmax - self.vmin;
        if span <= 0.0 || value.is_nan() {
            return 0;
        }
        let normalized = (value - self.vmin) / span;
        let scaled = (normalized * self.colors.len() as f64).floor();
        if scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(last)
        }
    }

    pub fn color_for(&self, value: f64) -> RGBColor {
        self.colors[self.index_for(value)]
    }
}
