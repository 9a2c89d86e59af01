//! WCAG relative luminance and contrast ratio.
//!
//! Luminance follows the WCAG 2.x definition: each sRGB channel is
//! linearized (linear below `0.03928`, power law with exponent 2.4 above) and
//! the channels are weighted with the ITU-R BT.709 coefficients
//! `0.2126 / 0.7152 / 0.0722`.
//!
//! The contrast ratio is `(L_lighter + 0.05) / (L_darker + 0.05)`, which makes
//! it symmetric and bounded to `[1, 21]`.

use std::fmt;

use super::hex::Rgb;
use crate::error::ColorError;

/// Ratio at which normal text passes WCAG AA.
pub const AA_NORMAL: f64 = 4.5;
/// Ratio at which normal text passes WCAG AAA.
pub const AAA_NORMAL: f64 = 7.0;
/// Ratio at which large text (18pt, or 14pt bold) passes WCAG AA.
pub const AA_LARGE: f64 = 3.0;
/// Ratio at which large text passes WCAG AAA.
pub const AAA_LARGE: f64 = 4.5;

/// Convert an sRGB component (0–1) to linear light.
fn linearize(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl Rgb {
    /// Relative luminance in `[0, 1]`.
    pub fn relative_luminance(self) -> f64 {
        let (r, g, b) = self.to_unit();
        0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
    }

    /// Contrast ratio against `other`, always `>= 1.0`.
    pub fn contrast_ratio(self, other: Rgb) -> f64 {
        ratio_of(self.relative_luminance(), other.relative_luminance())
    }
}

fn ratio_of(la: f64, lb: f64) -> f64 {
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Relative luminance of a hex color.
pub fn relative_luminance(hex: &str) -> Result<f64, ColorError> {
    Ok(Rgb::from_hex(hex)?.relative_luminance())
}

/// Contrast ratio between two hex colors. Argument order does not matter.
pub fn contrast_ratio(a: &str, b: &str) -> Result<f64, ColorError> {
    Ok(Rgb::from_hex(a)?.contrast_ratio(Rgb::from_hex(b)?))
}

/// WCAG compliance level for a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WcagLevel {
    Fail,
    AA,
    AAA,
}

impl WcagLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            WcagLevel::Fail => "FAIL",
            WcagLevel::AA => "AA",
            WcagLevel::AAA => "AAA",
        }
    }

    pub fn passes(self) -> bool {
        self != WcagLevel::Fail
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a ratio. Thresholds are inclusive.
pub fn wcag_level(ratio: f64, large_text: bool) -> WcagLevel {
    let (aa, aaa) = if large_text {
        (AA_LARGE, AAA_LARGE)
    } else {
        (AA_NORMAL, AAA_NORMAL)
    };
    if ratio >= aaa {
        WcagLevel::AAA
    } else if ratio >= aa {
        WcagLevel::AA
    } else {
        WcagLevel::Fail
    }
}

/// Ratio and level for a foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastReport {
    pub ratio: f64,
    pub level: WcagLevel,
    pub large_text: bool,
}

/// Computes the contrast ratio of `fg` on `bg` and classifies it.
pub fn contrast_report(fg: &str, bg: &str, large_text: bool) -> Result<ContrastReport, ColorError> {
    let ratio = contrast_ratio(fg, bg)?;
    Ok(ContrastReport {
        ratio,
        level: wcag_level(ratio, large_text),
        large_text,
    })
}

/// Black or white, whichever reads better on `background`. Ties go to black.
pub fn optimal_text_color(background: &str) -> Result<String, ColorError> {
    let bg = Rgb::from_hex(background)?;
    let black = bg.contrast_ratio(Rgb::BLACK);
    let white = bg.contrast_ratio(Rgb::WHITE);
    let pick = if black >= white { Rgb::BLACK } else { Rgb::WHITE };
    Ok(pick.to_hex())
}
