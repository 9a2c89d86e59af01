//! Color math for theme derivation.
//!
//! Everything here is pure and works on 6-digit hex strings or on the typed
//! [`Rgb`], [`Hsl`] and [`Hsv`] values:
//!
//! - hex: parsing and formatting (`#rrggbb`)
//! - space: HSL / HSV conversion and channel adjustments
//! - contrast: WCAG relative luminance, contrast ratio and levels
//!
//! ```rust
//! use qtheme::color::{contrast_ratio, optimal_text_color, wcag_level, WcagLevel};
//!
//! let ratio = contrast_ratio("#ffffff", "#000000").unwrap();
//! assert!((ratio - 21.0).abs() < 1e-6);
//! assert_eq!(wcag_level(ratio, false), WcagLevel::AAA);
//! assert_eq!(optimal_text_color("#1e1e2e").unwrap(), "#ffffff");
//! ```

mod contrast;
mod hex;
mod space;

pub use contrast::{
    contrast_ratio, contrast_report, optimal_text_color, relative_luminance, wcag_level,
    ContrastReport, WcagLevel, AAA_LARGE, AAA_NORMAL, AA_LARGE, AA_NORMAL,
};
pub use hex::{hex_to_rgb, is_valid_hex, rgb_to_hex, Rgb};
pub use space::{adjust_brightness, adjust_lightness, adjust_saturation, shade, Hsl, Hsv};
