//! Hex color parsing and formatting.
//!
//! Theme files store every color as a 6-digit hex string. Parsing accepts the
//! value with or without the leading `#`, in either case, and ignores
//! surrounding whitespace. Formatting always produces lowercase `#rrggbb`.

use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;

/// A simple RGB color triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Parses `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(value: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidFormat {
            value: value.to_string(),
        };

        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Builds a color from integer channels, clamping each to 0–255.
    pub fn clamped(r: i32, g: i32, b: i32) -> Self {
        let clamp = |c: i32| c.clamp(0, 255) as u8;
        Rgb(clamp(r), clamp(g), clamp(b))
    }

    /// Builds a color from unit-range channels, clamping and rounding.
    pub(crate) fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb(to_byte(r), to_byte(g), to_byte(b))
    }

    /// Channels normalized to 0.0–1.0.
    pub(crate) fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.0) / 255.0,
            f64::from(self.1) / 255.0,
            f64::from(self.2) / 255.0,
        )
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

/// Parses a 6-digit hex color into its channels.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    Rgb::from_hex(hex)
}

/// Formats channels as `#rrggbb`. Out-of-range input is clamped, never rejected.
pub fn rgb_to_hex(r: i32, g: i32, b: i32) -> String {
    Rgb::clamped(r, g, b).to_hex()
}

/// True when `value` is a well-formed 6-digit hex color.
pub fn is_valid_hex(value: &str) -> bool {
    Rgb::from_hex(value).is_ok()
}
