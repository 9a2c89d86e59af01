//! HSL and HSV conversions and channel adjustments.
//!
//! Hue is stored as a fraction of a full turn in `[0, 1)`, saturation,
//! lightness and value in `[0, 1]`. Conversions back to [`Rgb`] round to the
//! nearest 8-bit channel, so a round trip can move a channel by at most one.

use super::hex::Rgb;
use crate::error::ColorError;

/// A color in HSL space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// A color in HSV space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Hue fraction shared by the HSL and HSV forward transforms.
fn hue(r: f64, g: f64, b: f64, max: f64, min: f64) -> f64 {
    let span = max - min;
    let rc = (max - r) / span;
    let gc = (max - g) / span;
    let bc = (max - b) / span;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    (h / 6.0).rem_euclid(1.0)
}

impl Rgb {
    /// Converts to HSL.
    pub fn to_hsl(self) -> Hsl {
        let (r, g, b) = self.to_unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        if max == min {
            return Hsl { h: 0.0, s: 0.0, l };
        }
        let s = if l <= 0.5 {
            (max - min) / (max + min)
        } else {
            (max - min) / (2.0 - max - min)
        };
        Hsl {
            h: hue(r, g, b, max, min),
            s,
            l,
        }
    }

    /// Converts to HSV.
    pub fn to_hsv(self) -> Hsv {
        let (r, g, b) = self.to_unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        if max == min {
            return Hsv {
                h: 0.0,
                s: 0.0,
                v: max,
            };
        }
        Hsv {
            h: hue(r, g, b, max, min),
            s: (max - min) / max,
            v: max,
        }
    }
}

impl Hsl {
    /// Converts back to RGB, clamping out-of-range components first.
    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(1.0);
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);
        if s == 0.0 {
            return Rgb::from_unit(l, l, l);
        }
        let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let m1 = 2.0 * l - m2;
        Rgb::from_unit(
            hue_channel(m1, m2, h + 1.0 / 3.0),
            hue_channel(m1, m2, h),
            hue_channel(m1, m2, h - 1.0 / 3.0),
        )
    }
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

impl Hsv {
    /// Converts back to RGB, clamping out-of-range components first.
    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(1.0);
        let s = self.s.clamp(0.0, 1.0);
        let v = self.v.clamp(0.0, 1.0);
        if s == 0.0 {
            return Rgb::from_unit(v, v, v);
        }
        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match (sector as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Rgb::from_unit(r, g, b)
    }
}

/// Adds `delta` to the HSV value channel, clamped to `[0, 1]`.
pub fn adjust_brightness(hex: &str, delta: f64) -> Result<String, ColorError> {
    let mut hsv = Rgb::from_hex(hex)?.to_hsv();
    hsv.v = (hsv.v + delta).clamp(0.0, 1.0);
    Ok(hsv.to_rgb().to_hex())
}

/// Adds `delta` to the HSV saturation channel, clamped to `[0, 1]`.
pub fn adjust_saturation(hex: &str, delta: f64) -> Result<String, ColorError> {
    let mut hsv = Rgb::from_hex(hex)?.to_hsv();
    hsv.s = (hsv.s + delta).clamp(0.0, 1.0);
    Ok(hsv.to_rgb().to_hex())
}

/// Adds `delta` to the HSL lightness channel, clamped to `[0, 1]`.
pub fn adjust_lightness(hex: &str, delta: f64) -> Result<String, ColorError> {
    let mut hsl = Rgb::from_hex(hex)?.to_hsl();
    hsl.l = (hsl.l + delta).clamp(0.0, 1.0);
    Ok(hsl.to_rgb().to_hex())
}

/// Moves HSL lightness by `amount` away from the side the color sits on:
/// dark colors (`l < 0.5`) get lighter, light colors get darker.
pub fn shade(hex: &str, amount: f64) -> Result<String, ColorError> {
    let hsl = Rgb::from_hex(hex)?.to_hsl();
    let delta = if hsl.l < 0.5 { amount } else { -amount };
    adjust_lightness(hex, delta)
}
