//! Alternate-row ("zebra") color generation.
//!
//! A zebra color is a variant of a background that keeps its hue and
//! saturation and only moves lightness (HSL) or value (HSV) until the
//! contrast ratio against the background hits a target. Dark backgrounds
//! are lightened, light ones are darkened.
//!
//! The search bisects the channel delta in `(0, max_delta]`. Contrast grows
//! monotonically with the delta in one direction, so bisection converges; the
//! closest candidate seen is kept so a result is always available. When the
//! preferred direction cannot reach the target (pure black or white clamps
//! the channel), the opposite direction is searched too.
//!
//! ```rust
//! use qtheme::zebra::{AccessibilityLevel, ZebraGenerator};
//!
//! let zebra = ZebraGenerator::new()
//!     .generate_for_accessibility_level("#ffffff", AccessibilityLevel::Moderate)
//!     .unwrap();
//! assert!(!zebra.degraded);
//! assert!((zebra.achieved_ratio - 1.30).abs() <= 0.02);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::color::Rgb;
use crate::error::{ColorError, ZebraError};

/// Allowed distance between achieved and target ratio.
pub const DEFAULT_TOLERANCE: f64 = 0.02;
/// Bisection step cap.
pub const DEFAULT_MAX_ITERATIONS: u32 = 30;
/// Largest channel change, as a fraction of the full range.
pub const DEFAULT_MAX_DELTA: f64 = 0.25;

/// Which channel the search moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZebraMethod {
    /// HSL lightness.
    #[default]
    Hsl,
    /// HSV value.
    Hsv,
}

impl ZebraMethod {
    pub const ALL: [ZebraMethod; 2] = [ZebraMethod::Hsl, ZebraMethod::Hsv];

    pub fn as_str(self) -> &'static str {
        match self {
            ZebraMethod::Hsl => "hsl",
            ZebraMethod::Hsv => "hsv",
        }
    }
}

impl fmt::Display for ZebraMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZebraMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hsl" => Ok(ZebraMethod::Hsl),
            "hsv" => Ok(ZebraMethod::Hsv),
            other => Err(format!("unknown zebra method '{}': expected hsl or hsv", other)),
        }
    }
}

/// Named contrast targets for users who do not think in ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessibilityLevel {
    #[default]
    Subtle,
    Moderate,
    High,
}

impl AccessibilityLevel {
    pub const ALL: [AccessibilityLevel; 3] = [
        AccessibilityLevel::Subtle,
        AccessibilityLevel::Moderate,
        AccessibilityLevel::High,
    ];

    /// The contrast ratio this level aims for.
    pub fn target(self) -> f64 {
        match self {
            AccessibilityLevel::Subtle => 1.15,
            AccessibilityLevel::Moderate => 1.30,
            AccessibilityLevel::High => 1.80,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessibilityLevel::Subtle => "subtle",
            AccessibilityLevel::Moderate => "moderate",
            AccessibilityLevel::High => "high",
        }
    }
}

impl fmt::Display for AccessibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessibilityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subtle" => Ok(AccessibilityLevel::Subtle),
            "moderate" => Ok(AccessibilityLevel::Moderate),
            "high" => Ok(AccessibilityLevel::High),
            other => Err(format!(
                "unknown accessibility level '{}': expected subtle, moderate or high",
                other
            )),
        }
    }
}

/// Outcome of a zebra search.
#[derive(Debug, Clone, PartialEq)]
pub struct ZebraResult {
    /// The generated alternate color, `#rrggbb`.
    pub zebra_color: String,
    /// The base color, normalized to `#rrggbb`.
    pub base_color: String,
    pub target_ratio: f64,
    pub achieved_ratio: f64,
    pub method: ZebraMethod,
    /// Set when `achieved_ratio` is further than the tolerance from the target.
    pub degraded: bool,
}

impl ZebraResult {
    /// Distance between achieved and target ratio.
    pub fn error(&self) -> f64 {
        (self.achieved_ratio - self.target_ratio).abs()
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    color: Rgb,
    ratio: f64,
}

/// Searches for alternate-row colors. Holds only tuning parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ZebraGenerator {
    tolerance: f64,
    max_iterations: u32,
    max_delta: f64,
}

impl Default for ZebraGenerator {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }
}

impl ZebraGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Caps the channel delta. Clamped to `(0, 1]`.
    pub fn with_max_delta(mut self, max_delta: f64) -> Self {
        self.max_delta = max_delta.clamp(f64::EPSILON, 1.0);
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn max_delta(&self) -> f64 {
        self.max_delta
    }

    /// Generates a zebra color at `target_ratio`.
    ///
    /// Fails with [`ZebraError::UnreachableContrast`] when no candidate is
    /// within tolerance. The error carries the closest candidate, see
    /// [`ZebraError::best_effort`].
    pub fn generate(
        &self,
        base: &str,
        target_ratio: f64,
        method: ZebraMethod,
    ) -> Result<ZebraResult, ZebraError> {
        let result = self.generate_best_effort(base, target_ratio, method)?;
        if result.degraded {
            return Err(ZebraError::UnreachableContrast {
                target: target_ratio,
                best: result,
            });
        }
        Ok(result)
    }

    /// Like [`generate`](Self::generate), but returns the closest candidate
    /// with `degraded` set instead of failing.
    pub fn generate_best_effort(
        &self,
        base: &str,
        target_ratio: f64,
        method: ZebraMethod,
    ) -> Result<ZebraResult, ColorError> {
        let base_rgb = Rgb::from_hex(base)?;
        let best = self.search(base_rgb, target_ratio, method);
        let degraded = (best.ratio - target_ratio).abs() > self.tolerance;

        tracing::debug!(
            base = %base_rgb,
            zebra = %best.color,
            target_ratio,
            achieved = best.ratio,
            method = %method,
            degraded,
            "zebra search finished"
        );

        Ok(ZebraResult {
            zebra_color: best.color.to_hex(),
            base_color: base_rgb.to_hex(),
            target_ratio,
            achieved_ratio: best.ratio,
            method,
            degraded,
        })
    }

    /// Generates a zebra color for a named level, trying both methods and
    /// keeping whichever lands closer to the target. HSL wins ties.
    pub fn generate_for_accessibility_level(
        &self,
        base: &str,
        level: AccessibilityLevel,
    ) -> Result<ZebraResult, ColorError> {
        let target = level.target();
        let hsl = self.generate_best_effort(base, target, ZebraMethod::Hsl)?;
        let hsv = self.generate_best_effort(base, target, ZebraMethod::Hsv)?;
        Ok(if hsv.error() < hsl.error() { hsv } else { hsl })
    }

    fn search(&self, base: Rgb, target: f64, method: ZebraMethod) -> Candidate {
        let channel = match method {
            ZebraMethod::Hsl => base.to_hsl().l,
            ZebraMethod::Hsv => base.to_hsv().v,
        };
        let preferred = if channel < 0.5 { 1.0 } else { -1.0 };

        let best = self.search_direction(base, target, method, preferred);
        if (best.ratio - target).abs() <= self.tolerance {
            return best;
        }

        let fallback = self.search_direction(base, target, method, -preferred);
        if (fallback.ratio - target).abs() < (best.ratio - target).abs() {
            fallback
        } else {
            best
        }
    }

    /// Bisects the delta along one direction (`sign` is `1.0` or `-1.0`).
    fn search_direction(&self, base: Rgb, target: f64, method: ZebraMethod, sign: f64) -> Candidate {
        let mut best = Candidate {
            color: base,
            ratio: 1.0,
        };
        let mut lo = 0.0;
        let mut hi = self.max_delta;

        // The upper bound first: if it falls short, nothing in between helps.
        let edge = self.candidate(base, method, sign * hi);
        let edge_ratio = base.contrast_ratio(edge);
        if edge_ratio < target {
            if edge_ratio > best.ratio {
                best = Candidate {
                    color: edge,
                    ratio: edge_ratio,
                };
            }
            return best;
        }

        for _ in 0..self.max_iterations {
            let mid = (lo + hi) / 2.0;
            let color = self.candidate(base, method, sign * mid);
            let ratio = base.contrast_ratio(color);

            if (ratio - target).abs() < (best.ratio - target).abs() {
                best = Candidate { color, ratio };
            }
            if (ratio - target).abs() <= self.tolerance {
                break;
            }
            if ratio < target {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        if (edge_ratio - target).abs() < (best.ratio - target).abs() {
            best = Candidate {
                color: edge,
                ratio: edge_ratio,
            };
        }
        best
    }

    fn candidate(&self, base: Rgb, method: ZebraMethod, delta: f64) -> Rgb {
        match method {
            ZebraMethod::Hsl => {
                let mut hsl = base.to_hsl();
                hsl.l = (hsl.l + delta).clamp(0.0, 1.0);
                hsl.to_rgb()
            }
            ZebraMethod::Hsv => {
                let mut hsv = base.to_hsv();
                hsv.v = (hsv.v + delta).clamp(0.0, 1.0);
                hsv.to_rgb()
            }
        }
    }
}

/// [`ZebraGenerator::generate`] with default tuning.
pub fn generate_zebra_color(
    base: &str,
    target_ratio: f64,
    method: ZebraMethod,
) -> Result<ZebraResult, ZebraError> {
    ZebraGenerator::default().generate(base, target_ratio, method)
}

/// [`ZebraGenerator::generate_for_accessibility_level`] with default tuning.
pub fn generate_for_accessibility_level(
    base: &str,
    level: AccessibilityLevel,
) -> Result<ZebraResult, ColorError> {
    ZebraGenerator::default().generate_for_accessibility_level(base, level)
}
