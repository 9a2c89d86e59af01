//! Property-based tests for the color math, zebra search and renderer.

use proptest::prelude::*;
use qtheme::color::{contrast_ratio, relative_luminance, rgb_to_hex, wcag_level, WcagLevel};
use qtheme::zebra::{generate_for_accessibility_level, AccessibilityLevel, DEFAULT_TOLERANCE};
use qtheme::{StylesheetRenderer, ThemeConfig};

// ============================================================================
// Strategies
// ============================================================================

fn hex_color() -> impl Strategy<Value = String> {
    (any::<u8>(), any::<u8>(), any::<u8>())
        .prop_map(|(r, g, b)| rgb_to_hex(i32::from(r), i32::from(g), i32::from(b)))
}

fn level() -> impl Strategy<Value = AccessibilityLevel> {
    prop_oneof![
        Just(AccessibilityLevel::Subtle),
        Just(AccessibilityLevel::Moderate),
        Just(AccessibilityLevel::High),
    ]
}

fn theme() -> impl Strategy<Value = ThemeConfig> {
    (hex_color(), hex_color(), hex_color(), hex_color()).prop_map(|(bg, text, primary, accent)| {
        ThemeConfig::new("generated").with_colors(bg, text, primary, accent)
    })
}

// ============================================================================
// Contrast
// ============================================================================

proptest! {
    /// Argument order never changes the ratio.
    #[test]
    fn contrast_is_symmetric(a in hex_color(), b in hex_color()) {
        prop_assert_eq!(contrast_ratio(&a, &b).unwrap(), contrast_ratio(&b, &a).unwrap());
    }

    /// A color against itself is exactly 1:1.
    #[test]
    fn contrast_identity(a in hex_color()) {
        prop_assert_eq!(contrast_ratio(&a, &a).unwrap(), 1.0);
    }

    /// Ratios stay within the WCAG range.
    #[test]
    fn contrast_is_bounded(a in hex_color(), b in hex_color()) {
        let ratio = contrast_ratio(&a, &b).unwrap();
        prop_assert!((1.0..=21.0 + 1e-9).contains(&ratio));
    }

    #[test]
    fn luminance_is_unit_range(a in hex_color()) {
        let lum = relative_luminance(&a).unwrap();
        prop_assert!((0.0..=1.0 + 1e-12).contains(&lum));
    }

    /// Large text never grades lower than normal text.
    #[test]
    fn large_text_is_never_stricter(ratio in 1.0f64..21.0) {
        prop_assert!(wcag_level(ratio, true) >= wcag_level(ratio, false));
    }

    #[test]
    fn level_is_fail_below_three(ratio in 1.0f64..2.99) {
        prop_assert_eq!(wcag_level(ratio, true), WcagLevel::Fail);
        prop_assert_eq!(wcag_level(ratio, false), WcagLevel::Fail);
    }
}

// ============================================================================
// Zebra
// ============================================================================

proptest! {
    /// Every level either lands within tolerance or says it did not.
    #[test]
    fn zebra_within_tolerance_or_degraded(base in hex_color(), level in level()) {
        let result = generate_for_accessibility_level(&base, level).unwrap();
        let within = (result.achieved_ratio - level.target()).abs() <= DEFAULT_TOLERANCE;
        prop_assert!(within || result.degraded);
        prop_assert_eq!(result.degraded, !within);
    }

    /// The reported ratio is the real ratio between the two colors.
    #[test]
    fn zebra_reports_actual_ratio(base in hex_color(), level in level()) {
        let result = generate_for_accessibility_level(&base, level).unwrap();
        let actual = contrast_ratio(&result.base_color, &result.zebra_color).unwrap();
        prop_assert!((actual - result.achieved_ratio).abs() < 1e-9);
    }
}

// ============================================================================
// Rendering
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any valid theme renders, and renders the same way twice.
    #[test]
    fn render_full_is_deterministic(theme in theme()) {
        let renderer = StylesheetRenderer::new();
        let first = renderer.render_full(&theme).unwrap();
        let second = renderer.render_full(&theme).unwrap();
        prop_assert_eq!(first, second);
    }
}
