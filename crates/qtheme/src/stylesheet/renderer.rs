use std::collections::BTreeMap;

use crate::error::Result;
use crate::theme::{validate, BaseColor, ThemeConfig, ValidationReport};
use crate::zebra::{AccessibilityLevel, ZebraGenerator};

use super::component::ComponentType;
use super::engine::QssEngine;
use super::slots::{invalid_color, normalized, resolve, template_context};

/// Renders themes into QSS.
///
/// Rendering is pure: the same theme always produces the same text, and the
/// theme is never modified. A generated zebra color is used for the output
/// only.
///
/// ```rust
/// use qtheme::stylesheet::{ComponentType, StylesheetRenderer};
/// use qtheme::theme::ThemeConfig;
///
/// let theme = ThemeConfig::new("light").with_colors("#ffffff", "#1a1a1a", "#0078d4", "#ff6b35");
/// let renderer = StylesheetRenderer::new();
///
/// let full = renderer.render_full(&theme).unwrap();
/// assert!(full.contains("QPushButton"));
///
/// let button = renderer.render_component(&theme, ComponentType::Button).unwrap();
/// assert!(button.contains("#0078d4"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StylesheetRenderer {
    zebra: ZebraGenerator,
    zebra_level: AccessibilityLevel,
    engine: QssEngine,
}

impl StylesheetRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level used when a theme has no explicit zebra color.
    pub fn with_zebra_level(mut self, level: AccessibilityLevel) -> Self {
        self.zebra_level = level;
        self
    }

    pub fn with_zebra_generator(mut self, generator: ZebraGenerator) -> Self {
        self.zebra = generator;
        self
    }

    pub fn zebra_level(&self) -> AccessibilityLevel {
        self.zebra_level
    }

    pub fn validate(&self, theme: &ThemeConfig) -> ValidationReport {
        validate(theme)
    }

    /// Renders every component in [`ComponentType::ALL`] order, separated by
    /// blank lines.
    pub fn render_full(&self, theme: &ThemeConfig) -> Result<String> {
        self.validate(theme).into_result(&theme.name)?;
        tracing::debug!(theme = %theme.name, "rendering full stylesheet");

        let mut fragments = Vec::with_capacity(ComponentType::ALL.len());
        for component in ComponentType::ALL {
            fragments.push(self.render_checked(theme, component)?);
        }

        let mut out = fragments.join("\n\n");
        out.push('\n');
        Ok(out)
    }

    /// Renders a single component fragment.
    pub fn render_component(&self, theme: &ThemeConfig, component: ComponentType) -> Result<String> {
        self.validate(theme).into_result(&theme.name)?;
        tracing::debug!(theme = %theme.name, %component, "rendering component");
        self.render_checked(theme, component)
    }

    /// The final color of every slot of `component`, keyed by slot name.
    pub fn resolve_slots(
        &self,
        theme: &ThemeConfig,
        component: ComponentType,
    ) -> Result<BTreeMap<String, String>> {
        self.validate(theme).into_result(&theme.name)?;
        resolve(theme, component, || self.zebra_color(theme))
    }

    /// The alternate-row color the renderer uses for `theme`.
    ///
    /// Explicit colors win (`zebra`, then `panel.zebra.alternate`); otherwise
    /// one is generated from the background at the configured level.
    pub fn zebra_color(&self, theme: &ThemeConfig) -> Result<String> {
        if let Some(explicit) = theme.zebra_override() {
            let field = if theme.zebra.is_some() { "zebra" } else { "panel.zebra.alternate" };
            return normalized(theme, field.to_string(), explicit);
        }

        let background = theme.base(BaseColor::Background).unwrap_or_default();
        let result = self
            .zebra
            .generate_for_accessibility_level(background, self.zebra_level)
            .map_err(|err| invalid_color(theme, BaseColor::Background.key().to_string(), err))?;

        if result.degraded {
            tracing::warn!(
                theme = %theme.name,
                target_ratio = result.target_ratio,
                achieved = result.achieved_ratio,
                zebra = %result.zebra_color,
                "zebra contrast target not reached, using closest color"
            );
        }
        Ok(result.zebra_color)
    }

    fn render_checked(&self, theme: &ThemeConfig, component: ComponentType) -> Result<String> {
        let slots = resolve(theme, component, || self.zebra_color(theme))?;
        self.engine.render(component, &template_context(&slots))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::contrast_ratio;
    use crate::error::{Error, Violation};

    fn light() -> ThemeConfig {
        ThemeConfig::new("light").with_colors("#ffffff", "#1a1a1a", "#0078d4", "#ff6b35")
    }

    #[test]
    fn test_render_full_contains_every_component_in_order() {
        let css = StylesheetRenderer::new().render_full(&light()).unwrap();
        let positions: Vec<usize> = [
            "/* Base */",
            "/* Buttons */",
            "/* Inputs */",
            "/* Panels",
            "/* Menus */",
            "/* Progress",
            "/* Scrollbars */",
            "/* Tabs */",
            "/* Toolbars */",
            "/* Status",
            "/* Text",
            "/* Checkboxes and radio buttons */",
        ]
        .iter()
        .map(|marker| css.find(marker).unwrap_or_else(|| panic!("missing {marker}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(css.ends_with("}\n"));
    }

    #[test]
    fn test_render_full_is_deterministic() {
        let renderer = StylesheetRenderer::new();
        let theme = light();
        assert_eq!(
            renderer.render_full(&theme).unwrap(),
            renderer.render_full(&theme).unwrap()
        );
    }

    #[test]
    fn test_render_component_is_part_of_full() {
        let renderer = StylesheetRenderer::new();
        let full = renderer.render_full(&light()).unwrap();
        for component in ComponentType::ALL {
            let fragment = renderer.render_component(&light(), component).unwrap();
            assert!(full.contains(&fragment), "{component} fragment not in full output");
        }
    }

    #[test]
    fn test_invalid_theme_renders_nothing() {
        let mut theme = light();
        theme.background_color = Some("white".to_string());
        let err = StylesheetRenderer::new().render_full(&theme).unwrap_err();
        match err {
            Error::InvalidTheme { violations, .. } => {
                assert_eq!(
                    violations,
                    vec![Violation::InvalidColor {
                        field: "backgroundColor".into(),
                        value: "white".into()
                    }]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_explicit_zebra_is_used() {
        let theme = light().with_zebra("#f2f2f2");
        let panel = StylesheetRenderer::new()
            .render_component(&theme, ComponentType::Panel)
            .unwrap();
        assert!(panel.contains("alternate-background-color: #f2f2f2;"));
    }

    #[test]
    fn test_colors_without_hash_render_as_hex() {
        let theme = ThemeConfig::new("t")
            .with_colors("ffffff", "000000", "0078d4", "ff6b35")
            .with_zebra("F0F0F0");
        let renderer = StylesheetRenderer::new();

        let base = renderer.render_component(&theme, ComponentType::Base).unwrap();
        assert!(base.contains("background-color: #ffffff;"));
        assert!(base.contains("color: #000000;"));
        assert!(base.contains("selection-background-color: #0078d4;"));
        assert!(!base.contains(": ffffff;"));

        let full = renderer.render_full(&theme).unwrap();
        assert!(full.contains("alternate-background-color: #f0f0f0;"));
        assert!(!full.contains(": 0078d4"));
    }

    #[test]
    fn test_checkbox_and_radio_indicators() {
        let qss = StylesheetRenderer::new()
            .render_component(&light(), ComponentType::Checkbox)
            .unwrap();
        assert!(qss.contains("QCheckBox::indicator:checked {\n    background-color: #0078d4;"));
        assert!(qss.contains("QRadioButton::indicator:checked {\n    border: 3px solid #ffffff;"));
        assert!(qss.contains("rgba("));
        assert!(qss.ends_with('}'));
    }

    #[test]
    fn test_legacy_panel_zebra_is_used() {
        let theme = light().with_slot("panel", "zebra.alternate", "#ededed");
        let renderer = StylesheetRenderer::new();
        assert_eq!(renderer.zebra_color(&theme).unwrap(), "#ededed");
    }

    #[test]
    fn test_generated_zebra_follows_level() {
        let theme = light();
        let subtle = StylesheetRenderer::new().zebra_color(&theme).unwrap();
        let high = StylesheetRenderer::new()
            .with_zebra_level(AccessibilityLevel::High)
            .zebra_color(&theme)
            .unwrap();
        let subtle_ratio = contrast_ratio("#ffffff", &subtle).unwrap();
        let high_ratio = contrast_ratio("#ffffff", &high).unwrap();
        assert!((subtle_ratio - 1.15).abs() <= 0.02);
        assert!(high_ratio > subtle_ratio);
    }

    #[test]
    fn test_rendering_does_not_write_zebra_back() {
        let theme = light();
        let before = theme.clone();
        StylesheetRenderer::new().render_full(&theme).unwrap();
        assert_eq!(theme, before);
        assert!(theme.zebra.is_none());
    }

    #[test]
    fn test_resolve_slots_validates() {
        let renderer = StylesheetRenderer::new();
        let slots = renderer.resolve_slots(&light(), ComponentType::Menu).unwrap();
        assert_eq!(slots["background"], "#ffffff");
        assert!(renderer
            .resolve_slots(&ThemeConfig::new("empty"), ComponentType::Menu)
            .is_err());
    }
}
