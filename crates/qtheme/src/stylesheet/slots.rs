//! Per-component slot defaults.
//!
//! Each component has an ordered list of [`SlotRule`]s. When a theme does not
//! set a slot explicitly, its rule derives the value from a base color or
//! from a slot listed earlier in the same table. Rules never look forward, so
//! one pass in table order resolves everything.

use std::collections::BTreeMap;

use crate::color::{adjust_brightness, adjust_saturation, optimal_text_color, shade, Rgb};
use crate::error::{ColorError, Error, Result, Violation};
use crate::theme::{BaseColor, ThemeConfig};

use super::component::ComponentType;

/// Where a derivation reads its input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source {
    Base(BaseColor),
    /// An earlier slot of the same component.
    Slot(&'static str),
}

/// How a missing slot is computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Derivation {
    /// The source unchanged.
    Inherit(Source),
    /// HSV value shifted by the given delta.
    Brightness(Source, f64),
    /// HSV saturation shifted by the given delta.
    Saturation(Source, f64),
    /// HSL lightness moved toward the middle by the given amount.
    Shade(Source, f64),
    /// Black or white, whichever reads better on the source.
    TextOn(Source),
    Literal(&'static str),
    /// The theme's alternate-row color.
    Zebra,
}

/// A slot and its default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotRule {
    pub slot: &'static str,
    pub derivation: Derivation,
}

const fn rule(slot: &'static str, derivation: Derivation) -> SlotRule {
    SlotRule { slot, derivation }
}

const BG: Source = Source::Base(BaseColor::Background);
const TEXT: Source = Source::Base(BaseColor::Text);
const PRIMARY: Source = Source::Base(BaseColor::Primary);
const ACCENT: Source = Source::Base(BaseColor::Accent);

const fn slot(name: &'static str) -> Source {
    Source::Slot(name)
}

use Derivation::{Brightness, Inherit, Literal, Saturation, Shade, TextOn, Zebra};

const BASE_RULES: &[SlotRule] = &[
    rule("background", Inherit(BG)),
    rule("text", Inherit(TEXT)),
    rule("selection", Inherit(PRIMARY)),
    rule("selection_text", TextOn(slot("selection"))),
];

const BUTTON_RULES: &[SlotRule] = &[
    rule("background", Inherit(PRIMARY)),
    rule("text", TextOn(slot("background"))),
    rule("hover", Brightness(slot("background"), 0.1)),
    rule("pressed", Brightness(slot("background"), -0.2)),
    rule("border", Brightness(slot("background"), -0.1)),
    rule("disabled", Saturation(slot("background"), -0.6)),
    rule("disabled_text", TextOn(slot("disabled"))),
];

const INPUT_RULES: &[SlotRule] = &[
    rule("background", Inherit(BG)),
    rule("text", Inherit(TEXT)),
    rule("border", Shade(slot("background"), 0.2)),
    rule("placeholder", Shade(slot("text"), 0.35)),
    rule("focus", Inherit(ACCENT)),
    rule("selection", Inherit(PRIMARY)),
];

const PANEL_RULES: &[SlotRule] = &[
    rule("background", Inherit(BG)),
    rule("text", Inherit(TEXT)),
    rule("border", Shade(slot("background"), 0.15)),
    rule("header.background", Shade(slot("background"), 0.08)),
    rule("header.text", Inherit(slot("text"))),
    rule("header.border", Shade(slot("header.background"), 0.1)),
    rule("alternate", Zebra),
    rule("selection", Inherit(PRIMARY)),
    rule("selection_text", TextOn(slot("selection"))),
];

const MENU_RULES: &[SlotRule] = &[
    rule("background", Inherit(BG)),
    rule("text", Inherit(TEXT)),
    rule("border", Shade(slot("background"), 0.2)),
    rule("hover", Shade(slot("background"), 0.1)),
    rule("hover_text", Inherit(slot("text"))),
    rule("separator", Shade(slot("background"), 0.15)),
];

const PROGRESS_RULES: &[SlotRule] = &[
    rule("background", Shade(BG, 0.1)),
    rule("bar", Inherit(PRIMARY)),
    rule("text", Inherit(TEXT)),
    rule("border", Shade(slot("background"), 0.15)),
    rule("groove", Inherit(slot("background"))),
    rule("handle", Inherit(ACCENT)),
    rule("handle_hover", Brightness(slot("handle"), 0.1)),
];

const SCROLLBAR_RULES: &[SlotRule] = &[
    rule("background", Shade(BG, 0.04)),
    rule("handle", Shade(BG, 0.25)),
    rule("handle_hover", Shade(slot("handle"), 0.1)),
];

const TAB_RULES: &[SlotRule] = &[
    rule("background", Inherit(BG)),
    rule("text", Inherit(TEXT)),
    rule("inactive", Shade(slot("background"), 0.08)),
    rule("selected", Inherit(PRIMARY)),
    rule("selected_text", TextOn(slot("selected"))),
    rule("border", Shade(slot("background"), 0.2)),
    rule("hover", Shade(slot("inactive"), 0.06)),
];

const TOOLBAR_RULES: &[SlotRule] = &[
    rule("background", Shade(BG, 0.03)),
    rule("text", Inherit(TEXT)),
    rule("border", Shade(slot("background"), 0.12)),
    rule("button.background", Inherit(slot("background"))),
    rule("button.text", Inherit(slot("text"))),
    rule("button.hover", Inherit(ACCENT)),
    rule("button.hover_text", TextOn(slot("button.hover"))),
    rule("button.pressed", Shade(slot("button.hover"), 0.12)),
];

const STATUS_RULES: &[SlotRule] = &[
    rule("background", Shade(BG, 0.03)),
    rule("text", Shade(TEXT, 0.15)),
    rule("border", Shade(slot("background"), 0.12)),
];

const TEXT_RULES: &[SlotRule] = &[
    rule("primary", Inherit(TEXT)),
    rule("secondary", Shade(slot("primary"), 0.15)),
    rule("muted", Shade(slot("primary"), 0.35)),
    rule("heading", Inherit(slot("primary"))),
    rule("link", Inherit(ACCENT)),
    rule("success", Literal("#38a169")),
    rule("warning", Literal("#d69e2e")),
    rule("error", Literal("#e53e3e")),
];

const CHECKBOX_RULES: &[SlotRule] = &[
    rule("text", Inherit(TEXT)),
    rule("indicator", Inherit(BG)),
    rule("border", Shade(slot("indicator"), 0.25)),
    rule("hover", Inherit(PRIMARY)),
    rule("checked", Inherit(PRIMARY)),
    rule("checked_hover", Brightness(slot("checked"), 0.1)),
    rule("disabled", Shade(slot("indicator"), 0.06)),
    rule("disabled_text", Shade(slot("text"), 0.4)),
];

/// The default table for `component`, in resolution order.
pub fn slot_rules(component: ComponentType) -> &'static [SlotRule] {
    match component {
        ComponentType::Base => BASE_RULES,
        ComponentType::Button => BUTTON_RULES,
        ComponentType::Input => INPUT_RULES,
        ComponentType::Panel => PANEL_RULES,
        ComponentType::Menu => MENU_RULES,
        ComponentType::Progress => PROGRESS_RULES,
        ComponentType::Scrollbar => SCROLLBAR_RULES,
        ComponentType::Tab => TAB_RULES,
        ComponentType::Toolbar => TOOLBAR_RULES,
        ComponentType::Status => STATUS_RULES,
        ComponentType::Text => TEXT_RULES,
        ComponentType::Checkbox => CHECKBOX_RULES,
    }
}

/// Resolves every slot of `component`: explicit theme value first, rule
/// otherwise. `zebra` is called at most once, only when a zebra slot is
/// not set by the theme.
pub(crate) fn resolve<F>(
    theme: &ThemeConfig,
    component: ComponentType,
    zebra: F,
) -> Result<BTreeMap<String, String>>
where
    F: FnOnce() -> Result<String>,
{
    let mut zebra = Some(zebra);
    let mut resolved: BTreeMap<String, String> = BTreeMap::new();

    for rule in slot_rules(component) {
        let value = match theme.slot(component.name(), rule.slot) {
            Some(explicit) => {
                normalized(theme, format!("{}.{}", component, rule.slot), explicit)?
            }
            None => match rule.derivation {
                Zebra => match zebra.take() {
                    Some(generate) => generate()?,
                    None => {
                        return Err(Error::Template(format!(
                            "{}.{} needs a second zebra color",
                            component, rule.slot
                        )))
                    }
                },
                derivation => derive(theme, component, &resolved, rule.slot, derivation)?,
            },
        };
        resolved.insert(rule.slot.to_string(), value);
    }

    Ok(resolved)
}

fn derive(
    theme: &ThemeConfig,
    component: ComponentType,
    resolved: &BTreeMap<String, String>,
    slot: &str,
    derivation: Derivation,
) -> Result<String> {
    let read = |source| lookup(theme, component, resolved, slot, source);

    let (field, computed) = match derivation {
        Inherit(source) => {
            let (field, value) = read(source)?;
            (field, Rgb::from_hex(value).map(Rgb::to_hex))
        }
        Brightness(source, delta) => {
            let (field, value) = read(source)?;
            (field, adjust_brightness(value, delta))
        }
        Saturation(source, delta) => {
            let (field, value) = read(source)?;
            (field, adjust_saturation(value, delta))
        }
        Shade(source, amount) => {
            let (field, value) = read(source)?;
            (field, shade(value, amount))
        }
        TextOn(source) => {
            let (field, value) = read(source)?;
            (field, optimal_text_color(value))
        }
        Literal(hex) => return Ok(hex.to_string()),
        Zebra => {
            return Err(Error::Template(format!(
                "{}.{} has no zebra source",
                component, slot
            )))
        }
    };

    computed.map_err(|err| invalid_color(theme, field, err))
}

fn lookup<'a>(
    theme: &'a ThemeConfig,
    component: ComponentType,
    resolved: &'a BTreeMap<String, String>,
    slot: &str,
    source: Source,
) -> Result<(String, &'a str)> {
    match source {
        Source::Base(base) => theme
            .base(base)
            .map(|value| (base.key().to_string(), value))
            .ok_or_else(|| Error::InvalidTheme {
                name: theme.name.clone(),
                violations: vec![Violation::MissingField {
                    field: base.key().to_string(),
                }],
            }),
        Source::Slot(name) => resolved
            .get(name)
            .map(|value| (format!("{}.{}", component, name), value.as_str()))
            .ok_or_else(|| {
                Error::Template(format!(
                    "{}.{} derives from {}, which is not resolved yet",
                    component, slot, name
                ))
            }),
    }
}

/// Canonical `#rrggbb` spelling of a theme-supplied color, so QSS never
/// sees a bare `ffffff`.
pub(crate) fn normalized(theme: &ThemeConfig, field: String, value: &str) -> Result<String> {
    Rgb::from_hex(value)
        .map(Rgb::to_hex)
        .map_err(|err| invalid_color(theme, field, err))
}

pub(crate) fn invalid_color(theme: &ThemeConfig, field: String, err: ColorError) -> Error {
    let ColorError::InvalidFormat { value } = err;
    Error::InvalidTheme {
        name: theme.name.clone(),
        violations: vec![Violation::InvalidColor { field, value }],
    }
}

/// Slot names as template variables: `header.background` becomes
/// `header_background`.
pub(crate) fn template_context(slots: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    slots
        .iter()
        .map(|(slot, value)| (slot.replace('.', "_"), value.clone()))
        .collect()
}
