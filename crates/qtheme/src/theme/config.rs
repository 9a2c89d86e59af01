//! The serialized theme model.
//!
//! A theme file entry looks like this:
//!
//! ```json
//! {
//!   "name": "dark",
//!   "display_name": "Dark",
//!   "backgroundColor": "#1e1e2e",
//!   "textColor": "#cdd6f4",
//!   "primaryColor": "#89b4fa",
//!   "accentColor": "#f5c2e7",
//!   "button": { "hover": "#b4befe" },
//!   "panel": { "header": { "background": "#181825" } }
//! }
//! ```
//!
//! Base colors are optional at the type level so that a missing one shows up
//! as a validation violation rather than a parse error. Every other mapping
//! of colors at the top level is a component group; a group maps slot names
//! to colors, with one level of nesting addressed as `header.background`.
//! Remaining keys are kept verbatim in [`ThemeConfig::extra`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validate::{validate, ValidationReport};

/// The four colors every theme must define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseColor {
    Background,
    Text,
    Primary,
    Accent,
}

impl BaseColor {
    pub const ALL: [BaseColor; 4] = [
        BaseColor::Background,
        BaseColor::Text,
        BaseColor::Primary,
        BaseColor::Accent,
    ];

    /// The key used in theme files.
    pub fn key(self) -> &'static str {
        match self {
            BaseColor::Background => "backgroundColor",
            BaseColor::Text => "textColor",
            BaseColor::Primary => "primaryColor",
            BaseColor::Accent => "accentColor",
        }
    }
}

impl fmt::Display for BaseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A slot value: a color, or one level of named sub-slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    Color(String),
    Nested(BTreeMap<String, String>),
}

/// Slot name to value, for one component.
pub type ComponentGroup = BTreeMap<String, SlotValue>;

/// Top-level keys that hold free-form data even when they are mappings.
const METADATA_KEYS: &[&str] = &["metadata"];

/// A named theme.
///
/// Top-level keys the model does not know are split on load: mappings of
/// colors become component groups, everything else (`version`, `author`,
/// extra palette entries such as `borderColor`) lands in `extra` and is
/// written back unchanged on save.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawTheme", into = "RawTheme")]
pub struct ThemeConfig {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,

    /// Explicit alternate-row color.
    pub zebra: Option<String>,

    /// Component groups keyed by component name (`button`, `panel`, ...).
    pub components: BTreeMap<String, ComponentGroup>,

    /// Everything else found at the top level of the entry.
    pub extra: BTreeMap<String, Value>,
}

/// The on-disk shape of a theme entry.
#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct RawTheme {
    name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    display_name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,

    #[serde(rename = "backgroundColor", skip_serializing_if = "Option::is_none")]
    background_color: Option<String>,

    #[serde(rename = "textColor", skip_serializing_if = "Option::is_none")]
    text_color: Option<String>,

    #[serde(rename = "primaryColor", skip_serializing_if = "Option::is_none")]
    primary_color: Option<String>,

    #[serde(rename = "accentColor", skip_serializing_if = "Option::is_none")]
    accent_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    zebra: Option<String>,

    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

impl From<RawTheme> for ThemeConfig {
    fn from(raw: RawTheme) -> Self {
        let mut components = BTreeMap::new();
        let mut extra = BTreeMap::new();
        for (key, value) in raw.rest {
            match component_group(&key, &value) {
                Some(group) => {
                    components.insert(key, group);
                }
                None => {
                    extra.insert(key, value);
                }
            }
        }

        Self {
            name: raw.name,
            display_name: raw.display_name,
            description: raw.description,
            background_color: raw.background_color,
            text_color: raw.text_color,
            primary_color: raw.primary_color,
            accent_color: raw.accent_color,
            zebra: raw.zebra,
            components,
            extra,
        }
    }
}

impl From<ThemeConfig> for RawTheme {
    fn from(theme: ThemeConfig) -> Self {
        let mut rest = theme.extra;
        for (key, group) in &theme.components {
            rest.insert(key.clone(), group_value(group));
        }

        Self {
            name: theme.name,
            display_name: theme.display_name,
            description: theme.description,
            background_color: theme.background_color,
            text_color: theme.text_color,
            primary_color: theme.primary_color,
            accent_color: theme.accent_color,
            zebra: theme.zebra,
            rest,
        }
    }
}

fn component_group(key: &str, value: &Value) -> Option<ComponentGroup> {
    if METADATA_KEYS.contains(&key) || !value.is_object() {
        return None;
    }
    ComponentGroup::deserialize(value).ok()
}

fn group_value(group: &ComponentGroup) -> Value {
    let slots = group
        .iter()
        .map(|(slot, value)| {
            let value = match value {
                SlotValue::Color(hex) => Value::String(hex.clone()),
                SlotValue::Nested(children) => Value::Object(
                    children
                        .iter()
                        .map(|(child, hex)| (child.clone(), Value::String(hex.clone())))
                        .collect(),
                ),
            };
            (slot.clone(), value)
        })
        .collect();
    Value::Object(slots)
}

impl ThemeConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_base(mut self, base: BaseColor, hex: impl Into<String>) -> Self {
        *self.base_mut(base) = Some(hex.into());
        self
    }

    /// Sets all four base colors at once.
    pub fn with_colors(
        self,
        background: impl Into<String>,
        text: impl Into<String>,
        primary: impl Into<String>,
        accent: impl Into<String>,
    ) -> Self {
        self.with_base(BaseColor::Background, background)
            .with_base(BaseColor::Text, text)
            .with_base(BaseColor::Primary, primary)
            .with_base(BaseColor::Accent, accent)
    }

    pub fn with_zebra(mut self, hex: impl Into<String>) -> Self {
        self.zebra = Some(hex.into());
        self
    }

    /// Stores a free-form top-level entry such as `version` or `author`.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// A free-form entry rendered as text. Strings come back unquoted.
    pub fn extra_text(&self, key: &str) -> Option<String> {
        match self.extra.get(key)? {
            Value::String(text) => Some(text.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Sets a component slot. A dotted slot (`header.background`) is stored
    /// nested.
    pub fn with_slot(
        mut self,
        component: impl Into<String>,
        slot: &str,
        hex: impl Into<String>,
    ) -> Self {
        self.set_slot(component, slot, hex);
        self
    }

    pub fn set_slot(&mut self, component: impl Into<String>, slot: &str, hex: impl Into<String>) {
        let group = self.components.entry(component.into()).or_default();
        match slot.split_once('.') {
            None => {
                group.insert(slot.to_string(), SlotValue::Color(hex.into()));
            }
            Some((parent, child)) => {
                let entry = group
                    .entry(parent.to_string())
                    .or_insert_with(|| SlotValue::Nested(BTreeMap::new()));
                if let SlotValue::Color(_) = entry {
                    *entry = SlotValue::Nested(BTreeMap::new());
                }
                if let SlotValue::Nested(children) = entry {
                    children.insert(child.to_string(), hex.into());
                }
            }
        }
    }

    pub fn base(&self, base: BaseColor) -> Option<&str> {
        match base {
            BaseColor::Background => self.background_color.as_deref(),
            BaseColor::Text => self.text_color.as_deref(),
            BaseColor::Primary => self.primary_color.as_deref(),
            BaseColor::Accent => self.accent_color.as_deref(),
        }
    }

    fn base_mut(&mut self, base: BaseColor) -> &mut Option<String> {
        match base {
            BaseColor::Background => &mut self.background_color,
            BaseColor::Text => &mut self.text_color,
            BaseColor::Primary => &mut self.primary_color,
            BaseColor::Accent => &mut self.accent_color,
        }
    }

    /// Looks up a slot explicitly set in the theme. `slot` may be dotted.
    pub fn slot(&self, component: &str, slot: &str) -> Option<&str> {
        let group = self.components.get(component)?;
        match slot.split_once('.') {
            None => match group.get(slot)? {
                SlotValue::Color(hex) => Some(hex),
                SlotValue::Nested(_) => None,
            },
            Some((parent, child)) => match group.get(parent)? {
                SlotValue::Nested(children) => children.get(child).map(String::as_str),
                SlotValue::Color(_) => None,
            },
        }
    }

    /// The explicit zebra color: `zebra`, then `panel.zebra.alternate`.
    pub fn zebra_override(&self) -> Option<&str> {
        self.zebra
            .as_deref()
            .or_else(|| self.slot("panel", "zebra.alternate"))
    }

    /// Every component slot as `(component.slot, value)`, sorted.
    pub fn slot_entries(&self) -> Vec<(String, &str)> {
        let mut entries = Vec::new();
        for (component, group) in &self.components {
            for (slot, value) in group {
                match value {
                    SlotValue::Color(hex) => {
                        entries.push((format!("{}.{}", component, slot), hex.as_str()));
                    }
                    SlotValue::Nested(children) => {
                        for (child, hex) in children {
                            entries.push((
                                format!("{}.{}.{}", component, slot, child),
                                hex.as_str(),
                            ));
                        }
                    }
                }
            }
        }
        entries
    }

    /// The display name, falling back to the key.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    pub fn validate(&self) -> ValidationReport {
        validate(self)
    }
}
