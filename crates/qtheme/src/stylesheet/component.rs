use std::fmt;
use std::str::FromStr;

/// The widget families a stylesheet is split into.
///
/// [`ComponentType::ALL`] is the emission order of a full stylesheet. It only
/// affects how the output reads; QSS precedence comes from selector
/// specificity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentType {
    Base,
    Button,
    Input,
    Panel,
    Menu,
    /// Progress bars and sliders.
    Progress,
    Scrollbar,
    Tab,
    Toolbar,
    Status,
    Text,
    /// Checkboxes and radio buttons.
    Checkbox,
}

impl ComponentType {
    pub const ALL: [ComponentType; 12] = [
        ComponentType::Base,
        ComponentType::Button,
        ComponentType::Input,
        ComponentType::Panel,
        ComponentType::Menu,
        ComponentType::Progress,
        ComponentType::Scrollbar,
        ComponentType::Tab,
        ComponentType::Toolbar,
        ComponentType::Status,
        ComponentType::Text,
        ComponentType::Checkbox,
    ];

    /// The group key in theme files.
    pub fn name(self) -> &'static str {
        match self {
            ComponentType::Base => "base",
            ComponentType::Button => "button",
            ComponentType::Input => "input",
            ComponentType::Panel => "panel",
            ComponentType::Menu => "menu",
            ComponentType::Progress => "progress",
            ComponentType::Scrollbar => "scrollbar",
            ComponentType::Tab => "tab",
            ComponentType::Toolbar => "toolbar",
            ComponentType::Status => "status",
            ComponentType::Text => "text",
            ComponentType::Checkbox => "checkbox",
        }
    }

    pub(crate) fn template_name(self) -> &'static str {
        match self {
            ComponentType::Base => "base.qss",
            ComponentType::Button => "button.qss",
            ComponentType::Input => "input.qss",
            ComponentType::Panel => "panel.qss",
            ComponentType::Menu => "menu.qss",
            ComponentType::Progress => "progress.qss",
            ComponentType::Scrollbar => "scrollbar.qss",
            ComponentType::Tab => "tab.qss",
            ComponentType::Toolbar => "toolbar.qss",
            ComponentType::Status => "status.qss",
            ComponentType::Text => "text.qss",
            ComponentType::Checkbox => "checkbox.qss",
        }
    }

    pub(crate) fn template_source(self) -> &'static str {
        match self {
            ComponentType::Base => include_str!("templates/base.qss"),
            ComponentType::Button => include_str!("templates/button.qss"),
            ComponentType::Input => include_str!("templates/input.qss"),
            ComponentType::Panel => include_str!("templates/panel.qss"),
            ComponentType::Menu => include_str!("templates/menu.qss"),
            ComponentType::Progress => include_str!("templates/progress.qss"),
            ComponentType::Scrollbar => include_str!("templates/scrollbar.qss"),
            ComponentType::Tab => include_str!("templates/tab.qss"),
            ComponentType::Toolbar => include_str!("templates/toolbar.qss"),
            ComponentType::Status => include_str!("templates/status.qss"),
            ComponentType::Text => include_str!("templates/text.qss"),
            ComponentType::Checkbox => include_str!("templates/checkbox.qss"),
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        match wanted.as_str() {
            "slider" => return Ok(ComponentType::Progress),
            "radio" => return Ok(ComponentType::Checkbox),
            _ => {}
        }
        ComponentType::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = ComponentType::ALL.iter().map(|c| c.name()).collect();
                format!("unknown component '{}': expected one of {}", s, names.join(", "))
            })
    }
}
