//! On-disk layout of the theme store.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::theme::ThemeConfig;

/// The whole configuration file.
///
/// ```json
/// {
///   "current_theme": "dark",
///   "last_selected_theme": "dark",
///   "available_themes": { "dark": { ... }, "light": { ... } }
/// }
/// ```
///
/// Keys this crate does not know about are kept in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_selected_theme: Option<String>,

    #[serde(default)]
    pub available_themes: BTreeMap<String, ThemeConfig>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Serialization format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    #[default]
    Json,
    Yaml,
}

impl FileFormat {
    /// `.yaml` and `.yml` are YAML; anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            _ => FileFormat::Json,
        }
    }

    pub fn parse(self, text: &str) -> Result<StoreDocument, String> {
        match self {
            FileFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            FileFormat::Yaml => {
                // An empty YAML file is an empty store.
                if text.trim().is_empty() {
                    return Ok(StoreDocument::default());
                }
                serde_yaml::from_str(text).map_err(|e| e.to_string())
            }
        }
    }

    pub fn render(self, document: &StoreDocument) -> Result<String, String> {
        match self {
            FileFormat::Json => serde_json::to_string_pretty(document)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| e.to_string()),
            FileFormat::Yaml => serde_yaml::to_string(document).map_err(|e| e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path(&PathBuf::from("a.json")), FileFormat::Json);
        assert_eq!(FileFormat::from_path(&PathBuf::from("a.YAML")), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(&PathBuf::from("a.yml")), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(&PathBuf::from("settings")), FileFormat::Json);
    }

    #[test]
    fn test_unknown_keys_survive() {
        let text = r##"{
            "current_theme": "light",
            "available_themes": {},
            "version": 3,
            "editor": { "font": "mono" }
        }"##;
        let doc = FileFormat::Json.parse(text).unwrap();
        assert_eq!(doc.extra["version"], serde_json::json!(3));

        let out = FileFormat::Json.render(&doc).unwrap();
        let again = FileFormat::Json.parse(&out).unwrap();
        assert_eq!(again, doc);
    }

    #[test]
    fn test_yaml_parses_same_shape() {
        let text = "current_theme: dark\navailable_themes:\n  dark:\n    backgroundColor: '#000000'\n";
        let doc = FileFormat::Yaml.parse(text).unwrap();
        assert_eq!(doc.current_theme.as_deref(), Some("dark"));
        assert_eq!(
            doc.available_themes["dark"].background_color.as_deref(),
            Some("#000000")
        );
    }

    #[test]
    fn test_empty_yaml_is_empty_document() {
        assert_eq!(FileFormat::Yaml.parse("  \n").unwrap(), StoreDocument::default());
    }

    #[test]
    fn test_malformed_json_reports_message() {
        let err = FileFormat::Json.parse("{ not json").unwrap_err();
        assert!(!err.is_empty());
    }
}
