//! Starter themes written by `themectl init`.

use crate::store::StoreDocument;
use crate::theme::ThemeConfig;

/// A light theme with blue accents.
pub fn light() -> ThemeConfig {
    ThemeConfig::new("light")
        .with_display_name("Light")
        .with_description("Bright background with blue accents")
        .with_colors("#fafafa", "#1a202c", "#0078d4", "#ff6b35")
        .with_slot("button", "background", "#e2e8f0")
        .with_slot("button", "text", "#1a202c")
        .with_slot("button", "hover", "#cbd5e0")
        .with_slot("panel", "header.background", "#edf2f7")
}

/// A dark theme with soft pastel accents.
pub fn dark() -> ThemeConfig {
    ThemeConfig::new("dark")
        .with_display_name("Dark")
        .with_description("Low-glare dark background with pastel accents")
        .with_colors("#1e1e2e", "#cdd6f4", "#89b4fa", "#f5c2e7")
        .with_slot("button", "background", "#313244")
        .with_slot("button", "text", "#cdd6f4")
        .with_slot("button", "hover", "#45475a")
        .with_slot("panel", "header.background", "#181825")
}

/// Every built-in theme.
pub fn themes() -> Vec<ThemeConfig> {
    vec![dark(), light()]
}

/// A store document holding the built-in themes, `light` current.
pub fn document() -> StoreDocument {
    let mut document = StoreDocument {
        current_theme: Some("light".to_string()),
        last_selected_theme: Some("light".to_string()),
        ..StoreDocument::default()
    };
    for theme in themes() {
        document.available_themes.insert(theme.name.clone(), theme);
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{contrast_ratio, AA_NORMAL};
    use crate::stylesheet::StylesheetRenderer;
    use crate::theme::BaseColor;

    #[test]
    fn test_builtins_are_valid() {
        for theme in themes() {
            assert!(theme.validate().is_valid(), "{} is invalid", theme.name);
        }
    }

    #[test]
    fn test_builtin_text_is_readable() {
        for theme in themes() {
            let ratio = contrast_ratio(
                theme.base(BaseColor::Background).unwrap(),
                theme.base(BaseColor::Text).unwrap(),
            )
            .unwrap();
            assert!(ratio >= AA_NORMAL, "{}: {ratio}", theme.name);
        }
    }

    #[test]
    fn test_builtins_render() {
        let renderer = StylesheetRenderer::new();
        for theme in themes() {
            assert!(renderer.render_full(&theme).is_ok());
        }
    }

    #[test]
    fn test_document_points_at_existing_theme() {
        let doc = document();
        let current = doc.current_theme.as_deref().unwrap();
        assert!(doc.available_themes.contains_key(current));
    }
}
