//! End-to-end: load a store from disk, switch, apply and export.

use qtheme::store::StoreOptions;
use qtheme::{ComponentType, Error, StylesheetRenderer, ThemeController, ThemeStore};
use tempfile::TempDir;

const SETTINGS: &str = r##"{
  "current_theme": "dark",
  "available_themes": {
    "dark": {
      "name": "dark",
      "display_name": "Dark",
      "backgroundColor": "#2d3748",
      "textColor": "#ffffff",
      "primaryColor": "#4a9eff",
      "accentColor": "#f6ad55"
    },
    "light": {
      "name": "light",
      "display_name": "Light",
      "backgroundColor": "#ffffff",
      "textColor": "#1a202c",
      "primaryColor": "#0078d4",
      "accentColor": "#dd6b20"
    }
  }
}"##;

fn setup() -> (TempDir, ThemeController) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("theme_settings.json");
    std::fs::write(&path, SETTINGS).unwrap();
    let controller = ThemeController::open(&path).unwrap();
    (dir, controller)
}

#[test]
fn switch_then_export_other_theme() {
    let (dir, mut controller) = setup();
    assert_eq!(controller.current_theme_name(), Some("dark"));

    let outcome = controller.switch_theme("light", true).unwrap();
    assert!(outcome.persisted());
    assert_eq!(controller.current_theme_name(), Some("light"));

    let out = dir.path().join("dark.qss");
    controller.export(&out, Some("dark")).unwrap();
    let qss = std::fs::read_to_string(&out).unwrap();
    assert!(qss.contains("#4a9eff"));
}

#[test]
fn switch_persists_to_file() {
    let (dir, mut controller) = setup();
    controller.switch_theme("light", true).unwrap();

    let reopened = ThemeController::open(dir.path().join("theme_settings.json")).unwrap();
    assert_eq!(reopened.current_theme_name(), Some("light"));
    assert_eq!(reopened.store().last_selected_name(), Some("light"));
}

#[test]
fn switch_without_persist_leaves_file() {
    let (dir, mut controller) = setup();
    controller.switch_theme("light", false).unwrap();
    assert!(controller.store().is_dirty());

    let reopened = ThemeController::open(dir.path().join("theme_settings.json")).unwrap();
    assert_eq!(reopened.current_theme_name(), Some("dark"));
}

#[test]
fn unknown_switch_is_rejected() {
    let (_dir, mut controller) = setup();
    let err = controller.switch_theme("nonexistent", true).unwrap_err();
    assert!(matches!(err, Error::UnknownTheme { .. }));
    assert_eq!(controller.current_theme_name(), Some("dark"));
}

#[test]
fn export_current_when_no_name_given() {
    let (dir, controller) = setup();
    let out = dir.path().join("exports/current.qss");
    controller.export(&out, None).unwrap();
    let qss = std::fs::read_to_string(out).unwrap();
    assert_eq!(qss, controller.current_stylesheet().unwrap());
}

#[test]
fn reload_picks_up_external_edits() {
    let (dir, mut controller) = setup();
    let path = dir.path().join("theme_settings.json");
    std::fs::write(&path, SETTINGS.replace("\"current_theme\": \"dark\"", "\"current_theme\": \"light\""))
        .unwrap();

    controller.reload().unwrap();
    assert_eq!(controller.current_theme_name(), Some("light"));
}

#[test]
fn partial_apply_renders_one_component() {
    let (_dir, controller) = setup();
    let mut applied: Vec<String> = Vec::new();
    let binding = |sink: &mut Vec<String>, qss: &str| sink.push(qss.to_string());

    controller
        .apply_component(&binding, &mut applied, ComponentType::Button)
        .unwrap();
    controller.apply(&binding, &mut applied).unwrap();

    assert_eq!(applied.len(), 2);
    assert!(applied[0].contains("QPushButton"));
    assert!(!applied[0].contains("QScrollBar"));
    assert!(applied[1].contains(&applied[0]));
}

#[test]
fn missing_settings_file_means_no_themes() {
    let dir = TempDir::new().unwrap();
    let store = ThemeStore::open(dir.path().join("absent.json"), StoreOptions::default()).unwrap();
    let controller = ThemeController::with_store(store, StylesheetRenderer::new());
    assert!(controller.available_themes().is_empty());
    assert!(matches!(
        controller.current_stylesheet(),
        Err(Error::NoCurrentTheme)
    ));
}
