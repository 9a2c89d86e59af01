//! Command handlers. Each writes its report to `out`; diagnostics go through
//! `tracing` and errors bubble up to `main`.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use console::style;
use qtheme::color::contrast_report;
use qtheme::store::StoreOptions;
use qtheme::{
    builtin, AccessibilityLevel, BaseColor, ComponentType, Error, ThemeConfig, ThemeController,
    ThemeStore, ZebraGenerator, ZebraMethod, ZebraResult,
};

use crate::cli::{Cli, Command};
use crate::paths::resolve_settings_path;

pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let settings = || {
        let path = resolve_settings_path(cli.config.as_deref());
        tracing::debug!(path = %path.display(), "using settings file");
        path
    };

    match &cli.command {
        Command::List => list(&open(&settings())?, out),
        Command::Current => current(&open(&settings())?, cli.verbose > 0, out),
        Command::Set { name, no_save } => set(&mut open(&settings())?, name, !no_save, out),
        Command::Export { theme, path } => export(&open(&settings())?, theme, path, out),
        Command::Show {
            theme,
            component,
            slots,
            info,
        } => {
            let view = match (*component, *info) {
                (_, true) => View::Details,
                (Some(component), false) if *slots => View::Slots(component),
                (Some(component), false) => View::Component(component),
                (None, false) => View::Stylesheet,
            };
            show(&open(&settings())?, theme.as_deref(), view, out)
        }
        Command::Init { force } => init(&settings(), *force, out),
        Command::Contrast {
            foreground,
            background,
            large,
        } => contrast(foreground, background, *large, out),
        Command::Zebra {
            base,
            level,
            ratio,
            method,
        } => zebra(base, *level, *ratio, *method, out),
    }
}

fn open(path: &Path) -> Result<ThemeController> {
    Ok(ThemeController::open(path)?)
}

fn unknown_theme(controller: &ThemeController, name: &str) -> anyhow::Error {
    let available = controller.available_themes();
    if available.is_empty() {
        anyhow::anyhow!("unknown theme '{name}' (no themes configured)")
    } else {
        anyhow::anyhow!("unknown theme '{name}' (available: {})", available.join(", "))
    }
}

fn list(controller: &ThemeController, out: &mut dyn Write) -> Result<()> {
    let store = controller.store();
    if store.is_empty() {
        writeln!(
            out,
            "no themes in {} (run `themectl init` to create the defaults)",
            store.path().display()
        )?;
        return Ok(());
    }

    let current = controller.current_theme_name();
    for (name, theme) in store.themes() {
        let marker = if Some(name.as_str()) == current {
            style("*").green().bold()
        } else {
            style(" ")
        };
        write!(out, "{marker} {name}")?;
        if theme.label() != name.as_str() {
            write!(out, "  {}", style(theme.label()).dim())?;
        }
        if !theme.description.is_empty() {
            write!(out, "  {}", style(&theme.description).dim().italic())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn current(controller: &ThemeController, verbose: bool, out: &mut dyn Write) -> Result<()> {
    let theme = controller.store().current_theme().ok_or(Error::NoCurrentTheme)?;
    writeln!(out, "{}", theme.name)?;
    if verbose {
        writeln!(out)?;
        details(theme, out)?;
    }
    Ok(())
}

/// Palette rows: base colors first, then the optional extras some theme
/// files carry.
const PALETTE: &[(&str, &str)] = &[
    ("Background", "backgroundColor"),
    ("Text", "textColor"),
    ("Primary", "primaryColor"),
    ("Secondary", "secondaryColor"),
    ("Accent", "accentColor"),
    ("Border", "borderColor"),
    ("Hover", "hoverColor"),
    ("Selection", "selectionColor"),
];

const METADATA: &[(&str, &str)] = &[
    ("Author", "author"),
    ("License", "license"),
    ("Created", "created"),
    ("Modified", "modified"),
];

fn details(theme: &ThemeConfig, out: &mut dyn Write) -> Result<()> {
    let description = if theme.description.is_empty() {
        "No description available"
    } else {
        theme.description.as_str()
    };
    let version = theme.extra_text("version").unwrap_or_else(|| "Unknown".to_string());
    writeln!(out, "{:<14}{}", "Display name:", theme.label())?;
    writeln!(out, "{:<14}{}", "Description:", description)?;
    writeln!(out, "{:<14}{}", "Version:", version)?;

    writeln!(out, "\n{}", style("Color palette").bold())?;
    for (label, key) in PALETTE {
        let value = BaseColor::ALL
            .into_iter()
            .find(|base| base.key() == *key)
            .and_then(|base| theme.base(base).map(str::to_string))
            .or_else(|| theme.extra_text(key));
        match value {
            Some(value) => writeln!(out, "  {label:<12}{value}")?,
            None => writeln!(out, "  {label:<12}{}", style("N/A").dim())?,
        }
    }

    let metadata: Vec<(&str, String)> = METADATA
        .iter()
        .filter_map(|(label, key)| theme.extra_text(key).map(|value| (*label, value)))
        .collect();
    if !metadata.is_empty() {
        writeln!(out, "\n{}", style("Metadata").bold())?;
        for (label, value) in metadata {
            writeln!(out, "  {label:<12}{value}")?;
        }
    }
    Ok(())
}

fn set(controller: &mut ThemeController, name: &str, persist: bool, out: &mut dyn Write) -> Result<()> {
    let outcome = match controller.switch_theme(name, persist) {
        Ok(outcome) => outcome,
        Err(Error::UnknownTheme { .. }) => return Err(unknown_theme(controller, name)),
        Err(err) => return Err(err.into()),
    };

    if let Some(err) = outcome.persist_error {
        return Err(anyhow::Error::new(err).context(format!("switched to '{name}' but could not save")));
    }
    writeln!(out, "current theme: {}", outcome.theme)?;
    Ok(())
}

fn export(controller: &ThemeController, theme: &str, target: &Path, out: &mut dyn Write) -> Result<()> {
    if controller.store().theme(theme).is_none() {
        return Err(unknown_theme(controller, theme));
    }
    controller
        .export(target, Some(theme))
        .with_context(|| format!("failed to export '{theme}'"))?;
    writeln!(out, "wrote {}", target.display())?;
    Ok(())
}

/// What `show` prints.
enum View {
    Stylesheet,
    Component(ComponentType),
    Slots(ComponentType),
    Details,
}

fn show(controller: &ThemeController, theme: Option<&str>, view: View, out: &mut dyn Write) -> Result<()> {
    let config = match theme {
        Some(name) => controller
            .store()
            .theme(name)
            .ok_or_else(|| unknown_theme(controller, name))?,
        None => controller.store().current_theme().ok_or(Error::NoCurrentTheme)?,
    };
    let renderer = controller.renderer();

    match view {
        View::Slots(component) => {
            for (slot, color) in renderer.resolve_slots(config, component)? {
                writeln!(out, "{slot:<24} {color}")?;
            }
        }
        View::Component(component) => write!(out, "{}", renderer.render_component(config, component)?)?,
        View::Stylesheet => write!(out, "{}", renderer.render_full(config)?)?,
        View::Details => {
            writeln!(out, "{}", config.name)?;
            details(config, out)?;
        }
    }
    Ok(())
}

fn init(path: &Path, force: bool, out: &mut dyn Write) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let mut store = ThemeStore::from_document(path, builtin::document(), StoreOptions::default())?;
    store.save()?;
    writeln!(out, "wrote {} themes to {}", store.len(), path.display())?;
    Ok(())
}

fn contrast(foreground: &str, background: &str, large: bool, out: &mut dyn Write) -> Result<()> {
    let report = contrast_report(foreground, background, large)?;
    let level = if report.level.passes() {
        style(report.level.as_str()).green().bold()
    } else {
        style(report.level.as_str()).red().bold()
    };
    let size = if large { "large text" } else { "normal text" };
    writeln!(out, "{:.2}:1  {level}  ({size})", report.ratio)?;
    Ok(())
}

fn zebra(
    base: &str,
    level: Option<AccessibilityLevel>,
    ratio: Option<f64>,
    method: Option<ZebraMethod>,
    out: &mut dyn Write,
) -> Result<()> {
    let generator = ZebraGenerator::new();
    let result = match (ratio, method) {
        (Some(ratio), method) => {
            if ratio < 1.0 {
                bail!("target ratio must be at least 1.0, got {ratio}");
            }
            generator.generate_best_effort(base, ratio, method.unwrap_or_default())?
        }
        (None, Some(method)) => {
            let target = level.unwrap_or_default().target();
            generator.generate_best_effort(base, target, method)?
        }
        (None, None) => generator.generate_for_accessibility_level(base, level.unwrap_or_default())?,
    };
    write_zebra(&result, out)
}

fn write_zebra(result: &ZebraResult, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "{}  {:.3}:1 against {} (target {:.2}, {})",
        result.zebra_color, result.achieved_ratio, result.base_color, result.target_ratio, result.method
    )?;
    if result.degraded {
        tracing::warn!(
            wanted = result.target_ratio,
            achieved = result.achieved_ratio,
            "target contrast not reachable; using the closest color"
        );
        writeln!(out, "{}", style("closest reachable color, target not met").yellow())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("themectl").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(&cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn initialized() -> (TempDir, String) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme_settings.json");
        let path = path.to_string_lossy().into_owned();
        run_args(&["-c", &path, "init"]).unwrap();
        (dir, path)
    }

    #[test]
    fn test_init_then_list() {
        let (_dir, path) = initialized();
        let listing = run_args(&["-c", &path, "list"]).unwrap();
        assert!(listing.contains("dark"));
        assert!(listing.contains("light"));
        assert_eq!(run_args(&["-c", &path, "current"]).unwrap().trim(), "light");
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let (_dir, path) = initialized();
        let err = run_args(&["-c", &path, "init"]).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        run_args(&["-c", &path, "init", "--force"]).unwrap();
    }

    #[test]
    fn test_set_persists() {
        let (_dir, path) = initialized();
        run_args(&["-c", &path, "set", "dark"]).unwrap();
        assert_eq!(run_args(&["-c", &path, "current"]).unwrap().trim(), "dark");
    }

    #[test]
    fn test_set_no_save_leaves_file() {
        let (_dir, path) = initialized();
        let out = run_args(&["-c", &path, "set", "dark", "--no-save"]).unwrap();
        assert!(out.contains("dark"));
        assert_eq!(run_args(&["-c", &path, "current"]).unwrap().trim(), "light");
    }

    #[test]
    fn test_set_unknown_lists_available() {
        let (_dir, path) = initialized();
        let err = run_args(&["-c", &path, "set", "nonexistent"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknown theme 'nonexistent'"));
        assert!(message.contains("dark, light"));
    }

    #[test]
    fn test_export_writes_qss() {
        let (dir, path) = initialized();
        let target = dir.path().join("out/dark.qss");
        run_args(&["-c", &path, "export", "dark", &target.to_string_lossy()]).unwrap();
        let qss = std::fs::read_to_string(target).unwrap();
        assert!(qss.contains("QPushButton"));
    }

    #[test]
    fn test_show_slots() {
        let (_dir, path) = initialized();
        let out = run_args(&["-c", &path, "show", "dark", "--component", "panel", "--slots"]).unwrap();
        assert!(out.contains("alternate"));
        assert!(out.contains('#'));
    }

    #[test]
    fn test_current_verbose_prints_details() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme_settings.json");
        std::fs::write(
            &path,
            r##"{
  "current_theme": "light",
  "available_themes": {
    "light": {
      "display_name": "Light Theme",
      "description": "Light",
      "version": "1.0.0",
      "author": "A",
      "backgroundColor": "#ffffff",
      "textColor": "#000000",
      "primaryColor": "#111111",
      "accentColor": "#333333",
      "borderColor": "#444444",
      "selectionColor": "#666666"
    }
  }
}"##,
        )
        .unwrap();
        let path = path.to_string_lossy();

        assert_eq!(run_args(&["-c", &path, "current"]).unwrap().trim(), "light");

        let out = run_args(&["-c", &path, "current", "-v"]).unwrap();
        assert!(out.starts_with("light\n"));
        assert!(out.contains("Light Theme"));
        assert!(out.contains("Version:      1.0.0"));
        assert!(out.contains("#ffffff"));
        assert!(out.contains("#444444"));
        assert!(out.contains("#666666"));
        assert!(out.contains("N/A"));
        assert!(out.contains("Metadata"));
        assert!(out.contains("Author      A"));
    }

    #[test]
    fn test_show_info_for_builtin() {
        let (_dir, path) = initialized();
        let out = run_args(&["-c", &path, "show", "dark", "--info"]).unwrap();
        assert!(out.starts_with("dark\n"));
        assert!(out.contains("Low-glare"));
        assert!(out.contains("#1e1e2e"));
        assert!(!out.contains("QPushButton"));
        assert!(!out.contains("Metadata"));
    }

    #[test]
    fn test_show_radio_component() {
        let (_dir, path) = initialized();
        let out = run_args(&["-c", &path, "show", "--component", "radio"]).unwrap();
        assert!(out.contains("QRadioButton::indicator"));
        assert!(out.contains("QCheckBox"));
    }

    #[test]
    fn test_list_on_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yaml");
        let out = run_args(&["-c", &path.to_string_lossy(), "list"]).unwrap();
        assert!(out.contains("no themes"));
        assert!(run_args(&["-c", &path.to_string_lossy(), "current"]).is_err());
    }

    #[test]
    fn test_contrast_report() {
        let out = run_args(&["contrast", "#000000", "#ffffff"]).unwrap();
        assert!(out.starts_with("21.00:1"));
        assert!(out.contains("AAA"));
    }

    #[test]
    fn test_contrast_rejects_bad_hex() {
        assert!(run_args(&["contrast", "black", "#ffffff"]).is_err());
    }

    #[test]
    fn test_zebra_default_level() {
        let out = run_args(&["zebra", "#ffffff"]).unwrap();
        assert!(out.starts_with('#'));
        assert!(out.contains("target 1.15"));
    }

    #[test]
    fn test_zebra_rejects_ratio_below_one() {
        assert!(run_args(&["zebra", "#ffffff", "--ratio", "0.5"]).is_err());
    }
}
