use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use qtheme::{AccessibilityLevel, ComponentType, ZebraMethod};

/// Manage qtheme themes and Qt stylesheets.
#[derive(Debug, Parser)]
#[command(name = "themectl", version, about)]
pub struct Cli {
    /// Theme settings file (.json, .yaml or .yml)
    #[arg(short, long, global = true, env = "QTHEME_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available themes, marking the current one
    List,

    /// Print the current theme name (with -v, its details and palette)
    Current,

    /// Switch the current theme
    Set {
        name: String,

        /// Switch for this invocation only, without saving
        #[arg(long)]
        no_save: bool,
    },

    /// Render a theme to a QSS file
    Export { theme: String, path: PathBuf },

    /// Print a theme's stylesheet, its details, or the resolved colors of one
    /// component
    Show {
        /// Theme to show (defaults to the current theme)
        theme: Option<String>,

        /// Only this component (base, button, input, panel, ...)
        #[arg(long)]
        component: Option<ComponentType>,

        /// Print resolved slot colors instead of QSS
        #[arg(long, requires = "component")]
        slots: bool,

        /// Print name, description, version, palette and metadata instead of QSS
        #[arg(long, conflicts_with_all = ["component", "slots"])]
        info: bool,
    },

    /// Write the built-in light and dark themes to the settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Contrast ratio and WCAG level of a foreground/background pair
    Contrast {
        foreground: String,
        background: String,

        /// Grade as large text (18pt, or 14pt bold)
        #[arg(long)]
        large: bool,
    },

    /// Generate an alternate-row color for a background
    Zebra {
        base: String,

        /// subtle, moderate or high [default: subtle]
        #[arg(long, conflicts_with = "ratio")]
        level: Option<AccessibilityLevel>,

        /// Explicit target contrast ratio
        #[arg(long)]
        ratio: Option<f64>,

        /// hsl or hsv (both are tried when omitted)
        #[arg(long)]
        method: Option<ZebraMethod>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_set_with_global_flags() {
        let cli = Cli::try_parse_from(["themectl", "-vv", "set", "dark", "--no-save", "-c", "t.yaml"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("t.yaml")));
        match cli.command {
            Command::Set { name, no_save } => {
                assert_eq!(name, "dark");
                assert!(no_save);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_zebra_options() {
        let cli = Cli::try_parse_from(["themectl", "zebra", "#ffffff", "--level", "high", "--method", "hsv"])
            .unwrap();
        match cli.command {
            Command::Zebra { level, method, ratio, .. } => {
                assert_eq!(level, Some(AccessibilityLevel::High));
                assert_eq!(method, Some(ZebraMethod::Hsv));
                assert_eq!(ratio, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_level_and_ratio_conflict() {
        assert!(Cli::try_parse_from(["themectl", "zebra", "#fff000", "--level", "high", "--ratio", "1.5"]).is_err());
    }

    #[test]
    fn test_slots_requires_component() {
        assert!(Cli::try_parse_from(["themectl", "show", "--slots"]).is_err());
        assert!(Cli::try_parse_from(["themectl", "show", "dark", "--component", "panel", "--slots"]).is_ok());
    }

    #[test]
    fn test_info_excludes_component() {
        assert!(Cli::try_parse_from(["themectl", "show", "--info"]).is_ok());
        assert!(Cli::try_parse_from(["themectl", "show", "--info", "--component", "radio"]).is_err());
    }
}
