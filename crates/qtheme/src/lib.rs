//! # qtheme
//!
//! Theme management for Qt applications: store named color themes in a JSON
//! or YAML file, render them into Qt Style Sheets (QSS), switch the active
//! theme, and derive accessible color variants.
//!
//! ## Layers
//!
//! - [`color`]: hex/RGB/HSL/HSV conversion, WCAG luminance, contrast and
//!   levels
//! - [`zebra`]: alternate-row colors at a target contrast ratio
//! - [`theme`]: the [`ThemeConfig`] model and its validation
//! - [`stylesheet`]: [`StylesheetRenderer`], theme to QSS with per-slot
//!   fallbacks
//! - [`store`]: [`ThemeStore`], themes plus the current pointer, persisted
//! - [`controller`]: [`ThemeController`], switch / apply / export
//!
//! Nothing here depends on a Qt binding. The controller hands rendered text
//! to a [`ToolkitBinding`] supplied by the caller.
//!
//! ## Quick start
//!
//! ```rust
//! use qtheme::{StylesheetRenderer, ThemeConfig};
//!
//! let theme = ThemeConfig::new("ocean")
//!     .with_colors("#0b1d2a", "#e0f2fe", "#38bdf8", "#f97316")
//!     .with_slot("button", "hover", "#7dd3fc");
//!
//! let qss = StylesheetRenderer::new().render_full(&theme).unwrap();
//! assert!(qss.contains("background-color: #7dd3fc;"));
//! ```

pub mod builtin;
pub mod color;
pub mod controller;
pub mod error;
mod fs;
pub mod store;
pub mod stylesheet;
pub mod theme;
pub mod zebra;

pub use controller::{SwitchOutcome, ThemeController, ToolkitBinding};
pub use error::{ColorError, Error, Result, Violation, ZebraError};
pub use store::{StoreOptions, StoreState, ThemeStore};
pub use stylesheet::{ComponentType, StylesheetRenderer};
pub use theme::{BaseColor, ThemeConfig, ValidationReport};
pub use zebra::{AccessibilityLevel, ZebraGenerator, ZebraMethod, ZebraResult};
