//! Theme to QSS rendering.
//!
//! A stylesheet is built from one fragment per [`ComponentType`]. For each
//! fragment the renderer:
//!
//! 1. resolves the component's slots, taking explicit theme values first and
//!    falling back to the rules in [`slot_rules`];
//! 2. renders the component's MiniJinja template (`templates/*.qss`) with the
//!    resolved colors.
//!
//! Themes are validated before anything is rendered, so an invalid theme
//! never produces partial output.
//!
//! # Template variables
//!
//! Each slot is exposed under its name with dots replaced by underscores:
//! `header.background` is `{{ header_background }}`. Templates also have an
//! `rgba(alpha)` filter:
//!
//! ```text
//! border: 2px solid {{ hover | rgba(0.6) }};
//! ```

mod component;
mod engine;
mod renderer;
mod slots;

pub use component::ComponentType;
pub use engine::register_filters;
pub use renderer::StylesheetRenderer;
pub use slots::{slot_rules, Derivation, SlotRule, Source};
