//! Theme data model and validation.
//!
//! [`ThemeConfig`] is what lives in the store file under `available_themes`.
//! [`validate`] checks it before it is stored or rendered.

mod config;
mod validate;

pub use config::{BaseColor, ComponentGroup, SlotValue, ThemeConfig};
pub use validate::{validate, ValidationReport};
