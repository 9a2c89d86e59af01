//! Theme validation.

use crate::color::is_valid_hex;
use crate::error::{Error, Result, Violation};

use super::config::{BaseColor, ThemeConfig};

/// Everything wrong with a theme. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// `Ok(())` when valid, otherwise [`Error::InvalidTheme`] for `name`.
    pub fn into_result(self, name: &str) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidTheme {
                name: name.to_string(),
                violations: self.violations,
            })
        }
    }

    fn check_color(&mut self, field: &str, value: &str) {
        if !is_valid_hex(value) {
            self.violations.push(Violation::InvalidColor {
                field: field.to_string(),
                value: value.to_string(),
            });
        }
    }
}

/// Checks name, base colors, the zebra override and every component slot.
///
/// Violations are listed in that order; slots are sorted by field name.
pub fn validate(theme: &ThemeConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if theme.name.trim().is_empty() {
        report.violations.push(Violation::EmptyName);
    }

    for base in BaseColor::ALL {
        match theme.base(base) {
            Some(value) => report.check_color(base.key(), value),
            None => report.violations.push(Violation::MissingField {
                field: base.key().to_string(),
            }),
        }
    }

    if let Some(zebra) = &theme.zebra {
        report.check_color("zebra", zebra);
    }

    for (field, value) in theme.slot_entries() {
        report.check_color(&field, value);
    }

    report
}
