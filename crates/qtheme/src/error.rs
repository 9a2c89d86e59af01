//! Error types for color math, zebra generation, validation and the store.
//!
//! Errors are layered the same way the components are:
//!
//! - [`ColorError`] is local to the color functions. Validation turns it into
//!   a [`Violation`] so it never escapes as a bare color error.
//! - [`ZebraError`] carries the closest candidate when a target ratio is out
//!   of reach, so callers can always fall back to a usable color.
//! - [`Error`] is what the renderer, store and controller return. Data
//!   problems (`InvalidTheme`, `UnknownTheme`, `CorruptConfiguration`) are kept
//!   apart from disk problems (`Io`).

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::zebra::ZebraResult;

/// A color string that is not a 6-digit hex value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The value is not `#RRGGBB` (the `#` is optional).
    #[error("invalid color '{value}': expected a 6-digit hex value like #1a2b3c")]
    InvalidFormat { value: String },
}

/// Errors from the zebra search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZebraError {
    /// No candidate within the lightness bounds reached the target ratio
    /// within tolerance. `best` is the closest candidate found.
    #[error("{}", describe_unreachable(.target, .best))]
    UnreachableContrast { target: f64, best: ZebraResult },

    /// The base color could not be parsed.
    #[error(transparent)]
    InvalidColor(#[from] ColorError),
}

fn describe_unreachable(target: &f64, best: &ZebraResult) -> String {
    format!(
        "contrast {:.2}:1 is not reachable from {}, closest is {:.3}:1 ({})",
        target, best.base_color, best.achieved_ratio, best.zebra_color
    )
}

impl ZebraError {
    /// Returns the best-effort result for an unreachable target.
    pub fn best_effort(&self) -> Option<&ZebraResult> {
        match self {
            ZebraError::UnreachableContrast { best, .. } => Some(best),
            ZebraError::InvalidColor(_) => None,
        }
    }
}

/// A single problem found while validating a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The theme has no name.
    EmptyName,
    /// A required field is absent.
    MissingField { field: String },
    /// A color field holds something other than `#RRGGBB`.
    InvalidColor { field: String, value: String },
}

impl Violation {
    /// The field the violation refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Violation::EmptyName => Some("name"),
            Violation::MissingField { field } | Violation::InvalidColor { field, .. } => {
                Some(field)
            }
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyName => write!(f, "theme name is empty"),
            Violation::MissingField { field } => write!(f, "missing required field '{}'", field),
            Violation::InvalidColor { field, value } => {
                write!(f, "field '{}' has invalid color '{}'", field, value)
            }
        }
    }
}

/// Renders a violation list as `a; b; c` for one-line diagnostics.
fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors returned by the renderer, the store and the controller.
#[derive(Debug, Error)]
pub enum Error {
    /// A theme failed validation. Nothing was rendered or stored.
    #[error("invalid theme '{name}': {}", join_violations(.violations))]
    InvalidTheme {
        name: String,
        violations: Vec<Violation>,
    },

    /// The named theme does not exist in the store.
    #[error("unknown theme '{name}'")]
    UnknownTheme { name: String },

    /// The store holds no themes, so there is nothing current to render.
    #[error("no theme is configured")]
    NoCurrentTheme,

    /// The configuration file could not be turned into a valid store.
    #[error("corrupt theme configuration {}: {message}", .path.display())]
    CorruptConfiguration { path: PathBuf, message: String },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stylesheet template failed to render.
    #[error("template error: {0}")]
    Template(String),

    /// The operation is not allowed in the current store state.
    #[error("{0}")]
    InvalidOperation(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::CorruptConfiguration {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the violation list of an [`Error::InvalidTheme`].
    pub fn violations(&self) -> &[Violation] {
        match self {
            Error::InvalidTheme { violations, .. } => violations,
            _ => &[],
        }
    }

    /// True for failures caused by the file system rather than theme data.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Error::Template(err.to_string())
    }
}

/// Result type for store, renderer and controller operations.
pub type Result<T> = std::result::Result<T, Error>;
