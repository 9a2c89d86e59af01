//! MiniJinja environment for the QSS fragment templates.

use std::collections::BTreeMap;

use minijinja::{Environment, Error, ErrorKind, UndefinedBehavior};

use crate::color::Rgb;
use crate::error::Result;

use super::component::ComponentType;

/// Holds the compiled fragment templates.
///
/// Undefined variables are errors, so a template that names a slot the
/// table does not produce fails instead of emitting an empty color. A
/// template that does not compile is remembered and every render of it
/// returns the compile error.
#[derive(Debug, Clone)]
pub(crate) struct QssEngine {
    env: Environment<'static>,
    broken: BTreeMap<&'static str, String>,
}

impl QssEngine {
    pub fn new() -> Self {
        Self::with_sources(
            ComponentType::ALL.map(|component| (component.template_name(), component.template_source())),
        )
    }

    fn with_sources<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static str)>,
    {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        register_filters(&mut env);

        let mut broken = BTreeMap::new();
        for (name, source) in sources {
            if let Err(err) = env.add_template(name, source) {
                tracing::error!(template = name, error = %err, "stylesheet template failed to compile");
                broken.insert(name, err.to_string());
            }
        }

        Self { env, broken }
    }

    /// Renders one fragment with the given template variables.
    pub fn render(&self, component: ComponentType, vars: &BTreeMap<String, String>) -> Result<String> {
        let name = component.template_name();
        if let Some(message) = self.broken.get(name) {
            return Err(crate::Error::Template(format!("{name} failed to compile: {message}")));
        }
        let template = self.env.get_template(name)?;
        Ok(template.render(vars)?)
    }
}

impl Default for QssEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Registers the QSS helper filters.
///
/// `rgba(alpha)` turns a hex color into `rgba(r, g, b, N%)`; `alpha` is a
/// fraction in `[0, 1]`.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("rgba", |value: String, alpha: f64| -> std::result::Result<String, Error> {
        let rgb = Rgb::from_hex(&value)
            .map_err(|err| Error::new(ErrorKind::InvalidOperation, err.to_string()))?;
        let percent = (alpha.clamp(0.0, 1.0) * 100.0).round() as u8;
        Ok(format!("rgba({}, {}, {}, {}%)", rgb.0, rgb.1, rgb.2, percent))
    });
}
