//! Switching, applying and exporting themes.
//!
//! [`ThemeController`] owns one [`ThemeStore`] and one [`StylesheetRenderer`].
//! It never caches rendered text: every call renders from the store, so a
//! change to a theme shows up on the next apply.
//!
//! The toolkit itself stays outside the crate. Callers hand in a
//! [`ToolkitBinding`] that knows how to push a stylesheet into their widget or
//! application object:
//!
//! ```rust,no_run
//! use qtheme::controller::ThemeController;
//!
//! struct App { stylesheet: String }
//!
//! let controller = ThemeController::open("theme_settings.json")?;
//! let mut app = App { stylesheet: String::new() };
//! controller.apply(&|app: &mut App, qss: &str| app.stylesheet = qss.to_string(), &mut app)?;
//! # Ok::<(), qtheme::Error>(())
//! ```

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs::write_atomic;
use crate::store::{StoreOptions, ThemeStore};
use crate::stylesheet::{ComponentType, StylesheetRenderer};
use crate::theme::ThemeConfig;

/// Pushes stylesheet text into a toolkit object.
pub trait ToolkitBinding<T: ?Sized> {
    fn set_stylesheet(&self, target: &mut T, qss: &str);
}

impl<T: ?Sized, F> ToolkitBinding<T> for F
where
    F: Fn(&mut T, &str),
{
    fn set_stylesheet(&self, target: &mut T, qss: &str) {
        self(target, qss)
    }
}

/// Result of a successful [`ThemeController::switch_theme`].
#[derive(Debug)]
pub struct SwitchOutcome {
    /// The theme that is now current.
    pub theme: String,
    /// Set when the switch happened but saving it failed.
    pub persist_error: Option<Error>,
}

impl SwitchOutcome {
    pub fn persisted(&self) -> bool {
        self.persist_error.is_none()
    }
}

/// Orchestrates the store and the renderer.
#[derive(Debug, Clone)]
pub struct ThemeController {
    store: ThemeStore,
    renderer: StylesheetRenderer,
}

impl ThemeController {
    /// Opens the store at `path` with a default renderer.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = ThemeStore::open(path, StoreOptions::default())?;
        Ok(Self::with_store(store, StylesheetRenderer::default()))
    }

    pub fn with_store(store: ThemeStore, renderer: StylesheetRenderer) -> Self {
        Self { store, renderer }
    }

    pub fn store(&self) -> &ThemeStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ThemeStore {
        &mut self.store
    }

    pub fn renderer(&self) -> &StylesheetRenderer {
        &self.renderer
    }

    pub fn into_store(self) -> ThemeStore {
        self.store
    }

    pub fn current_theme_name(&self) -> Option<&str> {
        self.store.current_name()
    }

    /// Sorted theme names.
    pub fn available_themes(&self) -> Vec<&str> {
        self.store.theme_names()
    }

    /// Makes `name` current.
    ///
    /// An unknown name fails and leaves the current theme alone. With
    /// `persist`, the store is saved afterwards; a failed save is reported in
    /// [`SwitchOutcome::persist_error`] and the switch stays in effect.
    pub fn switch_theme(&mut self, name: &str, persist: bool) -> Result<SwitchOutcome> {
        let previous = self.store.current_name().map(str::to_string);
        self.store.set_current(name)?;
        tracing::info!(
            from = previous.as_deref().unwrap_or(""),
            to = %name,
            "switched theme"
        );

        let persist_error = if persist {
            match self.store.save() {
                Ok(()) => None,
                Err(err) => {
                    tracing::warn!(error = %err, "theme switch not persisted");
                    Some(err)
                }
            }
        } else {
            None
        };

        Ok(SwitchOutcome {
            theme: name.to_string(),
            persist_error,
        })
    }

    /// Renders the current theme.
    pub fn current_stylesheet(&self) -> Result<String> {
        self.renderer.render_full(self.current()?)
    }

    /// Renders the current theme and hands it to `binding`.
    pub fn apply<T, B>(&self, binding: &B, target: &mut T) -> Result<()>
    where
        T: ?Sized,
        B: ToolkitBinding<T> + ?Sized,
    {
        let qss = self.current_stylesheet()?;
        binding.set_stylesheet(target, &qss);
        tracing::debug!(bytes = qss.len(), "applied stylesheet");
        Ok(())
    }

    /// Renders one component of the current theme and hands it to `binding`.
    pub fn apply_component<T, B>(
        &self,
        binding: &B,
        target: &mut T,
        component: ComponentType,
    ) -> Result<()>
    where
        T: ?Sized,
        B: ToolkitBinding<T> + ?Sized,
    {
        let qss = self.renderer.render_component(self.current()?, component)?;
        binding.set_stylesheet(target, &qss);
        tracing::debug!(%component, bytes = qss.len(), "applied component stylesheet");
        Ok(())
    }

    /// Renders `theme_name` (or the current theme) and writes it to `path`.
    ///
    /// Parent directories are created. The write is atomic, so a failure
    /// never leaves a partial file.
    pub fn export(&self, path: impl AsRef<Path>, theme_name: Option<&str>) -> Result<()> {
        let path = path.as_ref();
        let theme = match theme_name {
            Some(name) => self.store.theme(name).ok_or_else(|| Error::UnknownTheme {
                name: name.to_string(),
            })?,
            None => self.current()?,
        };

        let qss = self.renderer.render_full(theme)?;
        write_atomic(path, qss.as_bytes())?;
        tracing::info!(theme = %theme.name, path = %path.display(), "exported stylesheet");
        Ok(())
    }

    /// Re-reads the store file.
    pub fn reload(&mut self) -> Result<()> {
        self.store.load()
    }

    fn current(&self) -> Result<&ThemeConfig> {
        self.store.current_theme().ok_or(Error::NoCurrentTheme)
    }
}
