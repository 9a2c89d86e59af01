//! The theme store: a set of themes plus the current-theme pointer, backed
//! by a JSON or YAML file.
//!
//! # Lifecycle
//!
//! ```text
//!           load (file present)           upsert / set_current / remove
//!  Empty ───────────────────────▶ Loaded ──────────────────────────────▶ Dirty
//!    │                               ▲                                     │
//!    └── load (file missing) ──┐     └──────────────── save ───────────────┘
//!                              ▼
//!                            Empty
//! ```
//!
//! With [`StoreOptions::auto_save`] every mutation saves immediately, so the
//! store only stays `Dirty` when that save fails.
//!
//! Every failed operation leaves the store as it was: a load that hits a
//! malformed file keeps the previous contents, an invalid upsert or an
//! unknown name changes nothing.

mod document;

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub use document::{FileFormat, StoreDocument};

use crate::error::{Error, Result};
use crate::fs::write_atomic;
use crate::theme::{validate, ThemeConfig};

/// Where the store is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Nothing loaded, or the backing file does not exist yet.
    Empty,
    /// In memory matches the file.
    Loaded,
    /// In memory has changes the file does not.
    Dirty,
}

/// Store behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Save after every successful mutation.
    pub auto_save: bool,
}

impl StoreOptions {
    pub fn auto_save() -> Self {
        Self { auto_save: true }
    }
}

/// Validated contents of a store document.
struct Contents {
    themes: BTreeMap<String, ThemeConfig>,
    current: Option<String>,
    last_selected: Option<String>,
    extra: BTreeMap<String, serde_json::Value>,
}

impl Contents {
    /// Checks every theme and the pointer. The map key becomes each theme's
    /// name. A missing pointer is repaired from `last_selected_theme` or the
    /// first theme; a pointer to a missing theme is an error.
    fn from_document(document: StoreDocument) -> std::result::Result<Self, String> {
        let mut themes = BTreeMap::new();
        for (key, mut theme) in document.available_themes {
            theme.name = key.clone();
            let report = validate(&theme);
            if !report.is_valid() {
                let details: Vec<String> =
                    report.violations().iter().map(ToString::to_string).collect();
                return Err(format!("theme '{}' is invalid: {}", key, details.join("; ")));
            }
            themes.insert(key, theme);
        }

        let current = match document.current_theme.filter(|name| !name.is_empty()) {
            Some(name) if themes.contains_key(&name) => Some(name),
            Some(name) => return Err(format!("current theme '{}' does not exist", name)),
            None => document
                .last_selected_theme
                .as_ref()
                .filter(|name| themes.contains_key(name.as_str()))
                .cloned()
                .or_else(|| themes.keys().next().cloned()),
        };

        let last_selected = document
            .last_selected_theme
            .filter(|name| themes.contains_key(name))
            .or_else(|| current.clone());

        Ok(Self {
            themes,
            current,
            last_selected,
            extra: document.extra,
        })
    }
}

/// A collection of themes with one of them current.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
    options: StoreOptions,
    state: StoreState,
    themes: BTreeMap<String, ThemeConfig>,
    current: Option<String>,
    last_selected: Option<String>,
    extra: BTreeMap<String, serde_json::Value>,
}

impl ThemeStore {
    /// An empty store backed by `path`. Does no I/O.
    pub fn new(path: impl Into<PathBuf>, options: StoreOptions) -> Self {
        Self {
            path: path.into(),
            options,
            state: StoreState::Empty,
            themes: BTreeMap::new(),
            current: None,
            last_selected: None,
            extra: BTreeMap::new(),
        }
    }

    /// Creates the store and loads `path`.
    pub fn open(path: impl Into<PathBuf>, options: StoreOptions) -> Result<Self> {
        let mut store = Self::new(path, options);
        store.load()?;
        Ok(store)
    }

    /// Builds a store from an in-memory document, as if it had been loaded.
    pub fn from_document(
        path: impl Into<PathBuf>,
        document: StoreDocument,
        options: StoreOptions,
    ) -> Result<Self> {
        let mut store = Self::new(path, options);
        let contents =
            Contents::from_document(document).map_err(|msg| Error::corrupt(&store.path, msg))?;
        store.replace(contents);
        store.state = StoreState::Loaded;
        Ok(store)
    }

    /// The current contents as a document.
    pub fn to_document(&self) -> StoreDocument {
        StoreDocument {
            current_theme: self.current.clone(),
            last_selected_theme: self.last_selected.clone(),
            available_themes: self.themes.clone(),
            extra: self.extra.clone(),
        }
    }

    /// Reads the backing file, replacing everything in memory.
    ///
    /// A missing file leaves an empty store in the `Empty` state. On any
    /// other failure the store keeps its previous contents and state.
    pub fn load(&mut self) -> Result<()> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "theme file not found, starting empty");
                self.replace(Contents {
                    themes: BTreeMap::new(),
                    current: None,
                    last_selected: None,
                    extra: BTreeMap::new(),
                });
                self.state = StoreState::Empty;
                return Ok(());
            }
            Err(err) => return Err(Error::io(&self.path, err)),
        };

        let document = self
            .format()
            .parse(&text)
            .map_err(|msg| Error::corrupt(&self.path, msg))?;
        let contents =
            Contents::from_document(document).map_err(|msg| Error::corrupt(&self.path, msg))?;

        self.replace(contents);
        self.state = StoreState::Loaded;
        tracing::debug!(
            path = %self.path.display(),
            themes = self.themes.len(),
            current = self.current.as_deref().unwrap_or(""),
            "loaded theme store"
        );
        Ok(())
    }

    /// Writes the store to its file atomically.
    pub fn save(&mut self) -> Result<()> {
        let text = self
            .format()
            .render(&self.to_document())
            .map_err(|msg| Error::corrupt(&self.path, msg))?;
        write_atomic(&self.path, text.as_bytes())?;
        self.state = StoreState::Loaded;
        tracing::info!(path = %self.path.display(), "saved theme store");
        Ok(())
    }

    /// Adds or replaces a theme after validating it. The first theme added to
    /// an empty store becomes current.
    pub fn upsert_theme(&mut self, theme: ThemeConfig) -> Result<()> {
        validate(&theme).into_result(&theme.name)?;

        let name = theme.name.clone();
        let replaced = self.themes.insert(name.clone(), theme).is_some();
        if self.current.is_none() {
            self.current = Some(name.clone());
            self.last_selected = Some(name.clone());
        }
        tracing::debug!(theme = %name, replaced, "upserted theme");
        self.after_mutation()
    }

    /// Makes `name` the current theme.
    pub fn set_current(&mut self, name: &str) -> Result<()> {
        if !self.themes.contains_key(name) {
            return Err(Error::UnknownTheme {
                name: name.to_string(),
            });
        }
        self.current = Some(name.to_string());
        self.last_selected = Some(name.to_string());
        tracing::debug!(theme = %name, "current theme set");
        self.after_mutation()
    }

    /// Removes a theme. The current theme can only be removed when it is the
    /// last one left.
    pub fn remove_theme(&mut self, name: &str) -> Result<ThemeConfig> {
        if !self.themes.contains_key(name) {
            return Err(Error::UnknownTheme {
                name: name.to_string(),
            });
        }
        if self.current.as_deref() == Some(name) && self.themes.len() > 1 {
            return Err(Error::InvalidOperation(format!(
                "cannot remove the current theme '{}'; switch to another theme first",
                name
            )));
        }

        let removed = self.themes.remove(name).ok_or_else(|| Error::UnknownTheme {
            name: name.to_string(),
        })?;
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        if self.last_selected.as_deref() == Some(name) {
            self.last_selected = self.current.clone();
        }
        tracing::debug!(theme = %name, "removed theme");
        self.after_mutation()?;
        Ok(removed)
    }

    pub fn themes(&self) -> &BTreeMap<String, ThemeConfig> {
        &self.themes
    }

    /// Theme names, sorted.
    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }

    pub fn theme(&self, name: &str) -> Option<&ThemeConfig> {
        self.themes.get(name)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_theme(&self) -> Option<&ThemeConfig> {
        self.current.as_deref().and_then(|name| self.themes.get(name))
    }

    pub fn last_selected_name(&self) -> Option<&str> {
        self.last_selected.as_deref()
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == StoreState::Dirty
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    fn format(&self) -> FileFormat {
        FileFormat::from_path(&self.path)
    }

    fn replace(&mut self, contents: Contents) {
        self.themes = contents.themes;
        self.current = contents.current;
        self.last_selected = contents.last_selected;
        self.extra = contents.extra;
    }

    fn after_mutation(&mut self) -> Result<()> {
        self.state = StoreState::Dirty;
        if !self.options.auto_save {
            return Ok(());
        }
        self.save().inspect_err(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "auto-save failed");
        })
    }
}
