//! Persisted light/dark display preference.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use shared::domain::ThemePreference;
use tracing::{info, warn};

pub const THEME_PREFERENCE_KEY: &str = "theme";
const PREFERENCES_FILE_NAME: &str = "preferences.toml";
const APP_DIR_NAME: &str = "chat_client";

pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Key/value preferences kept in a small TOML file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| anyhow!("unable to resolve user config dir"))?;
        Ok(base.join(APP_DIR_NAME).join(PREFERENCES_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read {}", self.path.display()))
            }
        };
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", self.path.display()))
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let serialized = toml::to_string(values).context("failed to serialize preferences")?;
        let tmp_path = self.path.with_extension("toml.tmp");
        fs::write(&tmp_path, serialized)
            .with_context(|| format!("failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Unparseable files are replaced rather than blocking the write.
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct ThemeController<S: PreferenceStore> {
    store: S,
    current: ThemePreference,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Reads the persisted preference once. Absent or unreadable means light.
    pub fn load(store: S) -> Self {
        let current = match store.get(THEME_PREFERENCE_KEY) {
            Ok(Some(value)) => ThemePreference::from_stored(&value),
            Ok(None) => ThemePreference::default(),
            Err(err) => {
                warn!("failed to read theme preference, using light: {err:#}");
                ThemePreference::default()
            }
        };
        info!(theme = %current, "applied theme preference");
        Self { store, current }
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    pub fn icon(&self) -> &'static str {
        self.current.icon()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Flips the applied mode and persists it. A failed write keeps the new mode.
    pub fn toggle(&mut self) -> ThemePreference {
        self.current = self.current.toggled();
        if let Err(err) = self.store.set(THEME_PREFERENCE_KEY, self.current.as_str()) {
            warn!(theme = %self.current, "failed to persist theme preference: {err:#}");
        }
        self.current
    }
}

#[cfg(test)]
#[path = "tests/theme_tests.rs"]
mod tests;
