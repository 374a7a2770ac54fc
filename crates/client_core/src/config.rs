use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use serde::Deserialize;
use tracing::warn;

use crate::theme::FilePreferenceStore;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
pub const SETTINGS_FILE: &str = "chat_client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub preferences_path: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            preferences_path: None,
        }
    }
}

impl ClientSettings {
    pub fn with_server_url(mut self, server_url: Option<String>) -> Self {
        if let Some(url) = server_url {
            self.server_url = normalize_server_url(&url);
        }
        self
    }

    pub fn with_preferences_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.preferences_path = path;
        }
        self
    }

    pub fn resolve_preferences_path(&self) -> Result<PathBuf> {
        match &self.preferences_path {
            Some(path) => Ok(path.clone()),
            None => FilePreferenceStore::default_path(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    preferences_path: Option<PathBuf>,
}

/// Defaults, then `chat_client.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.server_url {
                    settings.server_url = normalize_server_url(&v);
                }
                if let Some(v) = file_cfg.preferences_path {
                    settings.preferences_path = Some(v);
                }
            }
            Err(err) => warn!("ignoring malformed {}: {err}", path.display()),
        }
    }

    if let Some(v) = env("CHAT_SERVER_URL").filter(|v| !v.trim().is_empty()) {
        settings.server_url = normalize_server_url(&v);
    }
    if let Some(v) = env("APP__SERVER_URL").filter(|v| !v.trim().is_empty()) {
        settings.server_url = normalize_server_url(&v);
    }
    if let Some(v) = env("APP__PREFERENCES_PATH").filter(|v| !v.trim().is_empty()) {
        settings.preferences_path = Some(PathBuf::from(v));
    }

    settings
}

pub fn normalize_server_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_SERVER_URL.to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
