//! User settings stored as settings.json in the app data directory

use crate::constants::SETTINGS_FILE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Release the user asked not to be notified about again
    pub skip_version: Option<String>,
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(SETTINGS_FILE);
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join(SETTINGS_FILE);
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }
}

/// Settings bound to the directory they were loaded from
#[derive(Debug)]
pub struct SettingsStore {
    data_dir: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let settings = Settings::load(&data_dir);
        Self { data_dir, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn skip_version(&self) -> Option<&str> {
        self.settings.skip_version.as_deref()
    }

    /// Overwrites any earlier skip and writes through to disk
    pub fn set_skip_version(&mut self, version: &str) {
        info!(version, "Skipping release");
        self.settings.skip_version = Some(version.to_string());
        self.save();
    }

    pub fn set_window_geometry(&mut self, pos: Option<(f32, f32)>, size: Option<(f32, f32)>) {
        self.settings.window_x = pos.map(|p| p.0);
        self.settings.window_y = pos.map(|p| p.1);
        self.settings.window_w = size.map(|s| s.0);
        self.settings.window_h = size.map(|s| s.1);
    }

    pub fn save(&self) {
        self.settings.save(&self.data_dir);
    }
}

/// Store shared between the host window and the update dialog
pub type SharedSettings = Arc<Mutex<SettingsStore>>;

pub fn shared(store: SettingsStore) -> SharedSettings {
    Arc::new(Mutex::new(store))
}

/// Locks the store, recovering the data if a previous holder panicked
pub fn lock(settings: &SharedSettings) -> MutexGuard<'_, SettingsStore> {
    settings.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn unknown_and_missing_fields_are_tolerated() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"skip_version":"1.0.0","legacy_field":true}"#,
        )
        .unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.skip_version.as_deref(), Some("1.0.0"));
        assert_eq!(settings.window_w, None);
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{not json").unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn skip_version_is_written_through() {
        let dir = TempDir::new().unwrap();
        let mut store = SettingsStore::open(dir.path());
        store.set_skip_version("1.0.0");
        store.set_skip_version("1.1.0");

        let reopened = SettingsStore::open(dir.path());
        assert_eq!(reopened.skip_version(), Some("1.1.0"));
    }
}
