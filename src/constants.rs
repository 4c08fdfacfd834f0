//! Application constants and configuration

pub const APP_NAME: &str = "Jotter";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const MANIFEST_URL: &str = "https://download.jotter-notes.org/releases/latest.json";
pub const INSTALLATION_URL: &str = "https://www.jotter-notes.org/installation";

/// Build provenances whose packages can be fetched straight from the release URL
pub const CI_PROVIDERS: &[&str] = &["Travis CI", "AppVeyor"];

/// Provenance used when neither the runtime nor the build environment names one
pub const DEFAULT_RELEASE: &str = "Manual";

pub const TEMP_FILE_PREFIX: &str = "Jotter-";

// Environment overrides
pub const ENV_RELEASE: &str = "JOTTER_RELEASE";
pub const ENV_MANIFEST_URL: &str = "JOTTER_UPDATE_MANIFEST_URL";
pub const ENV_MOCK_UPDATE: &str = "MOCK_APP_UPDATE";

pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "jotter-updater.log";
