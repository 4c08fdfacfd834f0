//! Common types and data structures

use crate::constants::{CI_PROVIDERS, DEFAULT_RELEASE};

/// A published release as offered to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub changes_html: String,
    pub release_url: String,
    pub version: String,
    pub build_number: i64,
}

impl ReleaseInfo {
    pub fn version_label(&self) -> String {
        format!("Version {} - build {}", self.version, self.build_number)
    }
}

impl From<ReleaseManifest> for ReleaseInfo {
    fn from(m: ReleaseManifest) -> Self {
        Self {
            changes_html: m.changes_html,
            release_url: m.release_url,
            version: m.version,
            build_number: m.build_number,
        }
    }
}

/// What a dialog button does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRole {
    Update,
    Download,
    Skip,
    Cancel,
}

/// Where the running binary was built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub release: String,
}

impl BuildInfo {
    pub fn new(release: impl Into<String>) -> Self {
        Self { release: release.into() }
    }

    /// `runtime` (the environment at startup) first, then the value baked in at build time
    pub fn resolve(runtime: Option<String>) -> Self {
        let release = runtime
            .filter(|r| !r.is_empty())
            .or_else(|| option_env!("JOTTER_RELEASE").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_RELEASE.to_string());
        Self { release }
    }

    pub fn is_ci_build(&self) -> bool {
        CI_PROVIDERS.contains(&self.release.as_str())
    }
}

/// Release manifest published next to every build
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ReleaseManifest {
    pub version: String,
    #[serde(alias = "build")]
    pub build_number: i64,
    #[serde(alias = "url")]
    pub release_url: String,
    #[serde(default, alias = "changes")]
    pub changes_html: String,
}
