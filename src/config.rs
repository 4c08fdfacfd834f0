//! Runtime configuration resolved from the environment

use crate::constants::{ENV_MANIFEST_URL, ENV_MOCK_UPDATE, ENV_RELEASE, MANIFEST_URL};
use crate::types::BuildInfo;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateConfig {
    pub manifest_url: String,
    /// Serve a canned release instead of hitting the network
    pub mock_release: bool,
    pub build: BuildInfo,
}

impl UpdateConfig {
    pub fn from_env() -> Self {
        let config = Self::from_lookup(|key| std::env::var(key).ok());
        debug!(
            manifest_url = %config.manifest_url,
            mock = config.mock_release,
            release = %config.build.release,
            "Update configuration resolved"
        );
        config
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let manifest_url = lookup(ENV_MANIFEST_URL)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| MANIFEST_URL.to_string());
        Self {
            manifest_url,
            mock_release: lookup(ENV_MOCK_UPDATE).is_some(),
            build: BuildInfo::resolve(lookup(ENV_RELEASE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let config = UpdateConfig::from_lookup(|_| None);
        assert_eq!(config.manifest_url, MANIFEST_URL);
        assert!(!config.mock_release);
    }

    #[test]
    fn overrides_are_honoured() {
        let config = UpdateConfig::from_lookup(|key| match key {
            ENV_MANIFEST_URL => Some("http://localhost:8080/latest.json".into()),
            ENV_MOCK_UPDATE => Some("1".into()),
            ENV_RELEASE => Some("Travis CI".into()),
            _ => None,
        });
        assert_eq!(config.manifest_url, "http://localhost:8080/latest.json");
        assert!(config.mock_release);
        assert!(config.build.is_ci_build());
    }

    #[test]
    fn blank_manifest_url_falls_back() {
        let config = UpdateConfig::from_lookup(|key| (key == ENV_MANIFEST_URL).then(|| "  ".to_string()));
        assert_eq!(config.manifest_url, MANIFEST_URL);
    }
}
