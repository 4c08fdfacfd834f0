//! Release check: fetch the manifest, decide whether to offer it

use super::App;
use crate::constants::APP_VERSION;
use crate::error::{Result, UpdateError};
use crate::settings;
use crate::types::{ReleaseInfo, ReleaseManifest};
use eframe::egui;
use std::sync::mpsc::{self, TryRecvError};
use tracing::{debug, info, warn};

/// Who asked for the check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// Start-up check; honours a skipped version
    Automatic,
    /// "Check for updates" button; always offers a newer release
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Available(ReleaseInfo),
    UpToDate,
    Skipped(String),
    Failed(String),
}

/// Dotted numeric comparison, ignoring a leading `v` and any non-numeric tail.
pub fn version_newer(new: &str, current: &str) -> bool {
    let parse = |s: &str| -> (u32, u32, u32) {
        let parts: Vec<u32> = s
            .trim()
            .trim_start_matches('v')
            .split('.')
            .map(|p| {
                let digits: String = p.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().unwrap_or(0)
            })
            .collect();
        (
            parts.first().copied().unwrap_or(0),
            parts.get(1).copied().unwrap_or(0),
            parts.get(2).copied().unwrap_or(0),
        )
    };
    parse(new) > parse(current)
}

pub fn evaluate_release(
    manifest: ReleaseManifest,
    current_version: &str,
    skip_version: Option<&str>,
    kind: CheckKind,
) -> CheckOutcome {
    if !version_newer(&manifest.version, current_version) {
        debug!(latest = %manifest.version, current = current_version, "App is up to date");
        return CheckOutcome::UpToDate;
    }
    if kind == CheckKind::Automatic && skip_version == Some(manifest.version.as_str()) {
        debug!(version = %manifest.version, "Release was skipped by the user");
        return CheckOutcome::Skipped(manifest.version);
    }
    info!(version = %manifest.version, build = manifest.build_number, "App update available");
    CheckOutcome::Available(manifest.into())
}

pub fn fetch_manifest(url: &str) -> Result<ReleaseManifest> {
    debug!(url, "Fetching release manifest");
    let response = reqwest::blocking::get(url).map_err(|e| UpdateError::Manifest(e.to_string()))?;
    debug!(status = %response.status(), "Manifest response received");
    if !response.status().is_success() {
        return Err(UpdateError::Manifest(format!("HTTP {}", response.status())));
    }
    response
        .json::<ReleaseManifest>()
        .map_err(|e| UpdateError::Manifest(e.to_string()))
}

/// Canned release for UI work without a server
pub fn mock_manifest() -> ReleaseManifest {
    ReleaseManifest {
        version: "99.0.0".to_string(),
        build_number: 9999,
        release_url: "https://download.jotter-notes.org/releases/jotter-99.0.0".to_string(),
        changes_html: "<h2>What's New</h2>\
            <ul><li>Note encryption per notebook</li>\
            <li>Faster full-text search on large vaults</li>\
            <li>Markdown tables can be edited in place</li></ul>\
            <h2>Bug Fixes</h2>\
            <ul><li>Fixed lost cursor position after sync</li>\
            <li>Fixed &lt;br&gt; tags leaking into exported notes</li></ul>"
            .to_string(),
    }
}

impl App {
    pub fn check_for_updates(&mut self, ctx: &egui::Context, kind: CheckKind) {
        if self.update_check.is_some() {
            debug!("Update check already running");
            return;
        }

        let (tx, rx) = mpsc::channel();
        self.update_check = Some(rx);
        self.status = Some("Checking for updates...".to_string());

        let ctx = ctx.clone();
        let url = self.config.manifest_url.clone();
        let mock = self.config.mock_release;
        let skip = settings::lock(&self.settings).skip_version().map(str::to_string);

        info!(?kind, url = %url, mock, "Starting update check");

        std::thread::spawn(move || {
            let manifest = if mock {
                debug!("Mock app update: simulating release");
                Ok(mock_manifest())
            } else {
                fetch_manifest(&url)
            };
            let outcome = match manifest {
                Ok(manifest) => evaluate_release(manifest, APP_VERSION, skip.as_deref(), kind),
                Err(e) => {
                    warn!(error = %e, "Failed to fetch release manifest");
                    CheckOutcome::Failed(e.to_string())
                }
            };
            if tx.send(outcome).is_err() {
                debug!("App closed before update check finished");
            }
            ctx.request_repaint();
            info!("Update check complete");
        });
    }

    pub(crate) fn poll_update_check(&mut self) {
        let Some(rx) = &self.update_check else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                self.update_check = None;
                return;
            }
        };
        self.update_check = None;

        match outcome {
            CheckOutcome::Available(release) => {
                if self.presence.is_open() {
                    debug!("Update dialog already open, not opening another");
                    self.status = None;
                } else {
                    self.status = Some(format!("Version {} is available", release.version));
                    self.open_update_dialog(release);
                }
            }
            CheckOutcome::UpToDate => {
                self.status = Some(format!("You are running the latest version (v{})", APP_VERSION));
            }
            CheckOutcome::Skipped(version) => {
                self.status = Some(format!("Version {} was skipped", version));
            }
            CheckOutcome::Failed(e) => {
                self.status = Some(e);
            }
        }
    }
}
