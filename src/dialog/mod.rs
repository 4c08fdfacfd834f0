//! Release notification dialog: state, button dispatch and download handling
//!
//! Rendering lives in `view.rs`; everything here runs without a window so the
//! behaviour can be driven directly from tests.

mod view;

use crate::artifact::store_artifact_in;
use crate::constants::INSTALLATION_URL;
use crate::error::UpdateError;
use crate::launcher::UrlLauncher;
use crate::presence::DialogPresence;
use crate::settings::{self, SharedSettings};
use crate::transfer::{TransferEvent, TransferHandle, Transport};
use crate::types::{ActionRole, BuildInfo, ReleaseInfo};
use crate::ui::components::{parse_release_notes, NoteBlock};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A button together with the action it triggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogButton {
    role: ActionRole,
    label: &'static str,
    icon: &'static str,
    is_default: bool,
    enabled: bool,
}

impl DialogButton {
    fn new(role: ActionRole) -> Self {
        let (label, icon, is_default) = match role {
            ActionRole::Update => ("Update", egui_phosphor::regular::DOWNLOAD_SIMPLE, true),
            ActionRole::Download => ("Download latest", egui_phosphor::regular::DOWNLOAD, false),
            ActionRole::Skip => ("Skip version", egui_phosphor::regular::SKIP_FORWARD, false),
            ActionRole::Cancel => ("Cancel", egui_phosphor::regular::X, false),
        };
        Self {
            role,
            label,
            icon,
            is_default,
            enabled: true,
        }
    }

    pub fn role(&self) -> ActionRole {
        self.role
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn icon(&self) -> &'static str {
        self.icon
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Progress indicator state. `bound == 0` means the size is unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadProgress {
    pub visible: bool,
    pub value: u64,
    pub bound: u64,
}

/// Blocking error shown on top of the dialog until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub title: String,
    pub message: String,
}

impl From<&UpdateError> for ErrorNotice {
    fn from(e: &UpdateError) -> Self {
        let message = match e {
            UpdateError::Transfer(msg) => format!("Error while downloading:\n{}", msg),
            other => other.to_string(),
        };
        Self {
            title: e.title().to_string(),
            message,
        }
    }
}

/// Collaborators the dialog hands work to
#[derive(Clone)]
pub struct DialogServices {
    pub launcher: Arc<dyn UrlLauncher>,
    pub transport: Arc<dyn Transport>,
    pub settings: SharedSettings,
}

pub struct UpdateDialog {
    release: ReleaseInfo,
    build: BuildInfo,
    presence: DialogPresence,
    services: DialogServices,
    buttons: [DialogButton; 4],
    notes: Vec<NoteBlock>,
    progress: DownloadProgress,
    error: Option<ErrorNotice>,
    transfer: Option<TransferHandle>,
    artifact_dir: PathBuf,
    artifact: Option<PathBuf>,
    open: bool,
}

impl UpdateDialog {
    pub fn new(
        release: ReleaseInfo,
        build: BuildInfo,
        presence: DialogPresence,
        services: DialogServices,
    ) -> Self {
        let notes = parse_release_notes(&release.changes_html);
        Self {
            release,
            build,
            presence,
            services,
            buttons: [
                DialogButton::new(ActionRole::Update),
                DialogButton::new(ActionRole::Download),
                DialogButton::new(ActionRole::Skip),
                DialogButton::new(ActionRole::Cancel),
            ],
            notes,
            progress: DownloadProgress::default(),
            error: None,
            transfer: None,
            artifact_dir: std::env::temp_dir(),
            artifact: None,
            open: false,
        }
    }

    /// Store downloads somewhere other than the system temp dir
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    // ------------------------------------------------------------------------
    // Open / close
    // ------------------------------------------------------------------------

    pub fn open(&mut self) {
        info!(version = %self.release.version, build = self.release.build_number, "Showing update dialog");
        self.open = true;
        self.presence.set_open(true);
    }

    pub fn close(&mut self) {
        if self.transfer.take().is_some() {
            debug!("Abandoning in-flight release download");
        }
        if self.open {
            debug!("Closing update dialog");
            self.open = false;
            self.presence.set_open(false);
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn release(&self) -> &ReleaseInfo {
        &self.release
    }

    pub fn notes(&self) -> &[NoteBlock] {
        &self.notes
    }

    pub fn buttons(&self) -> &[DialogButton] {
        &self.buttons
    }

    pub fn button(&self, role: ActionRole) -> Option<&DialogButton> {
        self.buttons.iter().find(|b| b.role == role)
    }

    fn button_mut(&mut self, role: ActionRole) -> Option<&mut DialogButton> {
        self.buttons.iter_mut().find(|b| b.role == role)
    }

    pub fn update_enabled(&self) -> bool {
        self.button(ActionRole::Update).is_some_and(|b| b.enabled)
    }

    fn set_update_enabled(&mut self, enabled: bool) {
        if let Some(button) = self.button_mut(ActionRole::Update) {
            button.enabled = enabled;
        }
    }

    pub fn progress(&self) -> DownloadProgress {
        self.progress
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_downloading(&self) -> bool {
        self.transfer.is_some()
    }

    pub fn artifact(&self) -> Option<&Path> {
        self.artifact.as_deref()
    }

    /// Hands the downloaded package to the installer step
    pub fn take_artifact(&mut self) -> Option<PathBuf> {
        self.artifact.take()
    }

    // ------------------------------------------------------------------------
    // Button dispatch
    // ------------------------------------------------------------------------

    pub fn on_action_selected(&mut self, role: ActionRole) {
        debug!(?role, "Update dialog action");
        match role {
            ActionRole::Skip => {
                settings::lock(&self.services.settings).set_skip_version(&self.release.version);
            }
            ActionRole::Download => {
                let url = self.download_target();
                self.services.launcher.open_url(url);
            }
            ActionRole::Update => {
                self.start_download();
                return;
            }
            ActionRole::Cancel => {}
        }
        self.close();
    }

    /// CI builds can fetch the package directly, anything else gets the install guide
    pub fn download_target(&self) -> &str {
        if self.build.is_ci_build() {
            &self.release.release_url
        } else {
            INSTALLATION_URL
        }
    }

    fn start_download(&mut self) {
        if !self.update_enabled() || self.transfer.is_some() {
            debug!("Release download already running");
            return;
        }
        info!(url = %self.release.release_url, "Starting release download");
        self.progress = DownloadProgress {
            visible: true,
            value: 0,
            bound: 0,
        };
        self.set_update_enabled(false);
        self.transfer = Some(self.services.transport.get(&self.release.release_url));
    }

    // ------------------------------------------------------------------------
    // Transfer events
    // ------------------------------------------------------------------------

    /// Apply whatever the transport delivered since the last frame.
    pub fn poll_transfer(&mut self) {
        let Some(handle) = &self.transfer else {
            return;
        };
        let drained = handle.drain();
        for event in drained.events {
            match event {
                TransferEvent::Progress(received, total) => self.on_download_progress(received, total),
                TransferEvent::Finished(result) => {
                    self.on_download_complete(result);
                    return;
                }
            }
        }
        if drained.disconnected {
            warn!("Release download stopped without a result");
            self.on_download_complete(Err(UpdateError::Transfer("download worker stopped".into())));
        }
    }

    pub fn on_download_progress(&mut self, received: u64, total: u64) {
        self.progress.bound = total;
        self.progress.value = received;
    }

    pub fn on_download_complete(&mut self, result: Result<Vec<u8>, UpdateError>) {
        self.transfer = None;
        self.progress.visible = false;

        match result {
            Ok(body) => match store_artifact_in(&self.artifact_dir, &body) {
                Ok(path) => {
                    info!(path = %path.display(), "Release ready for install");
                    self.artifact = Some(path);
                    self.close();
                }
                Err(e) => {
                    // Update stays disabled here, unlike the transfer error path
                    warn!(error = %e, "Could not store downloaded release");
                    self.error = Some(ErrorNotice::from(&e));
                }
            },
            Err(e) => {
                warn!(error = %e, "Network error while downloading release");
                self.error = Some(ErrorNotice::from(&e));
                self.set_update_enabled(true);
            }
        }
    }
}

impl Drop for UpdateDialog {
    fn drop(&mut self) {
        if self.open {
            self.presence.set_open(false);
        }
    }
}
