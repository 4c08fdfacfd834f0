//! Behaviour of the update dialog driven through its public API.
//!
//! The URL launcher and transport are replaced by fakes that record calls
//! and let each test script the transfer events it needs.

use jotter_updater::artifact::artifact_suffix;
use jotter_updater::constants::{INSTALLATION_URL, TEMP_FILE_PREFIX};
use jotter_updater::launcher::UrlLauncher;
use jotter_updater::settings::{self, SettingsStore};
use jotter_updater::transfer::{TransferHandle, TransferSender, Transport};
use jotter_updater::{
    ActionRole, BuildInfo, DialogPresence, DialogServices, ReleaseInfo, UpdateDialog, UpdateError,
};
use rstest::rstest;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingLauncher {
    opened: Mutex<Vec<String>>,
}

impl UrlLauncher for RecordingLauncher {
    fn open_url(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

#[derive(Default)]
struct FakeTransport {
    requests: Mutex<Vec<String>>,
    senders: Mutex<Vec<TransferSender>>,
}

impl FakeTransport {
    fn last_sender(&self) -> TransferSender {
        self.senders.lock().unwrap().last().cloned().expect("no request issued")
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str) -> TransferHandle {
        let (sender, handle) = TransferHandle::channel();
        self.requests.lock().unwrap().push(url.to_string());
        self.senders.lock().unwrap().push(sender);
        handle
    }
}

/// Everything a test needs to inspect after poking the dialog
struct Fixture {
    dir: TempDir,
    downloads: TempDir,
    presence: DialogPresence,
    launcher: Arc<RecordingLauncher>,
    transport: Arc<FakeTransport>,
    dialog: UpdateDialog,
}

fn fixture(release_provenance: &str, version: &str) -> Fixture {
    fixture_with_storage(release_provenance, version, true)
}

/// `writable == false` points downloads at a directory that does not exist
fn fixture_with_storage(release_provenance: &str, version: &str, writable: bool) -> Fixture {
    let dir = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();
    let presence = DialogPresence::new();
    let launcher = Arc::new(RecordingLauncher::default());
    let transport = Arc::new(FakeTransport::default());

    let services = DialogServices {
        launcher: launcher.clone(),
        transport: transport.clone(),
        settings: settings::shared(SettingsStore::open(dir.path())),
    };
    let release = ReleaseInfo {
        changes_html: "<h2>Changes</h2><ul><li>Better sync</li></ul>".to_string(),
        release_url: "https://example.org/x.deb".to_string(),
        version: version.to_string(),
        build_number: 5432,
    };
    let artifact_dir = if writable {
        downloads.path().to_path_buf()
    } else {
        downloads.path().join("gone")
    };
    let mut dialog = UpdateDialog::new(release, BuildInfo::new(release_provenance), presence.clone(), services)
        .with_artifact_dir(artifact_dir);
    dialog.open();

    Fixture {
        dir,
        downloads,
        presence,
        launcher,
        transport,
        dialog,
    }
}

// ============================================================================
// Open / close
// ============================================================================

#[test]
fn opening_sets_presence() {
    let f = fixture("Manual", "2.3.0");
    assert!(f.dialog.is_open());
    assert!(f.presence.is_open());
}

#[rstest]
#[case(ActionRole::Skip)]
#[case(ActionRole::Download)]
#[case(ActionRole::Cancel)]
fn non_update_actions_close_the_dialog(#[case] role: ActionRole) {
    let mut f = fixture("Manual", "2.3.0");
    f.dialog.on_action_selected(role);
    assert!(!f.dialog.is_open());
    assert!(!f.presence.is_open());
    assert!(f.transport.requests.lock().unwrap().is_empty());
}

#[test]
fn update_keeps_the_dialog_open_until_the_transfer_resolves() {
    let mut f = fixture("Manual", "2.3.0");
    f.dialog.on_action_selected(ActionRole::Update);

    assert!(f.dialog.is_open());
    assert!(f.presence.is_open());
    assert!(f.dialog.progress().visible);
    assert!(!f.dialog.update_enabled());
    assert_eq!(
        *f.transport.requests.lock().unwrap(),
        vec!["https://example.org/x.deb".to_string()]
    );

    f.transport.last_sender().finish(Ok(b"x".to_vec()));
    f.dialog.poll_transfer();
    assert!(!f.dialog.is_open());
    assert!(!f.presence.is_open());
}

#[test]
fn explicit_close_clears_presence() {
    let mut f = fixture("Manual", "2.3.0");
    f.dialog.close();
    assert!(!f.presence.is_open());
}

// ============================================================================
// Skip / Download
// ============================================================================

#[test]
fn skip_persists_exact_version_string() {
    let mut f = fixture("Manual", "2.3.0 (build 5432)");
    f.dialog.on_action_selected(ActionRole::Skip);

    let reopened = SettingsStore::open(f.dir.path());
    assert_eq!(reopened.skip_version(), Some("2.3.0 (build 5432)"));
}

#[rstest]
#[case("Travis CI", "https://example.org/x.deb")]
#[case("AppVeyor", "https://example.org/x.deb")]
#[case("Manual", INSTALLATION_URL)]
#[case("", INSTALLATION_URL)]
fn download_opens_url_by_provenance(#[case] provenance: &str, #[case] expected: &str) {
    let mut f = fixture(provenance, "2.3.0");
    f.dialog.on_action_selected(ActionRole::Download);

    assert_eq!(*f.launcher.opened.lock().unwrap(), vec![expected.to_string()]);
    assert!(f.transport.requests.lock().unwrap().is_empty());
}

// ============================================================================
// Update
// ============================================================================

#[test]
fn progress_tracks_received_and_total() {
    let mut f = fixture("Manual", "2.3.0");
    f.dialog.on_action_selected(ActionRole::Update);

    for (received, total) in [(10, 100), (55, 100), (100, 100)] {
        f.dialog.on_download_progress(received, total);
        let progress = f.dialog.progress();
        assert_eq!(progress.value, received);
        assert_eq!(progress.bound, total);
        assert!(progress.visible);
    }
}

#[test]
fn successful_update_keeps_artifact_on_disk() {
    let mut f = fixture("Manual", "2.3.0");
    f.dialog.on_action_selected(ActionRole::Update);

    let sender = f.transport.last_sender();
    sender.progress(10, 10);
    sender.finish(Ok(b"BINARYDATA".to_vec()));
    f.dialog.poll_transfer();

    assert!(!f.dialog.progress().visible);
    assert!(f.dialog.error().is_none());

    let path = f.dialog.take_artifact().expect("artifact path");
    assert!(path.starts_with(f.downloads.path()));
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with(TEMP_FILE_PREFIX));
    assert_eq!(path.extension().unwrap(), artifact_suffix());

    drop(f.dialog);
    assert_eq!(std::fs::read(&path).unwrap(), b"BINARYDATA");
}

#[test]
fn transfer_error_is_reported_and_update_reenabled() {
    let mut f = fixture("Manual", "2.3.0");
    f.dialog.on_action_selected(ActionRole::Update);

    f.transport
        .last_sender()
        .finish(Err(UpdateError::Transfer("Connection refused".to_string())));
    f.dialog.poll_transfer();

    let notice = f.dialog.error().expect("error notice");
    assert!(notice.message.contains("Connection refused"));
    assert!(f.dialog.update_enabled());
    assert!(!f.dialog.progress().visible);
    assert!(f.dialog.is_open());
    assert!(f.presence.is_open());
}

#[test]
fn update_can_be_retried_after_transfer_error() {
    let mut f = fixture("Manual", "2.3.0");
    f.dialog.on_action_selected(ActionRole::Update);
    f.dialog
        .on_download_complete(Err(UpdateError::Transfer("Connection refused".to_string())));
    f.dialog.dismiss_error();

    f.dialog.on_action_selected(ActionRole::Update);
    assert_eq!(f.transport.requests.lock().unwrap().len(), 2);
    assert!(f.dialog.progress().visible);
}

#[test]
fn failed_transfer_can_be_retried_through_events() {
    let mut f = fixture("Manual", "2.3.0");
    f.dialog.on_action_selected(ActionRole::Update);

    let first = f.transport.last_sender();
    first.progress(40, 100);
    first.finish(Err(UpdateError::Transfer("Connection reset".to_string())));
    f.dialog.poll_transfer();
    assert!(!f.dialog.is_downloading());
    assert!(f.dialog.update_enabled());

    f.dialog.dismiss_error();
    f.dialog.on_action_selected(ActionRole::Update);

    assert_eq!(f.transport.requests.lock().unwrap().len(), 2);
    assert!(f.dialog.is_downloading());
    assert!(f.dialog.progress().visible);
    assert_eq!(f.dialog.progress().value, 0);
    assert!(!f.dialog.update_enabled());
}

#[test]
fn update_while_transfer_in_flight_is_ignored() {
    let mut f = fixture("Manual", "2.3.0");
    f.dialog.on_action_selected(ActionRole::Update);

    f.transport.last_sender().progress(25, 100);
    f.dialog.poll_transfer();
    f.dialog.on_action_selected(ActionRole::Update);

    assert_eq!(f.transport.requests.lock().unwrap().len(), 1);
    assert!(f.dialog.is_downloading());
    assert_eq!(f.dialog.progress().value, 25);
    assert!(f.dialog.is_open());
}

#[test]
fn storage_error_leaves_update_disabled() {
    let mut f = fixture_with_storage("Manual", "2.3.0", false);
    let missing = f.downloads.path().join("gone");

    f.dialog.on_action_selected(ActionRole::Update);
    f.transport.last_sender().finish(Ok(b"BINARYDATA".to_vec()));
    f.dialog.poll_transfer();

    let notice = f.dialog.error().expect("error notice");
    assert_eq!(notice.title, "Could not store to file");
    assert!(notice.message.contains(&missing.display().to_string()));
    // Observed behaviour: only the transfer error path re-enables Update
    assert!(!f.dialog.update_enabled());
    assert!(!f.dialog.progress().visible);
    assert!(f.dialog.is_open());
    assert!(f.dialog.take_artifact().is_none());
}
