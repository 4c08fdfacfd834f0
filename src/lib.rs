//! Jotter updater - release notification dialog and update download.
//!
//! The library holds everything the binary shows so tests can drive the
//! dialog without opening a window.

pub mod app;
pub mod artifact;
pub mod config;
pub mod constants;
pub mod dialog;
pub mod error;
pub mod launcher;
pub mod presence;
pub mod settings;
pub mod theme;
pub mod transfer;
pub mod types;
pub mod ui;

pub use dialog::{DialogButton, DialogServices, DownloadProgress, ErrorNotice, UpdateDialog};
pub use error::UpdateError;
pub use presence::DialogPresence;
pub use types::{ActionRole, BuildInfo, ReleaseInfo};
