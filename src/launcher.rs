//! Hand-off to the platform's default URL handler

use tracing::{info, warn};

pub trait UrlLauncher: Send + Sync {
    /// Fire and forget; the outcome is not reported back to the caller.
    fn open_url(&self, url: &str);
}

/// Opens URLs with whatever the desktop has registered for them
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl UrlLauncher for SystemLauncher {
    fn open_url(&self, url: &str) {
        info!(url, "Opening URL in default handler");
        if let Err(e) = open::that(url) {
            warn!(error = %e, url, "Failed to open URL");
        }
    }
}
