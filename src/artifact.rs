//! Persisting a downloaded release for the installer step

use crate::constants::TEMP_FILE_PREFIX;
use crate::error::{Result, UpdateError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File suffix of the release package for the host OS family
pub fn artifact_suffix() -> &'static str {
    if cfg!(target_os = "macos") {
        "dmg"
    } else if cfg!(target_os = "windows") {
        "zip"
    } else if cfg!(target_os = "linux") {
        "deb"
    } else {
        "download"
    }
}

/// Write `body` to a fresh `Jotter-XXXXXX.<suffix>` file in `dir` and keep it there.
pub fn store_artifact_in(dir: &Path, body: &[u8]) -> Result<PathBuf> {
    let suffix = format!(".{}", artifact_suffix());
    let pattern = dir.join(format!("{}XXXXXX{}", TEMP_FILE_PREFIX, suffix));

    let mut file = tempfile::Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .suffix(&suffix)
        .tempfile_in(dir)
        .map_err(|source| UpdateError::Storage {
            location: pattern.clone(),
            source,
        })?;
    debug!(path = %file.path().display(), "Created release file");

    let location = file.path().to_path_buf();
    let storage_err = |source| UpdateError::Storage {
        location: location.clone(),
        source,
    };
    file.write_all(body).map_err(storage_err)?;
    file.flush().map_err(storage_err)?;

    // The handle closes here; the file stays for the installer
    let (_, path) = file.keep().map_err(|e| storage_err(e.error))?;
    info!(path = %path.display(), bytes = body.len(), "Release stored");
    Ok(path)
}
