//! Collision-safe backup path allocation

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Upper bound on numeric suffix probing. A filesystem already holding this
/// many backups of one file is treated as broken rather than probed forever.
const MAX_PROBES: u32 = 1000;

/// Allocate a backup path for `target` that does not currently exist.
///
/// Probes `<target><suffix>`, then `<target><suffix>.1`, `.2`, … and returns
/// the first free candidate. This is a pure probe: the file is not created
/// here, so another process could claim the path between the probe and the
/// caller's copy. Callers create the backup immediately after allocation to
/// keep that window small.
pub fn allocate_backup_path(target: &Path, suffix: &str) -> Result<PathBuf> {
    let mut base = OsString::from(target.as_os_str());
    base.push(suffix);
    let base = PathBuf::from(base);

    if !base.exists() {
        return Ok(base);
    }

    for i in 1..=MAX_PROBES {
        let mut candidate = OsString::from(base.as_os_str());
        candidate.push(format!(".{i}"));
        let candidate = PathBuf::from(candidate);
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(Error::BackupExhausted {
        path: target.to_path_buf(),
        attempts: MAX_PROBES,
    })
}
