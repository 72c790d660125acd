//! Tree synchronization with a per-file conflict policy
//!
//! Walks every file under a source root and mirrors it to the same relative
//! location under the target root. Missing targets are always copied;
//! existing targets go through the [`OnExisting`] policy, consulting the
//! comparator and the injected [`ConflictHandler`] only under `ask`.
//!
//! The run is single-threaded and sequential; files are visited in sorted
//! discovery order. Per-file failures are logged and isolated so the run
//! always ends with totals for everything that did succeed.

use std::fmt;
use std::fs;
use std::path::Path;

use filetime::FileTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::backup;
use crate::compare::{self, CompareStrategy};
use crate::error::{Error, Result};
use crate::normalize::Normalizer;
use crate::resolve::{ConflictHandler, Decision};

/// Policy for files that already exist in the target tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnExisting {
    /// Count as skipped without reading either file
    Skip,
    /// Compare; prompt on difference
    #[default]
    Ask,
    /// Replace unconditionally, no comparison
    Overwrite,
}

impl OnExisting {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "skip" => Some(Self::Skip),
            "ask" => Some(Self::Ask),
            "overwrite" => Some(Self::Overwrite),
            _ => None,
        }
    }

    pub fn all_names() -> &'static [&'static str] {
        &["skip", "ask", "overwrite"]
    }
}

impl fmt::Display for OnExisting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Ask => write!(f, "ask"),
            Self::Overwrite => write!(f, "overwrite"),
        }
    }
}

/// Running counters for one sync run; final values are the run's summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncTotals {
    pub copied: u64,
    pub skipped: u64,
    pub overwritten: u64,
}

impl SyncTotals {
    pub fn merge(&mut self, other: SyncTotals) {
        self.copied += other.copied;
        self.skipped += other.skipped;
        self.overwritten += other.overwritten;
    }
}

/// Applies one global policy across every file under the configured roots
pub struct Syncer<'a, H> {
    normalizer: &'a Normalizer,
    handler: H,
    on_existing: OnExisting,
    strategy: CompareStrategy,
    backup_suffix: String,
}

impl<'a, H: ConflictHandler> Syncer<'a, H> {
    pub fn new(
        normalizer: &'a Normalizer,
        handler: H,
        on_existing: OnExisting,
        strategy: CompareStrategy,
        backup_suffix: impl Into<String>,
    ) -> Self {
        Self {
            normalizer,
            handler,
            on_existing,
            strategy,
            backup_suffix: backup_suffix.into(),
        }
    }

    /// Sync one source root into its mirrored target location.
    ///
    /// The root may be a single file, in which case the per-file policy
    /// applies without a tree walk. Directory entries are created as needed
    /// and never compared or prompted for.
    pub fn sync_path(&mut self, src: &Path, dst: &Path) -> Result<SyncTotals> {
        let mut totals = SyncTotals::default();

        if src.is_file() {
            self.sync_file(src, dst, &mut totals)?;
            return Ok(totals);
        }

        for entry in WalkDir::new(src).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable entry under {}: {e}", src.display());
                    continue;
                }
            };
            let Ok(rel) = entry.path().strip_prefix(src) else {
                continue;
            };
            let target = dst.join(rel);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
                continue;
            }

            // File-level failures stay isolated to the file
            if let Err(e) = self.sync_file(entry.path(), &target, &mut totals) {
                warn!(path = %entry.path().display(), "failed to sync file: {e}");
            }
        }

        Ok(totals)
    }

    fn sync_file(&mut self, src: &Path, dst: &Path, totals: &mut SyncTotals) -> Result<()> {
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        if !dst.exists() {
            copy_with_times(src, dst)?;
            totals.copied += 1;
            debug!(path = %dst.display(), "copied");
            return Ok(());
        }

        match self.on_existing {
            OnExisting::Skip => {
                totals.skipped += 1;
            }
            OnExisting::Overwrite => {
                copy_with_times(src, dst)?;
                totals.overwritten += 1;
            }
            OnExisting::Ask => {
                if !compare::files_differ(src, dst, self.strategy, self.normalizer)? {
                    totals.skipped += 1;
                    return Ok(());
                }
                match self.handler.resolve(src, dst)? {
                    Decision::Skip => totals.skipped += 1,
                    Decision::Overwrite => {
                        copy_with_times(src, dst)?;
                        totals.overwritten += 1;
                    }
                    Decision::BackupOverwrite => {
                        let backup_path =
                            backup::allocate_backup_path(dst, &self.backup_suffix)?;
                        // Backup strictly before the overwrite
                        copy_with_times(dst, &backup_path)?;
                        copy_with_times(src, dst)?;
                        totals.overwritten += 1;
                        debug!(backup = %backup_path.display(), "backed up before overwrite");
                    }
                }
            }
        }

        Ok(())
    }
}

/// Copy a file, preserving permissions (via `fs::copy`) and timestamps.
fn copy_with_times(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst).map_err(|e| Error::io(dst, e))?;

    let meta = fs::metadata(src).map_err(|e| Error::io(src, e))?;
    let mtime = FileTime::from_last_modification_time(&meta);
    let atime = FileTime::from_last_access_time(&meta);
    filetime::set_file_times(dst, atime, mtime).map_err(|e| Error::io(dst, e))?;
    Ok(())
}
