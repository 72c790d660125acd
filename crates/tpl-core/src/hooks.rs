//! Git hook enablement
//!
//! Hook scripts copied in from the template need the executable bit, and
//! git needs `core.hooksPath` pointed at their directory. Both steps run
//! after the sync; chmod is best effort and never aborts the run.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Add `u+x,g+x,o+x` to every regular file in `hooks_dir`.
///
/// Per-file permission failures are logged and swallowed. A missing
/// directory is a no-op. No-op on non-unix platforms.
pub fn ensure_exec_bits(hooks_dir: &Path) -> Result<()> {
    if !hooks_dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(hooks_dir).map_err(|e| Error::io(hooks_dir, e))? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable hooks entry: {e}");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            match fs::metadata(&path) {
                Ok(meta) => {
                    let mut perms = meta.permissions();
                    perms.set_mode(perms.mode() | 0o111);
                    match fs::set_permissions(&path, perms) {
                        Ok(()) => debug!(path = %path.display(), "marked executable"),
                        Err(e) => {
                            warn!(path = %path.display(), "could not set executable bit: {e}")
                        }
                    }
                }
                Err(e) => warn!(path = %path.display(), "could not stat hook: {e}"),
            }
        }
    }

    Ok(())
}

/// Register `hooks_path` (relative to the repo root) as `core.hooksPath`.
pub fn set_hooks_path(repo_root: &Path, hooks_path: &str) -> Result<()> {
    let repo = git2::Repository::open(repo_root)?;
    let mut config = repo.config()?;
    config.set_str("core.hooksPath", hooks_path)?;
    debug!(hooks_path, "core.hooksPath set");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dir_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        ensure_exec_bits(&dir.path().join("no-such-dir")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn files_gain_exec_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let hook = dir.path().join("pre-commit");
        fs::write(&hook, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&hook, fs::Permissions::from_mode(0o644)).unwrap();

        // Subdirectories are left alone
        fs::create_dir(dir.path().join("sub")).unwrap();

        ensure_exec_bits(dir.path()).unwrap();

        let mode = fs::metadata(&hook).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[test]
    fn hooks_path_is_written_to_git_config() {
        let dir = tempfile::tempdir().unwrap();
        git2::Repository::init(dir.path()).unwrap();

        set_hooks_path(dir.path(), "tools/git-hooks").unwrap();

        let repo = git2::Repository::open(dir.path()).unwrap();
        let config = repo.config().unwrap();
        assert_eq!(
            config.get_string("core.hooksPath").unwrap(),
            "tools/git-hooks"
        );
    }

    #[test]
    fn set_hooks_path_fails_outside_a_repo() {
        let dir = tempfile::tempdir().unwrap();
        assert!(set_hooks_path(dir.path(), "hooks").is_err());
    }
}
