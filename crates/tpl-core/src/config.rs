//! Sync run configuration
//!
//! Defaults mirror the template repository layout; a `template-sync.toml`
//! in the target repo root can override any field, and CLI flags override
//! both.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compare::CompareStrategy;
use crate::error::{Error, Result};
use crate::sync::OnExisting;

/// Default template repository
pub const DEFAULT_TEMPLATE_URL: &str = "https://github.com/mrWheel/templateRepo";

/// Relative paths synced from the template by default
pub const DEFAULT_SOURCE_ROOTS: &[&str] = &[".github/workflows", "tools/git-hooks", ".clangFormat"];

/// Where lifecycle hook scripts live in the target repo
pub const DEFAULT_HOOKS_PATH: &str = "tools/git-hooks";

/// Suffix for backup copies
pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

/// Optional per-repository config file name
pub const CONFIG_FILE_NAME: &str = "template-sync.toml";

/// Everything one sync run needs to know
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SyncConfig {
    /// Template repository URL (or local path)
    pub template_url: String,
    /// Relative paths copied from the template
    pub source_roots: Vec<String>,
    /// Hooks directory, registered as git `core.hooksPath` after the sync
    pub hooks_path: String,
    /// What to do when a target file already exists
    pub on_existing: OnExisting,
    /// How to detect differences under the `ask` policy
    pub compare: CompareStrategy,
    /// Show the normalized unified diff automatically when prompting
    pub auto_show_diff: bool,
    /// Suffix for backup+overwrite copies
    pub backup_suffix: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            template_url: DEFAULT_TEMPLATE_URL.to_string(),
            source_roots: DEFAULT_SOURCE_ROOTS.iter().map(|s| s.to_string()).collect(),
            hooks_path: DEFAULT_HOOKS_PATH.to_string(),
            on_existing: OnExisting::Ask,
            compare: CompareStrategy::Hash,
            auto_show_diff: false,
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
        }
    }
}

impl SyncConfig {
    /// Load the optional config file from the repo root; defaults when absent.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path,
            message: e.to_string(),
        })
    }
}
