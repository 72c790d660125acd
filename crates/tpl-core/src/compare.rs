//! Difference detection strategies
//!
//! One strategy is active per run. Size, mtime and line count are coarse raw
//! signals with no normalization; diff and hash compare normalized content
//! and agree with each other on what counts as a difference.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diff;
use crate::error::{Error, Result};
use crate::fingerprint;
use crate::normalize::Normalizer;

/// How to decide whether an existing target differs from the template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareStrategy {
    /// Raw byte-size inequality
    Size,
    /// Raw modification-time inequality
    Mtime,
    /// Line-count inequality over raw text
    Lines,
    /// Non-empty unified diff of normalized content
    Diff,
    /// Normalized content hashes differ
    #[default]
    Hash,
}

impl CompareStrategy {
    /// Parse a strategy from its CLI/config name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "size" => Some(Self::Size),
            "mtime" => Some(Self::Mtime),
            "lines" => Some(Self::Lines),
            "diff" => Some(Self::Diff),
            "hash" => Some(Self::Hash),
            _ => None,
        }
    }

    /// All valid strategy names
    pub fn all_names() -> &'static [&'static str] {
        &["size", "mtime", "lines", "diff", "hash"]
    }
}

impl fmt::Display for CompareStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size => write!(f, "size"),
            Self::Mtime => write!(f, "mtime"),
            Self::Lines => write!(f, "lines"),
            Self::Diff => write!(f, "diff"),
            Self::Hash => write!(f, "hash"),
        }
    }
}

/// Decide whether `src` (template) and `dst` (existing target) differ under
/// the given strategy. The target is assumed to exist.
pub fn files_differ(
    src: &Path,
    dst: &Path,
    strategy: CompareStrategy,
    normalizer: &Normalizer,
) -> Result<bool> {
    match strategy {
        CompareStrategy::Size => {
            let src_len = fs::metadata(src).map_err(|e| Error::io(src, e))?.len();
            let dst_len = fs::metadata(dst).map_err(|e| Error::io(dst, e))?.len();
            Ok(src_len != dst_len)
        }
        CompareStrategy::Mtime => {
            let src_mtime = fs::metadata(src)
                .and_then(|m| m.modified())
                .map_err(|e| Error::io(src, e))?;
            let dst_mtime = fs::metadata(dst)
                .and_then(|m| m.modified())
                .map_err(|e| Error::io(dst, e))?;
            Ok(src_mtime != dst_mtime)
        }
        CompareStrategy::Lines => Ok(fingerprint::count_file_lines(src)?
            != fingerprint::count_file_lines(dst)?),
        CompareStrategy::Diff => {
            let d = diff::unified_diff(src, dst, normalizer)?;
            Ok(!d.trim().is_empty())
        }
        CompareStrategy::Hash => Ok(fingerprint::file_hash_for_compare(src, normalizer)?
            != fingerprint::file_hash_for_compare(dst, normalizer)?),
    }
}
