//! Template synchronization engine
//!
//! Synchronizes a curated subset of files from a template repository into a
//! local target tree without blindly clobbering local edits:
//!
//! - **Normalization**: known volatile fields in recognized files are masked
//!   before any comparison or diff ([`normalize`])
//! - **Fingerprints**: size, mtime, line count and a normalized content hash
//!   per file ([`fingerprint`])
//! - **Comparison strategies**: size / mtime / lines / diff / hash
//!   ([`compare`])
//! - **Conflict resolution**: interactive skip / overwrite /
//!   backup+overwrite with collision-safe backup naming ([`resolve`],
//!   [`backup`])
//! - **Tree synchronization**: per-file policy over every configured source
//!   root, with aggregate totals ([`sync`])
//!
//! # Architecture
//!
//! ```text
//!            CLI (tpl)
//!                |
//!          sync::Syncer
//!           /    |    \
//!     compare  resolve  backup
//!        |        |
//!   fingerprint  diff
//!         \      /
//!        normalize
//! ```
//!
//! The run is single-threaded and sequential; the interactive prompt blocks
//! until the operator answers. Template retrieval ([`git`]) and hook
//! enablement ([`hooks`]) sit at the edges of the engine.

pub mod backup;
pub mod compare;
pub mod config;
pub mod diff;
pub mod error;
pub mod fingerprint;
pub mod git;
pub mod hooks;
pub mod normalize;
pub mod resolve;
pub mod sync;

pub use backup::allocate_backup_path;
pub use compare::{CompareStrategy, files_differ};
pub use config::SyncConfig;
pub use diff::unified_diff;
pub use error::{Error, Result};
pub use fingerprint::Fingerprint;
pub use normalize::{NormalizeRule, Normalizer, PathMatcher};
pub use resolve::{ConflictHandler, ConflictPrompt, Decision, SkipAll};
pub use sync::{OnExisting, SyncTotals, Syncer};
