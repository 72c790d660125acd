//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use tpl_core::{CompareStrategy, OnExisting};

/// Template Sync - Apply template repository files to your repository
#[derive(Parser, Debug)]
#[command(name = "tpl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Apply template files to the current repository and enable git hooks
    ///
    /// Clones the template repository, copies the configured paths into the
    /// current repo (asking on differences by default), then marks the hook
    /// scripts executable and points git core.hooksPath at them.
    ///
    /// Examples:
    ///   tpl apply                          # defaults, prompt on conflicts
    ///   tpl apply --on-existing overwrite  # take everything from the template
    ///   tpl apply --compare diff --show-diff
    Apply {
        /// Template repository URL (or local path)
        #[arg(long)]
        template: Option<String>,

        /// Relative paths to copy from the template
        #[arg(long = "paths", num_args = 1..)]
        paths: Vec<String>,

        /// Hooks directory in the target repo; set as git core.hooksPath
        #[arg(long)]
        hooks_path: Option<String>,

        /// What to do when a target file already exists
        #[arg(long, value_enum)]
        on_existing: Option<OnExistingArg>,

        /// How to detect differences when --on-existing ask is used
        #[arg(long, value_enum)]
        compare: Option<CompareArg>,

        /// Show the normalized unified diff automatically when prompting
        #[arg(long)]
        show_diff: bool,

        /// Suffix for backups when choosing backup+overwrite
        #[arg(long)]
        backup_suffix: Option<String>,
    },
}

/// clap-facing mirror of [`OnExisting`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnExistingArg {
    Skip,
    Ask,
    Overwrite,
}

impl From<OnExistingArg> for OnExisting {
    fn from(arg: OnExistingArg) -> Self {
        match arg {
            OnExistingArg::Skip => Self::Skip,
            OnExistingArg::Ask => Self::Ask,
            OnExistingArg::Overwrite => Self::Overwrite,
        }
    }
}

/// clap-facing mirror of [`CompareStrategy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompareArg {
    Size,
    Mtime,
    Lines,
    Diff,
    Hash,
}

impl From<CompareArg> for CompareStrategy {
    fn from(arg: CompareArg) -> Self {
        match arg {
            CompareArg::Size => Self::Size,
            CompareArg::Mtime => Self::Mtime,
            CompareArg::Lines => Self::Lines,
            CompareArg::Diff => Self::Diff,
            CompareArg::Hash => Self::Hash,
        }
    }
}
