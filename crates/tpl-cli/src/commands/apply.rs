//! The `apply` command
//!
//! Clones the template, syncs the configured paths into the current repo,
//! reports per-path and grand-total summaries, then enables git hooks.

use std::io::{self, IsTerminal};
use std::path::Path;

use colored::Colorize;

use tpl_core::{
    CompareStrategy, ConflictPrompt, Normalizer, OnExisting, SyncConfig, SyncTotals, Syncer, git,
    hooks,
};

use crate::error::{CliError, Result};

/// Flag overrides collected from the command line
#[derive(Debug, Default)]
pub struct ApplyArgs {
    pub template: Option<String>,
    pub paths: Vec<String>,
    pub hooks_path: Option<String>,
    pub on_existing: Option<OnExisting>,
    pub compare: Option<CompareStrategy>,
    pub show_diff: bool,
    pub backup_suffix: Option<String>,
}

impl ApplyArgs {
    /// Overlay flags onto the repo config (which overlays the defaults)
    fn into_config(self, root: &Path) -> Result<SyncConfig> {
        let mut config = SyncConfig::load_or_default(root)?;
        if let Some(url) = self.template {
            config.template_url = url;
        }
        if !self.paths.is_empty() {
            config.source_roots = self.paths;
        }
        if let Some(hooks_path) = self.hooks_path {
            config.hooks_path = hooks_path;
        }
        if let Some(on_existing) = self.on_existing {
            config.on_existing = on_existing;
        }
        if let Some(compare) = self.compare {
            config.compare = compare;
        }
        if self.show_diff {
            config.auto_show_diff = true;
        }
        if let Some(suffix) = self.backup_suffix {
            config.backup_suffix = suffix;
        }
        Ok(config)
    }
}

/// Run the full apply flow against the repo at `root`.
pub fn run_apply(root: &Path, args: ApplyArgs) -> Result<()> {
    if !git::is_git_repo(root) {
        return Err(CliError::user(
            "This does not look like a git repo root (no .git found). Run from the repo root.",
        ));
    }

    let config = args.into_config(root)?;

    let tmp = tempfile::tempdir()?;
    let template_dir = tmp.path().join("template");
    println!("Cloning template: {}", config.template_url.cyan());
    git::clone_template(&config.template_url, &template_dir)?;

    let normalizer = Normalizer::with_builtins();
    let interactive = io::stdin().is_terminal();
    let stdin = io::stdin();
    let mut prompt = ConflictPrompt::new(
        stdin.lock(),
        io::stdout(),
        interactive,
        &normalizer,
        config.compare,
        config.auto_show_diff,
        config.backup_suffix.clone(),
    );

    let mut totals = SyncTotals::default();
    for rel in &config.source_roots {
        let src = template_dir.join(rel);
        let dst = root.join(rel);

        if !src.exists() {
            println!(
                "{}: Not found in template, skipping: {rel}",
                "warning".yellow().bold()
            );
            continue;
        }

        let mut syncer = Syncer::new(
            &normalizer,
            &mut prompt,
            config.on_existing,
            config.compare,
            config.backup_suffix.clone(),
        );
        let path_totals = syncer.sync_path(&src, &dst)?;

        let extra = if config.on_existing != OnExisting::Skip {
            format!(", ~{} overwritten", path_totals.overwritten)
        } else {
            String::new()
        };
        println!(
            "Applied {}: +{} copied, {} skipped{extra}",
            rel.cyan(),
            path_totals.copied,
            path_totals.skipped
        );

        totals.merge(path_totals);
    }

    println!();
    println!(
        "{} copied={}, skipped={}, overwritten={}",
        "Totals:".bold(),
        totals.copied,
        totals.skipped,
        totals.overwritten
    );

    let hooks_dir = root.join(&config.hooks_path);
    if hooks_dir.exists() {
        hooks::ensure_exec_bits(&hooks_dir)?;
        hooks::set_hooks_path(root, &config.hooks_path)?;
        println!(
            "Git hooks enabled: core.hooksPath = {}",
            config.hooks_path.cyan()
        );
    } else {
        eprintln!(
            "{}: Hooks directory not found ({}); core.hooksPath not set.",
            "warning".yellow().bold(),
            config.hooks_path
        );
    }

    Ok(())
}
