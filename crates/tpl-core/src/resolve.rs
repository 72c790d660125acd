//! Interactive conflict resolution
//!
//! Entered once per conflicting file, after the comparator has already
//! reported a difference under the `ask` policy. Presents both files'
//! fingerprints (and optionally the normalized diff), then loops on one-line
//! choices until a terminal decision is reached. The loop is an explicit
//! state machine: `Resolved` is terminal and never re-entered.

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::debug;

use crate::backup;
use crate::compare::CompareStrategy;
use crate::diff;
use crate::error::Result;
use crate::fingerprint::Fingerprint;
use crate::normalize::Normalizer;

/// Terminal outcome for one conflicting file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Skip,
    Overwrite,
    /// Preserve the current target under a backup path, then overwrite
    BackupOverwrite,
}

/// Resolves one conflict into a [`Decision`]
pub trait ConflictHandler {
    fn resolve(&mut self, src: &Path, dst: &Path) -> Result<Decision>;
}

impl<T: ConflictHandler + ?Sized> ConflictHandler for &mut T {
    fn resolve(&mut self, src: &Path, dst: &Path) -> Result<Decision> {
        (**self).resolve(src, dst)
    }
}

/// Batch-mode handler: never prompts, never overwrites
pub struct SkipAll;

impl ConflictHandler for SkipAll {
    fn resolve(&mut self, _src: &Path, dst: &Path) -> Result<Decision> {
        debug!(path = %dst.display(), "non-interactive run, skipping conflict");
        Ok(Decision::Skip)
    }
}

enum State {
    AwaitingChoice,
    Resolved(Decision),
}

/// Interactive prompt over injected input/output streams
pub struct ConflictPrompt<'a, R, W> {
    input: R,
    output: W,
    /// False when stdin is not a terminal; forces skip without prompting
    interactive: bool,
    normalizer: &'a Normalizer,
    strategy: CompareStrategy,
    auto_show_diff: bool,
    backup_suffix: String,
}

impl<'a, R: BufRead, W: Write> ConflictPrompt<'a, R, W> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        input: R,
        output: W,
        interactive: bool,
        normalizer: &'a Normalizer,
        strategy: CompareStrategy,
        auto_show_diff: bool,
        backup_suffix: impl Into<String>,
    ) -> Self {
        Self {
            input,
            output,
            interactive,
            normalizer,
            strategy,
            auto_show_diff,
            backup_suffix: backup_suffix.into(),
        }
    }

    fn show_diff(&mut self, diff_text: &str) -> Result<()> {
        if diff_text.trim().is_empty() {
            writeln!(
                self.output,
                "Info: No text diff available (binary or identical after normalization)."
            )?;
        } else {
            writeln!(self.output)?;
            writeln!(self.output, "----- diff (normalized) -----")?;
            writeln!(self.output, "{}", diff_text.trim_end())?;
            writeln!(self.output, "-----------------------------")?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> ConflictHandler for ConflictPrompt<'_, R, W> {
    fn resolve(&mut self, src: &Path, dst: &Path) -> Result<Decision> {
        let src_stats = Fingerprint::compute(src, self.normalizer)?;
        let dst_stats = Fingerprint::compute(dst, self.normalizer)?;

        writeln!(self.output)?;
        writeln!(self.output, "Warning: File exists: {}", dst.display())?;
        writeln!(self.output, "  target  : {dst_stats}")?;
        writeln!(self.output, "  template: {src_stats}")?;

        if self.normalizer.recognizes(dst) || self.normalizer.recognizes(src) {
            writeln!(
                self.output,
                "Info: Known volatile fields in {} are ignored for compare/diff.",
                dst.file_name().unwrap_or(dst.as_os_str()).to_string_lossy()
            )?;
        }

        let mut diff_text: Option<String> = None;
        if self.strategy == CompareStrategy::Diff || self.auto_show_diff {
            let d = diff::unified_diff(src, dst, self.normalizer)?;
            self.show_diff(&d)?;
            diff_text = Some(d);
        }

        if !self.interactive {
            writeln!(self.output, "Info: No interactive TTY detected; skipping.")?;
            return Ok(Decision::Skip);
        }

        let mut state = State::AwaitingChoice;
        loop {
            match state {
                State::Resolved(decision) => return Ok(decision),
                State::AwaitingChoice => {
                    writeln!(self.output)?;
                    writeln!(
                        self.output,
                        "Choose action: [s]kip, [o]verwrite, [b]ackup+overwrite, [d]iff"
                    )?;
                    write!(self.output, "> ")?;
                    self.output.flush()?;

                    let mut line = String::new();
                    let read = self.input.read_line(&mut line)?;
                    if read == 0 {
                        // EOF counts as skip, same as an empty answer
                        state = State::Resolved(Decision::Skip);
                        continue;
                    }

                    state = match line.trim().to_lowercase().as_str() {
                        "" | "s" | "skip" => State::Resolved(Decision::Skip),
                        "o" | "overwrite" => State::Resolved(Decision::Overwrite),
                        "b" | "backup" => {
                            let backup_path =
                                backup::allocate_backup_path(dst, &self.backup_suffix)?;
                            writeln!(
                                self.output,
                                "Info: Backup will be created at: {}",
                                backup_path.display()
                            )?;
                            State::Resolved(Decision::BackupOverwrite)
                        }
                        "d" | "diff" => {
                            let d = match diff_text.take() {
                                Some(d) => d,
                                None => diff::unified_diff(src, dst, self.normalizer)?,
                            };
                            self.show_diff(&d)?;
                            diff_text = Some(d);
                            State::AwaitingChoice
                        }
                        _ => {
                            writeln!(self.output, "Warning: Unknown choice. Use s/o/b/d.")?;
                            State::AwaitingChoice
                        }
                    };
                }
            }
        }
    }
}
