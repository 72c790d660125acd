//! Template Sync CLI
//!
//! Applies template repository files to the current repository and enables
//! git hooks.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::ApplyArgs;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Apply {
            template,
            paths,
            hooks_path,
            on_existing,
            compare,
            show_diff,
            backup_suffix,
        }) => {
            let cwd = std::env::current_dir()?;
            commands::run_apply(
                &cwd,
                ApplyArgs {
                    template,
                    paths,
                    hooks_path,
                    on_existing: on_existing.map(Into::into),
                    compare: compare.map(Into::into),
                    show_diff,
                    backup_suffix,
                },
            )
        }
        None => {
            println!("{} Template Sync CLI", "tpl".green().bold());
            println!();
            println!("Run {} for available commands.", "tpl --help".cyan());
            Ok(())
        }
    }
}
