//! blameline: print a file with inline git blame annotations.
//!
//! Entry point for the `blameline` binary. Wires the production host adapters
//! (`config`, `git`, `terminal`) to the decoration pipeline in
//! `blameline-core`.
//!
//! # Startup sequence
//!
//! 1. Install the tracing subscriber on stderr so stdout stays clean.
//! 2. Load the TOML config and run the one-time settings migration.
//! 3. Start the git worker thread; a bad repository fails here.
//! 4. Read the file into a `TerminalEditor` and run one decoration cycle.
//! 5. Print the annotated file, or the descriptors as JSON.

mod cli;
mod config;
mod git;
mod terminal;

use std::io::{IsTerminal, Write};

use anyhow::Context;
use blameline_core::theme::Variant;
use blameline_core::{decorate, migrate_settings, ConfigStore, RenderOptions};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    // Step 1: config + migration. Both are soft: a broken config never blocks.
    let mut store = config::TomlConfigStore::load(cli.config.clone().unwrap_or_else(config::config_path));
    migrate_settings(&mut store);
    let settings = store.settings();
    let options = RenderOptions { base_url: cli.base_url.clone().or_else(|| store.base_url()) };
    let variant = Variant::from_name(cli.theme.as_deref().or(store.theme()).unwrap_or("dark"));
    tracing::debug!(config = %store.path().display(), mode = settings.decoration_mode().as_str(), "loaded settings");

    // Step 2: git worker owns the repository for the rest of the run.
    let lookup = git::worker::GitBlameLookup::spawn(&cli.repo)
        .with_context(|| format!("opening repository at {}", cli.repo.display()))?;

    // Step 3: one decoration cycle against the file as it is on disk.
    let file = cli.repo.join(&cli.path);
    let contents = std::fs::read_to_string(&file)
        .with_context(|| format!("reading {}", file.display()))?;
    let mut editor = terminal::TerminalEditor::new(cli.path.clone(), &contents, cli.selections());
    decorate(&mut editor, &settings, &options, &lookup, chrono::Utc::now()).await;

    // Step 4: output.
    let stdout = std::io::stdout();
    let styled = stdout.is_terminal();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, editor.decorations())?;
        writeln!(out)?;
    } else {
        editor.render(&mut out, variant, styled, cli.links)?;
    }
    out.flush()?;
    Ok(())
}
