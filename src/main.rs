//! Jotter - a terminal note editor with markdown highlighting.
//!
//! # Usage
//!
//! ```bash
//! jotter                      # new note, name asked on save
//! jotter todo.md              # edit or create todo.md
//! jotter --format txt --notes-dir ~/notes
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use jotter::app::App;
use jotter::config::{
    ConfigFlags, FormatMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use jotter::format::Format;

const DEFAULT_TAB_WIDTH: usize = 4;

/// A terminal note editor with markdown highlighting
#[derive(Parser, Debug)]
#[command(name = "jotter", version, about, long_about = None)]
struct Cli {
    /// Note to edit; created on save if it does not exist
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Directory new notes are saved into
    #[arg(long, value_name = "DIR")]
    notes_dir: Option<PathBuf>,

    /// Format of new notes without an extension
    #[arg(long, value_enum)]
    format: Option<FormatMode>,

    /// Spaces inserted by the Tab key
    #[arg(long, value_name = "N")]
    tab_width: Option<usize>,

    /// Disable colored markdown formatting
    #[arg(long)]
    no_color: bool,

    /// Write logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "effective configuration");

    let notes_dir = effective.notes_dir.unwrap_or_else(|| PathBuf::from("."));
    if !notes_dir.is_dir() {
        anyhow::bail!("Notes directory not found: {}", notes_dir.display());
    }

    let mut app = App::new(cli.file)
        .with_notes_dir(notes_dir)
        .with_format(effective.format.map_or(Format::Markdown, FormatMode::format))
        .with_tab_width(effective.tab_width.unwrap_or(DEFAULT_TAB_WIDTH))
        .with_color(!effective.no_color);

    let exit = app.run().context("Application error")?;
    println!("{}", exit.summary());
    Ok(())
}
