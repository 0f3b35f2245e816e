//! Command line options and logging setup.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

const SCORES_FILE: &str = "highscores.json";

#[derive(Parser, Debug, Clone)]
#[command(name = "tui-2048", version, about = "Slide tiles, merge pairs, reach 2048")]
pub struct Config {
    /// High score file (default: per-user data directory)
    #[arg(long, env = "TUI_2048_SCORES")]
    pub scores: Option<PathBuf>,

    /// Name stored with new high scores
    #[arg(long, env = "TUI_2048_NAME", default_value = "player")]
    pub name: String,

    /// Ask for a name when a game ends
    #[arg(long)]
    pub ask_name: bool,

    /// Clear the high score file before starting
    #[arg(long)]
    pub reset_scores: bool,

    /// Fixed seed for tile spawns (default: from the clock)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Write logs to this file; nothing is logged otherwise
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn scores_path(&self) -> PathBuf {
        self.scores.clone().unwrap_or_else(default_scores_path)
    }

    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

/// `<data dir>/tui-2048/highscores.json`, or `./highscores.json` when the
/// platform has no home directory.
pub fn default_scores_path() -> PathBuf {
    match ProjectDirs::from("", "", "tui-2048") {
        Some(dirs) => dirs.data_dir().join(SCORES_FILE),
        None => PathBuf::from(SCORES_FILE),
    }
}

fn clock_seed() -> u32 {
    let now = Local::now();
    (now.timestamp() as u32) ^ now.timestamp_subsec_nanos()
}

/// Install a file-backed fmt subscriber. Without a file nothing is installed:
/// the terminal is in raw mode and cannot show log lines.
pub fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    // RUST_LOG=tui_2048_scores=debug,tui_2048_core=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();
    Ok(())
}
