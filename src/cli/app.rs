//! Main CLI application structure

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use super::output::{Output, OutputFormat};
use super::session::Session;
use crate::config::Config;
use crate::controller::Board;
use crate::domain::TaskRecord;
use crate::store::MemoryStore;

#[derive(Parser)]
#[command(name = "tasklight")]
#[command(author, version, about = "An interactive to-do list session for the terminal")]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Preload the session store from a JSON array of task records
    #[arg(long)]
    pub seed: Option<PathBuf>,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_writer(io::stderr)
            .init();
    }

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let config = Config::load(&cwd)?;

    let seed_path = cli.seed.or_else(|| config.seed.clone());
    let records = match &seed_path {
        Some(path) => load_seed(path)?,
        None => Vec::new(),
    };

    let store = MemoryStore::seeded(records).context("Failed to seed the session store")?;
    let output = Output::new(cli.format);
    let mut session = Session::new(Board::new(store), config, output);

    let stdin = io::stdin();
    session.run(stdin.lock())
}

/// Reads a JSON array of task records
fn load_seed(path: &Path) -> Result<Vec<TaskRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed file: {}", path.display()))
}
