use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "clipshelf")]
#[command(about = "Clipboard history: capture, classify, deduplicate and store", long_about = None)]
pub struct Cli {
    /// Path to config.toml (defaults to <data-dir>/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Application data directory (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Watch the clipboard and record history until Ctrl-C
    Run,
    /// Print the stored history, newest first
    List,
    /// Delete all stored history
    Clear,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }
}
