//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `mine`: Extract strings for every configured target
//! - `init`: Initialize a gettext-miner configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Mine(args)) => args.verbose,
            Some(Command::Init(_)) | None => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct MineArgs {
    /// Project directory (the configuration file is searched from here upwards)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// List every visited file with the extractors that accepted it
    #[arg(short, long)]
    pub list: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Directory to create the configuration file in
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable strings for all configured targets
    Mine(MineArgs),
    /// Initialize a new .gettext-miner.json configuration file
    Init(InitArgs),
}
