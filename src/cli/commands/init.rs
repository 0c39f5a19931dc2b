use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::args::InitArgs;
use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init(args: InitArgs) -> Result<ExitStatus> {
    let config_path = args.path.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    Ok(ExitStatus::Success)
}
