//! Command-line interface.
//!
//! ## Module Structure
//!
//! - `args`: clap argument definitions
//! - `run`: command dispatch
//! - `commands`: `mine` and `init` implementations
//! - `report`: progress and diagnostic printing
//! - `exit_status`: process exit codes

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

use std::process::ExitCode;

use anyhow::Result;

pub use args::{Arguments, Command, InitArgs, MineArgs};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    Ok(run::run(args)?.into())
}
