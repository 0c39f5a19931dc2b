use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{init::init, mine::mine},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler.
///
/// Returns `Err` when the command cannot run at all (configuration not found
/// or invalid), which the binary reports as an internal error.
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Mine(args)) => mine(args),
        Some(Command::Init(args)) => init(args),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
