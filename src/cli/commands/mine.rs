use std::fs;

use anyhow::{Context, Result};

use super::super::args::MineArgs;
use super::super::exit_status::ExitStatus;
use super::super::report;
use crate::config::load_config;
use crate::core::MinerEvent;

pub fn mine(args: MineArgs) -> Result<ExitStatus> {
    let start_dir = fs::canonicalize(&args.path)
        .with_context(|| format!("Cannot access {}", args.path.display()))?;
    let loaded = load_config(&start_dir)?;
    let miner = loaded.config.into_miner(&loaded.project_root)?;

    if miner.is_empty() {
        println!("No targets configured, exiting.");
        return Ok(ExitStatus::Success);
    }

    let result = miner.run_with(|event| match event {
        MinerEvent::Started(target) => report::print_started(target),
        MinerEvent::Finished(target_report) => {
            report::print_target(target_report, args.list, args.verbose)
        }
    });

    if result.is_success() {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}
