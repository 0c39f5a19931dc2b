//! Runs every configured target in order.

use super::target::{Target, TargetReport};
use crate::error::ConfigError;

/// Progress of a mining run, in the order it happens.
#[derive(Debug)]
pub enum MinerEvent<'a> {
    Started(&'a Target),
    Finished(&'a TargetReport),
}

#[derive(Debug, Default)]
pub struct Miner {
    targets: Vec<Target>,
}

#[derive(Debug, Default)]
pub struct MinerReport {
    pub targets: Vec<TargetReport>,
}

impl MinerReport {
    /// True when every target wrote its output.
    pub fn is_success(&self) -> bool {
        self.targets.iter().all(TargetReport::is_success)
    }
}

impl Miner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target. Names are unique within a miner.
    pub fn add_target(&mut self, target: Target) -> Result<(), ConfigError> {
        if self.targets.iter().any(|t| t.name() == target.name()) {
            return Err(ConfigError::DuplicateTarget(target.name().to_string()));
        }
        self.targets.push(target);
        Ok(())
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn run(&self) -> MinerReport {
        self.run_with(|_| {})
    }

    /// Process targets in registration order. A failing target never stops
    /// the ones after it.
    pub fn run_with(&self, mut on_event: impl FnMut(MinerEvent<'_>)) -> MinerReport {
        let mut report = MinerReport::default();
        for target in &self.targets {
            on_event(MinerEvent::Started(target));
            let target_report = target.process();
            on_event(MinerEvent::Finished(&target_report));
            report.targets.push(target_report);
        }
        report
    }
}
