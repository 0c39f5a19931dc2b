//! Extraction pipeline.
//!
//! ## Module Structure
//!
//! - `data`: messages and their occurrences
//! - `extract`: per-language extractors
//! - `detect`: plural placeholder detectors
//! - `format`: output formatters
//! - `file_scanner`: candidate file enumeration
//! - `target`: one extraction job, from files to written output
//! - `miner`: runs targets in order
//! - `utils`: string and path helpers

pub mod data;
pub mod detect;
pub mod extract;
pub mod file_scanner;
pub mod format;
pub mod miner;
pub mod target;
pub mod utils;

pub use data::{MessageMap, Occurrence};
pub use miner::{Miner, MinerEvent, MinerReport};
pub use target::{Target, TargetOutcome, TargetReport, VisitedFile};
