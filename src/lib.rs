//! gettext-miner - translatable string extractor
//!
//! Extracts strings meant for translation from PHP sources, Latte templates,
//! NEON configuration and SQL files, and writes them as a gettext template
//! (`.pot`) or a PHP array file.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and target construction
//! - `core`: Extraction pipeline (extractors, formatters, targets)
//! - `diagnostics`: Non-fatal problems reported by a run
//! - `error`: Typed configuration and extraction errors

pub mod cli;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod error;
