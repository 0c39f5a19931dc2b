//! Utility functions shared across the extraction pipeline.
//!
//! ## Module Structure
//!
//! - `helpers`: String unwrapping, escaping, line counting and path normalization

pub mod helpers;

pub use helpers::*;
