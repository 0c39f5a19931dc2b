//! Data model shared by every stage of the pipeline.
//!
//! - `message`: `MessageMap` (message text -> occurrences) and `Occurrence`

pub mod message;

pub use message::*;
