//! Typed errors of the extraction pipeline.
//!
//! Configuration errors are raised while building extractors, formatters and
//! targets, before any file is read. `ExtractError` is the single error an
//! extractor may raise while extracting, and it aborts the rest of its target.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("selector `{0}` is not a valid path within a structured document")]
    InvalidSelector(String),

    #[error("function `{name}` has invalid argument position {position} (positions start at 1)")]
    InvalidArgumentPosition { name: String, position: u32 },

    #[error("invalid macro pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("header field `{0}` must have a string value")]
    InvalidMetaValue(String),

    #[error("the target [{0}] is duplicate")]
    DuplicateTarget(String),

    #[error("Target [{target}]: {message}")]
    Target { target: String, message: String },
}

impl ConfigError {
    pub fn target(target: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Target {
            target: target.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("selector `{selector}` in `{path}` is in unsupported format")]
    UnsupportedSelectorValue { selector: String, path: String },
}
