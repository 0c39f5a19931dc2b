//! Diagnostics produced while mining.
//!
//! The library never prints. Each target run collects its diagnostics and the
//! CLI reporter renders them.

use std::{fmt, path::PathBuf};

use crate::error::ExtractError;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A source entry that is neither a directory nor a usable pattern.
    InvalidSource { path: PathBuf, reason: String },
    /// A candidate file that could not be read. Extraction continues.
    UnreadableFile { path: PathBuf, reason: String },
    /// A selector error stopped the target before its output was written.
    Aborted { target: String, error: ExtractError },
    /// The formatted output could not be saved.
    WriteFailed {
        target: String,
        destination: PathBuf,
        reason: String,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::InvalidSource { .. } | Diagnostic::UnreadableFile { .. } => {
                Severity::Warning
            }
            Diagnostic::Aborted { .. } | Diagnostic::WriteFailed { .. } => Severity::Error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidSource { path, reason } => {
                write!(f, "skipping source {}: {}", path.display(), reason)
            }
            Diagnostic::UnreadableFile { path, reason } => {
                write!(f, "cannot read {}: {}", path.display(), reason)
            }
            Diagnostic::Aborted { target, error } => {
                write!(f, "target [{}] aborted: {}", target, error)
            }
            Diagnostic::WriteFailed {
                target,
                destination,
                reason,
            } => write!(
                f,
                "target [{}] could not write {}: {} (permissions?)",
                target,
                destination.display(),
                reason
            ),
        }
    }
}
