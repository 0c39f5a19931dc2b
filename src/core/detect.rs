//! Plural placeholder detection.
//!
//! The catalog formatter asks a detector whether a message needs plural
//! translation slots. A placeholder preceded by a backslash is escaped and
//! does not count.

use std::sync::LazyLock;

use enum_dispatch::enum_dispatch;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SPRINTF_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:[^\\]|^)%d").unwrap());

static SYMFONY_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:[^\\]|^)%count%").unwrap());

#[enum_dispatch]
pub trait PluralDetector {
    /// True iff the message contains a numeric placeholder.
    fn has_plural_placeholder(&self, message: &str) -> bool;
}

/// Detects `%d`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SprintfPluralDetector;

impl PluralDetector for SprintfPluralDetector {
    fn has_plural_placeholder(&self, message: &str) -> bool {
        SPRINTF_COUNT.is_match(message)
    }
}

/// Detects `%count%`, the Symfony translation convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymfonyTranslationPluralDetector;

impl PluralDetector for SymfonyTranslationPluralDetector {
    fn has_plural_placeholder(&self, message: &str) -> bool {
        SYMFONY_COUNT.is_match(message)
    }
}

#[enum_dispatch(PluralDetector)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detector {
    Sprintf(SprintfPluralDetector),
    SymfonyTranslation(SymfonyTranslationPluralDetector),
}

impl Default for Detector {
    fn default() -> Self {
        SprintfPluralDetector.into()
    }
}

/// Detector name as written in the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectorKind {
    #[default]
    SprintfPluralDetector,
    SymfonyTranslationPluralDetector,
}

impl From<DetectorKind> for Detector {
    fn from(kind: DetectorKind) -> Self {
        match kind {
            DetectorKind::SprintfPluralDetector => SprintfPluralDetector.into(),
            DetectorKind::SymfonyTranslationPluralDetector => {
                SymfonyTranslationPluralDetector.into()
            }
        }
    }
}
