//! String extractors.
//!
//! An extractor decides from a path alone whether it handles a file
//! (`accepts`) and turns the file content into a partial [`MessageMap`]
//! (`extract`). Extractors are configured once and hold no state between files.
//!
//! ## Module Structure
//!
//! - `php`: lexical token-stream extractor for PHP sources (also the Nette preset)
//! - `latte`: macro-pattern extractor for Latte templates
//! - `neon`: path-selector extractor for structured configuration documents
//! - `sql`: sentinel-tag extractor for SQL files

pub mod latte;
pub mod neon;
pub mod php;
pub mod sql;

use enum_dispatch::enum_dispatch;

use crate::core::data::MessageMap;
use crate::error::ExtractError;

pub use latte::{LatteExtractor, LatteSettings};
pub use neon::{NeonExtractor, NeonSettings};
pub use php::{PhpExtractor, PhpSettings};
pub use sql::{SqlExtractor, SqlSettings};

/// Capability shared by all extractors.
#[enum_dispatch]
pub trait Extractor {
    /// Registry name of the extractor, used in listings.
    fn name(&self) -> &'static str;

    /// True iff the path ends with one of the configured extensions. Performs no I/O.
    fn accepts(&self, path: &str) -> bool;

    /// Extract messages from `content` read from `path`.
    ///
    /// Unrecognized content yields no messages. Only the structured-document
    /// extractor can fail here.
    fn extract(
        &self,
        path: &str,
        content: &str,
        project_root: Option<&str>,
    ) -> Result<MessageMap, ExtractError>;
}

/// Any configured extractor.
#[enum_dispatch(Extractor)]
#[derive(Debug, Clone)]
pub enum AnyExtractor {
    Php(PhpExtractor),
    Latte(LatteExtractor),
    Neon(NeonExtractor),
    Sql(SqlExtractor),
}

/// Case-sensitive file-name suffixes an extractor handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extensions(Vec<String>);

impl Extensions {
    /// Configured extensions, or `defaults` when none were given.
    pub fn new(configured: Option<Vec<String>>, defaults: &[&str]) -> Self {
        Self(configured.unwrap_or_else(|| defaults.iter().map(|e| e.to_string()).collect()))
    }

    pub fn accepts(&self, path: &str) -> bool {
        self.0.iter().any(|ext| path.ends_with(ext.as_str()))
    }
}
