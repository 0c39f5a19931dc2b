//! Extraction of tagged strings from SQL files.
//!
//! Translatable values are wrapped in a sentinel comment on both sides:
//! `INSERT INTO enum VALUES (/*_*/'String'/*_*/);`. Quoted values use the SQL
//! doubled-quote escape (`'Jack O''Neill'`).

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::{Extensions, Extractor};
use crate::core::data::{MessageMap, Occurrence};
use crate::core::utils::{offset_to_line, unwrap_sql_string};
use crate::error::ExtractError;

/// Sentinel delimiting a translatable value.
pub const TAG: &str = "/*_*/";

pub const DEFAULT_EXTENSIONS: &[&str] = &[".sql"];

static TAGGED: LazyLock<Regex> = LazyLock::new(|| {
    let tag = regex::escape(TAG);
    Regex::new(&format!("(?s){tag}(.*?){tag}")).unwrap()
});

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SqlSettings {
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct SqlExtractor {
    extensions: Extensions,
}

impl SqlExtractor {
    pub fn new(settings: SqlSettings) -> Self {
        Self {
            extensions: Extensions::new(settings.extensions, DEFAULT_EXTENSIONS),
        }
    }
}

impl Extractor for SqlExtractor {
    fn name(&self) -> &'static str {
        "SQL"
    }

    fn accepts(&self, path: &str) -> bool {
        self.extensions.accepts(path)
    }

    fn extract(
        &self,
        path: &str,
        content: &str,
        _project_root: Option<&str>,
    ) -> Result<MessageMap, ExtractError> {
        Ok(TAGGED
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|value| {
                (
                    unwrap_sql_string(value.as_str()),
                    Occurrence::new(path, offset_to_line(content, value.start())),
                )
            })
            .collect())
    }
}
