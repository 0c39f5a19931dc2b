//! Extraction of configured values from NEON documents.
//!
//! Each watched file (relative to the project root) carries a list of
//! selectors such as `parameters|about_page|peoples`. A selector resolving
//! to a string yields that string, one resolving to a list yields its string
//! items. Anything else found at a selector is an error that aborts the
//! target. The document is decoded as YAML, which covers the NEON subset used
//! for enumerations once tab indentation is expanded.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_yaml::Value;

use super::{Extensions, Extractor};
use crate::core::data::{MessageMap, Occurrence};
use crate::core::utils::to_forward_slashes;
use crate::error::{ConfigError, ExtractError};

pub const DEFAULT_EXTENSIONS: &[&str] = &[".neon"];

/// Separator between selector segments.
pub const SEGMENT_SEPARATOR: char = '|';

const TAB_WIDTH: usize = 4;

static SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+(?:\|[A-Za-z0-9_-]+)*$").unwrap());

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NeonSettings {
    /// Watched file (relative to the project root) -> selectors.
    pub paths: BTreeMap<String, Vec<String>>,
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct NeonExtractor {
    paths: BTreeMap<String, Vec<String>>,
    extensions: Extensions,
}

impl NeonExtractor {
    /// Validate every selector. Fails on the first one containing a segment
    /// outside `[A-Za-z0-9_-]` or an empty segment.
    pub fn new(settings: NeonSettings) -> Result<Self, ConfigError> {
        if let Some(invalid) = settings
            .paths
            .values()
            .flatten()
            .find(|selector| !SELECTOR.is_match(selector))
        {
            return Err(ConfigError::InvalidSelector(invalid.clone()));
        }

        Ok(Self {
            paths: settings.paths,
            extensions: Extensions::new(settings.extensions, DEFAULT_EXTENSIONS),
        })
    }

    /// Selectors configured for `path`, if it is one of the watched files.
    fn selectors_for(&self, path: &str, project_root: Option<&str>) -> Vec<&str> {
        let path = to_forward_slashes(path);
        let root = project_root.unwrap_or_default();
        self.paths
            .iter()
            .filter(|(file, _)| to_forward_slashes(&format!("{root}/{file}")) == path)
            .flat_map(|(_, selectors)| selectors.iter().map(String::as_str))
            .collect()
    }
}

/// NEON files are usually indented with tabs, which YAML rejects. Tabs in
/// the leading whitespace of a line become `TAB_WIDTH` spaces.
fn expand_indentation(content: &str) -> String {
    content
        .split('\n')
        .map(|line| {
            let body = line.trim_start_matches([' ', '\t']);
            let indent = &line[..line.len() - body.len()];
            let mut expanded = indent.replace('\t', &" ".repeat(TAB_WIDTH));
            expanded.push_str(body);
            expanded
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Descend one key at a time. `None` when a key is missing or an
/// intermediate value is not a mapping.
fn resolve<'a>(document: &'a Value, selector: &str) -> Option<&'a Value> {
    selector
        .split(SEGMENT_SEPARATOR)
        .try_fold(document, |node, segment| {
            let mapping = node.as_mapping()?;
            mapping.get(segment).or_else(|| {
                // Numeric keys decode as numbers, not strings.
                let number: i64 = segment.parse().ok()?;
                mapping.get(Value::from(number))
            })
        })
}

impl Extractor for NeonExtractor {
    fn name(&self) -> &'static str {
        "Neon"
    }

    fn accepts(&self, path: &str) -> bool {
        self.extensions.accepts(path)
    }

    fn extract(
        &self,
        path: &str,
        content: &str,
        project_root: Option<&str>,
    ) -> Result<MessageMap, ExtractError> {
        let mut messages = MessageMap::new();

        let selectors = self.selectors_for(path, project_root);
        if selectors.is_empty() {
            return Ok(messages);
        }

        let Ok(document) = serde_yaml::from_str::<Value>(&expand_indentation(content)) else {
            return Ok(messages);
        };
        if !document.is_mapping() {
            return Ok(messages);
        }

        for selector in selectors {
            match resolve(&document, selector) {
                None => {}
                Some(Value::String(message)) => {
                    messages.record(message.as_str(), Occurrence::file(path));
                }
                Some(Value::Sequence(items)) => {
                    for message in items.iter().filter_map(Value::as_str) {
                        messages.record(message, Occurrence::file(path));
                    }
                }
                Some(_) => {
                    return Err(ExtractError::UnsupportedSelectorValue {
                        selector: selector.to_string(),
                        path: path.to_string(),
                    });
                }
            }
        }

        Ok(messages)
    }
}
