//! Extraction of translation macros from Latte templates.
//!
//! Regex based, so it works on templates of any Latte version but only
//! understands these forms:
//!
//! - `{_'string'}`, `{_'string', $count}`, with an optional modifier chain
//!   such as `{_'string', $count|modifier1|modifier2}`
//! - `{_}string{/_}` and `{_|modifier}string{/_}` (content taken verbatim)
//! - `{$this->translate('string')}` and `{$control->translate('string')}`
//!
//! Modifiers are matched case-sensitively. Extra modifiers are regex fragments
//! so they can match arguments, e.g. `mySpecialFilter[^|]+` for
//! `mySpecialFilter: 10, 5`; escaping them is up to the caller.

use regex::Regex;
use serde::Deserialize;

use super::{Extensions, Extractor};
use crate::core::data::{MessageMap, Occurrence};
use crate::core::utils::{offset_to_line, unwrap_code_string};
use crate::error::{ConfigError, ExtractError};

pub const DEFAULT_PREFIXES: &[&str] = &["_"];

pub const DEFAULT_MODIFIERS: &[&str] = &[
    "noescape",
    "stripHtml",
    r"nl2br\|noescape",
    r"breakLines\|noescape",
];

pub const DEFAULT_EXTENSIONS: &[&str] = &[".latte"];

/// Quoted string on a single line, honoring backslash escapes.
const LINE_STRING: &str = r#""(?:\\.|[^"\\\n])*"|'(?:\\.|[^'\\\n])*'"#;

/// Quoted string that may span lines.
const STRING: &str = r#""(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'"#;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LatteSettings {
    /// Replaces the default macro names.
    pub prefixes: Option<Vec<String>>,
    /// Replaces the default modifier fragments.
    pub modifiers: Option<Vec<String>>,
    #[serde(default)]
    pub extra_modifiers: Vec<String>,
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct LatteExtractor {
    /// `{_'string'|modifier}`
    standalone: Regex,
    /// `{_|modifier}string{/_}`
    paired: Regex,
    /// `$this->translate('string')`
    direct_call: Regex,
    extensions: Extensions,
}

impl LatteExtractor {
    /// Compile the macro patterns. Fails if a modifier fragment is not a valid pattern.
    pub fn new(settings: LatteSettings) -> Result<Self, ConfigError> {
        let prefixes = settings
            .prefixes
            .unwrap_or_else(|| DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect())
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");

        let mut modifiers = settings
            .modifiers
            .unwrap_or_else(|| DEFAULT_MODIFIERS.iter().map(|m| m.to_string()).collect());
        modifiers.extend(settings.extra_modifiers);
        let modifiers = format!(r"\|(?:{})", modifiers.join("|"));

        let standalone = Regex::new(&format!(
            r"\{{(?:{prefixes})\s*({LINE_STRING})[^|]*?(?:{modifiers})*\}}"
        ))?;
        let paired = Regex::new(&format!(
            r"(?s)\{{(?:{prefixes})(?:{modifiers})*\}}(.*?)\{{/(?:{prefixes})\}}"
        ))?;
        let direct_call = Regex::new(&format!(
            r"(?s)(?:\$this->translate|\$control->translate)\(\s*?({STRING})\s*?(?:,|\))"
        ))?;

        Ok(Self {
            standalone,
            paired,
            direct_call,
            extensions: Extensions::new(settings.extensions, DEFAULT_EXTENSIONS),
        })
    }
}

/// Record the first capture group of every match of `pattern`.
fn collect(
    messages: &mut MessageMap,
    pattern: &Regex,
    path: &str,
    content: &str,
    unwrap: fn(&str) -> String,
) {
    for caps in pattern.captures_iter(content) {
        if let Some(found) = caps.get(1) {
            messages.record(
                unwrap(found.as_str()),
                Occurrence::new(path, offset_to_line(content, found.start())),
            );
        }
    }
}

impl Extractor for LatteExtractor {
    fn name(&self) -> &'static str {
        "LegacyLatte"
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
        let mut messages = MessageMap::new();
        collect(&mut messages, &self.standalone, path, content, unwrap_code_string);
        collect(&mut messages, &self.paired, path, content, str::to_string);
        collect(&mut messages, &self.direct_call, path, content, unwrap_code_string);
        Ok(messages)
    }
}
