//! Gettext catalog template (`.pot`) output.
//!
//! ```text
//! # Created: 2024-05-01T10:00:00+00:00
//!
//! msgid ""
//! msgstr ""
//! "Content-Type: text/plain; charset=UTF-8\n"
//! "Plural-Forms: nplurals=2; plural=(n != 1);\n"
//!
//! #: ./app/Presenters/HomePresenter.php:12
//! msgid "You have %d mails"
//! msgid_plural "You have %d mails"
//! msgstr[0] ""
//! msgstr[1] ""
//! ```

use chrono::{DateTime, Local, SecondsFormat};
use serde::Deserialize;

use super::OutputFormatter;
use crate::core::data::MessageMap;
use crate::core::detect::{Detector, DetectorKind, PluralDetector};
use crate::core::utils::{catalog_newlines, escape_for_quote, to_forward_slashes};
use crate::error::ConfigError;

pub const DEFAULT_META: &[(&str, &str)] = &[
    ("Content-Type", "text/plain; charset=UTF-8"),
    ("Plural-Forms", "nplurals=2; plural=(n != 1);"),
];

/// First strong isolate, wraps references containing spaces.
const ISOLATE_START: char = '\u{2068}';
/// Pop directional isolate.
const ISOLATE_END: char = '\u{2069}';

fn default_line_numbers() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GettextSettings {
    #[serde(default)]
    pub detector: DetectorKind,
    #[serde(default = "default_line_numbers")]
    pub line_numbers: bool,
    /// Header fields added after (or replacing) the defaults, in file order.
    #[serde(default)]
    pub extra_meta: serde_json::Map<String, serde_json::Value>,
    /// Fixed value for the `# Created:` line.
    pub created: Option<String>,
}

impl Default for GettextSettings {
    fn default() -> Self {
        Self {
            detector: DetectorKind::default(),
            line_numbers: default_line_numbers(),
            extra_meta: serde_json::Map::new(),
            created: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GettextFormatter {
    detector: Detector,
    line_numbers: bool,
    meta: Vec<(String, String)>,
    created: String,
}

impl GettextFormatter {
    /// Resolve the header. The creation stamp is fixed here: the configured
    /// value, else `SOURCE_DATE_EPOCH`, else the current local time.
    pub fn new(settings: GettextSettings) -> Result<Self, ConfigError> {
        let mut meta: Vec<(String, String)> = DEFAULT_META
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        for (key, value) in settings.extra_meta {
            let serde_json::Value::String(value) = value else {
                return Err(ConfigError::InvalidMetaValue(key));
            };
            match meta.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = value,
                None => meta.push((key, value)),
            }
        }

        let created = settings.created.unwrap_or_else(creation_stamp);

        Ok(Self {
            detector: settings.detector.into(),
            line_numbers: settings.line_numbers,
            meta,
            created,
        })
    }

    pub fn meta(&self) -> &[(String, String)] {
        &self.meta
    }

    pub fn created(&self) -> &str {
        &self.created
    }

    fn header(&self, output: &mut Vec<String>) {
        output.push(format!("# Created: {}", self.created));
        output.push(String::new());
        output.push("msgid \"\"".to_string());
        output.push("msgstr \"\"".to_string());
        for (key, value) in &self.meta {
            output.push(format!("\"{key}: {value}\\n\""));
        }
        output.push(String::new());
    }
}

fn creation_stamp() -> String {
    std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|epoch| epoch.trim().parse::<i64>().ok())
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
        .map(|stamp| stamp.to_rfc3339_opts(SecondsFormat::Secs, false))
        .unwrap_or_else(|| Local::now().to_rfc3339_opts(SecondsFormat::Secs, false))
}

/// `#: path:line`, isolated when the reference contains a space.
fn reference_line(reference: &str) -> String {
    if reference.contains(' ') {
        format!("#: {ISOLATE_START}{reference}{ISOLATE_END}")
    } else {
        format!("#: {reference}")
    }
}

impl OutputFormatter for GettextFormatter {
    fn name(&self) -> &'static str {
        "Gettext"
    }

    fn format(&self, messages: &MessageMap) -> String {
        let mut output = Vec::new();
        self.header(&mut output);

        for (message, occurrences) in messages {
            if message.is_empty() {
                continue;
            }

            if self.line_numbers {
                let mut references: Vec<_> = occurrences
                    .iter()
                    .map(|occurrence| occurrence.clone().map_path(to_forward_slashes))
                    .collect();
                references.sort();
                output.extend(
                    references
                        .iter()
                        .map(|reference| reference_line(&reference.to_string())),
                );
            }

            let msgid = catalog_newlines(&escape_for_quote(message, '"'));
            output.push(format!("msgid \"{msgid}\""));
            if self.detector.has_plural_placeholder(message) {
                output.push(format!("msgid_plural \"{msgid}\""));
                output.push("msgstr[0] \"\"".to_string());
                output.push("msgstr[1] \"\"".to_string());
            } else {
                output.push("msgstr \"\"".to_string());
            }
            output.push(String::new());
        }

        output.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::data::Occurrence;

    const HEADER: &str = "msgid \"\"
msgstr \"\"
\"Content-Type: text/plain; charset=UTF-8\\n\"
\"Plural-Forms: nplurals=2; plural=(n != 1);\\n\"
";

    /// Output without the `# Created:` line and the blank line after it.
    fn body(formatter: &GettextFormatter, messages: &MessageMap) -> String {
        formatter
            .format(messages)
            .split('\n')
            .skip(2)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn formatter(settings: GettextSettings) -> GettextFormatter {
        GettextFormatter::new(GettextSettings {
            created: Some("2024-05-01T10:00:00+00:00".to_string()),
            ..settings
        })
        .unwrap()
    }

    fn messages(entries: &[(&str, &[(&str, usize)])]) -> MessageMap {
        entries
            .iter()
            .flat_map(|(message, occurrences)| {
                occurrences
                    .iter()
                    .map(|(path, line)| (message.to_string(), Occurrence::new(*path, *line)))
            })
            .collect()
    }

    #[test]
    fn test_created_line() {
        let formatter = formatter(GettextSettings::default());
        let output = formatter.format(&MessageMap::new());
        assert!(output.starts_with("# Created: 2024-05-01T10:00:00+00:00\n\nmsgid \"\""));
        assert_eq!(formatter.created(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn test_no_translations_and_empty_string() {
        let formatter = formatter(GettextSettings::default());
        assert_eq!(body(&formatter, &MessageMap::new()), HEADER);

        let mut only_empty = MessageMap::new();
        only_empty.record("", Occurrence::new("foo.php", 12));
        only_empty.record("", Occurrence::new("bar.php", 99));
        assert_eq!(body(&formatter, &only_empty), HEADER);
    }

    #[test]
    fn test_plural_translations() {
        let formatter = formatter(GettextSettings::default());
        let messages = messages(&[("You have %d mails in %s folder.", &[(r"project/app\temp.php", 43)])]);
        let expected = format!(
            "{HEADER}
#: project/app/temp.php:43
msgid \"You have %d mails in %s folder.\"
msgid_plural \"You have %d mails in %s folder.\"
msgstr[0] \"\"
msgstr[1] \"\"
"
        );
        assert_eq!(body(&formatter, &messages), expected);
    }

    #[test]
    fn test_alternative_plural_translations() {
        let formatter = formatter(GettextSettings {
            detector: DetectorKind::SymfonyTranslationPluralDetector,
            ..Default::default()
        });
        let messages = messages(&[
            ("You have %count% mails in %name% folder.", &[(r"project/app\core.php", 12)]),
            ("You have %d mails.", &[("project/app/core.php", 13)]),
        ]);
        let expected = format!(
            "{HEADER}
#: project/app/core.php:12
msgid \"You have %count% mails in %name% folder.\"
msgid_plural \"You have %count% mails in %name% folder.\"
msgstr[0] \"\"
msgstr[1] \"\"

#: project/app/core.php:13
msgid \"You have %d mails.\"
msgstr \"\"
"
        );
        assert_eq!(body(&formatter, &messages), expected);
    }

    #[test]
    fn test_references() {
        let formatter = formatter(GettextSettings::default());
        let messages = messages(&[(
            "Red",
            &[
                (r"project\app\core.php", 10),
                ("project/app core.php", 1248),
                ("project/app/core.php", 9),
            ],
        )]);
        let expected = format!(
            "{HEADER}
#: \u{2068}project/app core.php:1248\u{2069}
#: project/app/core.php:9
#: project/app/core.php:10
msgid \"Red\"
msgstr \"\"
"
        );
        assert_eq!(body(&formatter, &messages), expected);
    }

    #[test]
    fn test_duplicate_references_are_kept() {
        let formatter = formatter(GettextSettings::default());
        let messages = messages(&[("Red", &[("a.php", 1), ("a.php", 1)])]);
        assert_eq!(
            body(&formatter, &messages),
            format!("{HEADER}\n#: a.php:1\n#: a.php:1\nmsgid \"Red\"\nmsgstr \"\"\n")
        );
    }

    #[test]
    fn test_path_only_references() {
        let formatter = formatter(GettextSettings::default());
        let mut messages = MessageMap::new();
        messages.record("Kiwi", Occurrence::file("./config/enums.neon"));
        assert_eq!(
            body(&formatter, &messages),
            format!("{HEADER}\n#: ./config/enums.neon\nmsgid \"Kiwi\"\nmsgstr \"\"\n")
        );
    }

    #[test]
    fn test_without_references() {
        let formatter = formatter(GettextSettings {
            line_numbers: false,
            ..Default::default()
        });
        let messages = messages(&[(
            "Red",
            &[(r"project\app\core.php", 10), ("project/app core.php", 1248)],
        )]);
        assert_eq!(
            body(&formatter, &messages),
            format!("{HEADER}\nmsgid \"Red\"\nmsgstr \"\"\n")
        );
    }

    #[test]
    fn test_multiline_and_quotes() {
        let formatter = formatter(GettextSettings::default());
        let messages = messages(&[
            ("Some long\ntranslation string", &[(r"project/app\core.php", 12)]),
            ("Say \"hi\"", &[("a.php", 1)]),
        ]);
        let expected = format!(
            "{HEADER}
#: a.php:1
msgid \"Say \\\"hi\\\"\"
msgstr \"\"

#: project/app/core.php:12
msgid \"Some long\\n\"
\"translation string\"
msgstr \"\"
"
        );
        assert_eq!(body(&formatter, &messages), expected);
    }

    #[test]
    fn test_extra_meta() {
        let extra_meta = serde_json::json!({
            "Language": "cs_CZ",
            "Plural-Forms": "nplurals=3; plural=(n==1) ? 0 : (n>=2 && n<=4) ? 1 : 2;",
        });
        let formatter = formatter(GettextSettings {
            extra_meta: extra_meta.as_object().unwrap().clone(),
            ..Default::default()
        });
        let expected = "msgid \"\"
msgstr \"\"
\"Content-Type: text/plain; charset=UTF-8\\n\"
\"Plural-Forms: nplurals=3; plural=(n==1) ? 0 : (n>=2 && n<=4) ? 1 : 2;\\n\"
\"Language: cs_CZ\\n\"
";
        assert_eq!(body(&formatter, &MessageMap::new()), expected);
        assert_eq!(formatter.meta().len(), 3);
    }

    #[test]
    fn test_non_string_meta_is_rejected() {
        let extra_meta = serde_json::json!({ "X-Count": 3 });
        let result = GettextFormatter::new(GettextSettings {
            extra_meta: extra_meta.as_object().unwrap().clone(),
            ..Default::default()
        });
        assert!(matches!(result, Err(ConfigError::InvalidMetaValue(key)) if key == "X-Count"));
    }

    #[test]
    fn test_format_is_repeatable() {
        let formatter = formatter(GettextSettings::default());
        let messages = messages(&[("Hello", &[("a.php", 1)])]);
        assert_eq!(formatter.format(&messages), formatter.format(&messages));
    }
}
