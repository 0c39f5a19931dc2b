//! PHP array output: a loadable file assigning the sorted messages to a variable.

use serde::{Deserialize, Serialize};

use super::OutputFormatter;
use crate::core::data::MessageMap;
use crate::core::utils::escape_for_quote;

pub const PREAMBLE: &str = "<?php declare(strict_types=1);";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    #[default]
    Spaces,
    Tabs,
}

impl Indent {
    pub fn as_str(self) -> &'static str {
        match self {
            Indent::Spaces => "    ",
            Indent::Tabs => "\t",
        }
    }
}

fn default_output_variable() -> String {
    "messages".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArrayFileSettings {
    #[serde(default = "default_output_variable")]
    pub output_variable: String,
    #[serde(default)]
    pub indent: Indent,
}

impl Default for ArrayFileSettings {
    fn default() -> Self {
        Self {
            output_variable: default_output_variable(),
            indent: Indent::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArrayFileFormatter {
    output_variable: String,
    indent: Indent,
}

impl ArrayFileFormatter {
    pub fn new(settings: ArrayFileSettings) -> Self {
        Self {
            output_variable: settings.output_variable,
            indent: settings.indent,
        }
    }
}

impl OutputFormatter for ArrayFileFormatter {
    fn name(&self) -> &'static str {
        "ArrayFile"
    }

    /// Occurrences are not part of the output.
    fn format(&self, messages: &MessageMap) -> String {
        let mut output = vec![
            PREAMBLE.to_string(),
            format!("${} = [", self.output_variable),
        ];
        output.extend(
            messages
                .keys()
                .filter(|message| !message.is_empty())
                .map(|message| {
                    format!("{}'{}',", self.indent.as_str(), escape_for_quote(message, '\''))
                }),
        );
        output.push("];".to_string());
        output.join("\n")
    }
}
