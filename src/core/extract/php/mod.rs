//! Extraction of translation calls from PHP sources.
//!
//! Walks the token stream with a small state machine looking for
//! `->name(` / `::name(` calls whose name is in the configured function table,
//! and takes the string literal at the configured argument position. A
//! `/*gettext-miner*/` comment forces extraction of the next string literal.
//!
//! Arguments are counted by top-level commas only; nested calls and arrays are
//! not tracked, so a literal inside a nested expression may be picked up at the
//! wrong position.

pub mod lexer;

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{Extensions, Extractor};
use crate::core::data::{MessageMap, Occurrence};
use crate::core::utils::unwrap_code_string;
use crate::error::{ConfigError, ExtractError};
use lexer::{Token, TokenKind, tokenize};

/// Comment that forces extraction of the next string literal.
pub const EXPLICIT_TAG: &str = "/*gettext-miner*/";

/// Function names translated at argument position 1 by default.
pub const DEFAULT_FUNCTIONS: &[(&str, u32)] = &[("translate", 1), ("_", 1)];

/// Form helpers of the Nette framework that translate one of their arguments.
pub const NETTE_FUNCTIONS: &[(&str, u32)] = &[
    ("setText", 1),
    ("setEmptyValue", 1),
    ("setValue", 1),
    ("addButton", 2),
    ("addCheckbox", 2),
    ("addCheckboxList", 2),
    ("addError", 1),
    ("addUpload", 2),
    ("addMultiUpload", 2),
    ("addGroup", 1),
    ("addImage", 2),
    ("addPassword", 2),
    ("addProxy", 2),
    ("addRadioList", 2),
    ("addRule", 2),
    ("addSelect", 2),
    ("addMultiSelect", 2),
    ("addSubmit", 2),
    ("addText", 2),
    ("addTextArea", 2),
    ("addDatePicker", 2),
    ("setPrompt", 1),
    ("setRequired", 1),
];

pub const DEFAULT_EXTENSIONS: &[&str] = &[".php"];

/// Raw settings of the PHP and Nette extractors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PhpSettings {
    /// Replaces the default function table.
    pub functions: Option<BTreeMap<String, u32>>,
    /// Added on top of the (default or replaced) function table.
    #[serde(default)]
    pub extra_functions: BTreeMap<String, u32>,
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Looking for `->` or `::`.
    Start,
    /// Member access seen, expecting a function name.
    AwaitName,
    /// Known function name seen, expecting `(`.
    NameMatched,
    /// Inside the argument list, skipping to the wanted argument.
    SeekArg,
    /// Literal found at the wanted position, it must end the argument.
    ConfirmArg,
    /// Explicit tag seen, taking the next literal.
    ExtractNextString,
}

/// Lexical extractor for PHP sources.
#[derive(Debug, Clone)]
pub struct PhpExtractor {
    name: &'static str,
    functions: BTreeMap<String, u32>,
    extensions: Extensions,
}

impl PhpExtractor {
    /// Fails when a function is mapped to argument position 0.
    pub fn new(settings: PhpSettings) -> Result<Self, ConfigError> {
        Self::with_defaults("PHP", DEFAULT_FUNCTIONS, settings)
    }

    /// PHP extractor whose default table also covers the Nette form helpers.
    pub fn nette(settings: PhpSettings) -> Result<Self, ConfigError> {
        let defaults: Vec<(&str, u32)> = DEFAULT_FUNCTIONS
            .iter()
            .chain(NETTE_FUNCTIONS)
            .copied()
            .collect();
        Self::with_defaults("Nette", &defaults, settings)
    }

    /// Function table is `settings.functions` or `defaults`, then the extra functions.
    fn with_defaults(
        name: &'static str,
        defaults: &[(&str, u32)],
        settings: PhpSettings,
    ) -> Result<Self, ConfigError> {
        let mut functions = settings.functions.unwrap_or_else(|| {
            defaults
                .iter()
                .map(|(name, position)| (name.to_string(), *position))
                .collect()
        });
        functions.extend(settings.extra_functions);

        if let Some((name, position)) = functions.iter().find(|(_, position)| **position == 0) {
            return Err(ConfigError::InvalidArgumentPosition {
                name: name.clone(),
                position: *position,
            });
        }

        Ok(Self {
            name,
            functions,
            extensions: Extensions::new(settings.extensions, DEFAULT_EXTENSIONS),
        })
    }

    pub fn functions(&self) -> &BTreeMap<String, u32> {
        &self.functions
    }

    fn extract_tokens(&self, path: &str, tokens: &[Token<'_>]) -> MessageMap {
        let mut messages = MessageMap::new();
        let mut state = State::Start;
        let mut remaining_commas = 0u32;
        let mut candidate: Option<Token<'_>> = None;

        for token in tokens {
            if token.kind == TokenKind::Comment && token.text == EXPLICIT_TAG {
                state = State::ExtractNextString;
                continue;
            }
            if token.is_trivia() {
                continue;
            }

            state = match state {
                State::Start => match token.kind {
                    TokenKind::ObjectOperator | TokenKind::DoubleColon => State::AwaitName,
                    _ => State::Start,
                },
                State::AwaitName => match self.functions.get(token.text) {
                    Some(position) if token.kind == TokenKind::Identifier => {
                        remaining_commas = position - 1;
                        State::NameMatched
                    }
                    _ => State::Start,
                },
                State::NameMatched => match token.kind {
                    TokenKind::Punct('(') => State::SeekArg,
                    _ => State::Start,
                },
                State::SeekArg if remaining_commas > 0 => {
                    if token.kind == TokenKind::Punct(',') {
                        remaining_commas -= 1;
                    }
                    State::SeekArg
                }
                State::SeekArg => match token.kind {
                    TokenKind::ConstantString => {
                        candidate = Some(*token);
                        State::ConfirmArg
                    }
                    _ => State::Start,
                },
                State::ConfirmArg => {
                    if matches!(token.kind, TokenKind::Punct(',' | ')'))
                        && let Some(literal) = candidate.take()
                    {
                        messages.record(
                            unwrap_code_string(literal.text),
                            Occurrence::new(path, literal.line),
                        );
                    }
                    candidate = None;
                    State::Start
                }
                State::ExtractNextString => match token.kind {
                    TokenKind::ConstantString => {
                        messages.record(
                            unwrap_code_string(token.text),
                            Occurrence::new(path, token.line),
                        );
                        State::Start
                    }
                    _ => State::ExtractNextString,
                },
            };
        }

        messages
    }
}

impl Extractor for PhpExtractor {
    fn name(&self) -> &'static str {
        self.name
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
        let tokens = tokenize(content);
        Ok(self.extract_tokens(path, &tokens))
    }
}
