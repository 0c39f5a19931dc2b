//! Output formatters.
//!
//! A formatter renders a finished [`MessageMap`] to the text written at a
//! target's destination. Messages are emitted in key order and the empty
//! message is always skipped.
//!
//! ## Module Structure
//!
//! - `gettext`: `.pot` catalog template with reference comments
//! - `array_file`: PHP source file assigning the messages to a variable

pub mod array_file;
pub mod gettext;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::core::data::MessageMap;

pub use array_file::{ArrayFileFormatter, ArrayFileSettings, Indent};
pub use gettext::{GettextFormatter, GettextSettings};

#[enum_dispatch]
pub trait OutputFormatter {
    fn name(&self) -> &'static str;

    /// Render `messages`. Pure: the same map always renders the same text.
    fn format(&self, messages: &MessageMap) -> String;
}

#[enum_dispatch(OutputFormatter)]
#[derive(Debug, Clone)]
pub enum Formatter {
    Gettext(GettextFormatter),
    ArrayFile(ArrayFileFormatter),
}

/// Formatter name as written in the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatterKind {
    #[default]
    Gettext,
    ArrayFile,
}
