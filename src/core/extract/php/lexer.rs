//! Bounded lexical classification of PHP-like sources.
//!
//! This is not a parser. It splits the input into the token classes the
//! extraction state machine cares about (identifiers, constant string
//! literals, member-access operators, call punctuation and comments) and lumps
//! everything else into opaque tokens. Text outside `<?php` ... `?>` is inline
//! markup and never code.

/// Token classes produced by [`tokenize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Text outside of the code tags.
    InlineHtml,
    OpenTag,
    CloseTag,
    Whitespace,
    /// `//`, `#` and `/* */` comments.
    Comment,
    /// `/** */` comments.
    DocComment,
    Identifier,
    Variable,
    Number,
    /// Single- or double-quoted literal without interpolation.
    ConstantString,
    /// Double-quoted literal containing `$name` or `{$` interpolation, or an
    /// unterminated literal.
    InterpolatedString,
    /// Heredoc or nowdoc, including its body and closing marker.
    Heredoc,
    /// `->`
    ObjectOperator,
    /// `?->`
    NullsafeObjectOperator,
    /// `::`
    DoubleColon,
    /// `(`, `)` or `,`
    Punct(char),
    /// Any other operator or punctuation.
    Operator,
}

/// A classified slice of the source and the 1-based line it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub line: usize,
}

impl Token<'_> {
    /// Whitespace and comments carry no syntax.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::DocComment
        )
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_char(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Split `source` into tokens. Total: every byte of the input lands in exactly one token.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    in_code: bool,
    tokens: Vec<Token<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            in_code: false,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token<'a>> {
        while self.pos < self.bytes.len() {
            if self.in_code {
                self.lex_code();
            } else {
                self.lex_inline();
            }
        }
        self.tokens
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn starts_with(&self, needle: &str) -> bool {
        self.bytes[self.pos..].starts_with(needle.as_bytes())
    }

    fn push(&mut self, kind: TokenKind, end: usize) {
        let end = end.min(self.bytes.len());
        let text = &self.source[self.pos..end];
        self.tokens.push(Token {
            kind,
            text,
            line: self.line,
        });
        self.line += text.bytes().filter(|&b| b == b'\n').count();
        self.pos = end;
    }

    /// Length of the open tag at `at`, if one starts there.
    fn open_tag_len(&self, at: usize) -> Option<usize> {
        let rest = &self.bytes[at..];
        if rest.starts_with(b"<?=") {
            return Some(3);
        }
        if rest.len() >= 5 && rest[..5].eq_ignore_ascii_case(b"<?php") {
            return match rest.get(5) {
                None => Some(5),
                Some(&b) if is_space(b) => {
                    // The tag swallows one newline, like the reference lexer.
                    if b == b'\r' && rest.get(6) == Some(&b'\n') {
                        Some(7)
                    } else {
                        Some(6)
                    }
                }
                Some(_) => None,
            };
        }
        None
    }

    fn lex_inline(&mut self) {
        let mut at = self.pos;
        while at < self.bytes.len() {
            if self.bytes[at] == b'<'
                && let Some(len) = self.open_tag_len(at)
            {
                if at > self.pos {
                    self.push(TokenKind::InlineHtml, at);
                }
                self.push(TokenKind::OpenTag, at + len);
                self.in_code = true;
                return;
            }
            at += 1;
        }
        self.push(TokenKind::InlineHtml, self.bytes.len());
    }

    fn lex_code(&mut self) {
        let b = self.bytes[self.pos];

        if is_space(b) {
            let mut end = self.pos;
            while end < self.bytes.len() && is_space(self.bytes[end]) {
                end += 1;
            }
            self.push(TokenKind::Whitespace, end);
            return;
        }

        if self.starts_with("?>") {
            let mut end = self.pos + 2;
            if self.bytes.get(end) == Some(&b'\n') {
                end += 1;
            } else if self.bytes.get(end) == Some(&b'\r') && self.bytes.get(end + 1) == Some(&b'\n') {
                end += 2;
            }
            self.push(TokenKind::CloseTag, end);
            self.in_code = false;
            return;
        }

        match b {
            b'#' if self.peek(1) == Some(b'[') => self.push(TokenKind::Operator, self.pos + 2),
            b'#' => self.lex_line_comment(),
            b'/' if self.peek(1) == Some(b'/') => self.lex_line_comment(),
            b'/' if self.peek(1) == Some(b'*') => self.lex_block_comment(),
            b'\'' => self.lex_single_quoted(),
            b'"' => self.lex_double_quoted(),
            b'<' if self.starts_with("<<<") => self.lex_heredoc(),
            b'$' if self.peek(1).is_some_and(is_ident_start) => {
                let end = self.scan_ident(self.pos + 1);
                self.push(TokenKind::Variable, end);
            }
            b if is_ident_start(b) => {
                let end = self.scan_ident(self.pos);
                self.push(TokenKind::Identifier, end);
            }
            b if b.is_ascii_digit() => {
                let mut end = self.pos;
                while end < self.bytes.len()
                    && (self.bytes[end].is_ascii_alphanumeric() || matches!(self.bytes[end], b'_' | b'.'))
                {
                    end += 1;
                }
                self.push(TokenKind::Number, end);
            }
            b'-' if self.peek(1) == Some(b'>') => self.push(TokenKind::ObjectOperator, self.pos + 2),
            b'?' if self.starts_with("?->") => {
                self.push(TokenKind::NullsafeObjectOperator, self.pos + 3)
            }
            b':' if self.peek(1) == Some(b':') => self.push(TokenKind::DoubleColon, self.pos + 2),
            b'(' | b')' | b',' => self.push(TokenKind::Punct(b as char), self.pos + 1),
            _ => self.push(TokenKind::Operator, self.pos + 1),
        }
    }

    fn scan_ident(&self, from: usize) -> usize {
        let mut end = from;
        while end < self.bytes.len() && is_ident_char(self.bytes[end]) {
            end += 1;
        }
        end
    }

    /// `//` and `#` comments run to the end of the line or to a close tag.
    fn lex_line_comment(&mut self) {
        let mut end = self.pos;
        while end < self.bytes.len() {
            if self.bytes[end] == b'\n' || self.bytes[end..].starts_with(b"?>") {
                break;
            }
            end += 1;
        }
        self.push(TokenKind::Comment, end);
    }

    fn lex_block_comment(&mut self) {
        let is_doc = self.starts_with("/**") && self.peek(3).is_some_and(is_space);
        let end = match self.source[self.pos + 2..].find("*/") {
            Some(found) => self.pos + 2 + found + 2,
            None => self.bytes.len(),
        };
        let kind = if is_doc {
            TokenKind::DocComment
        } else {
            TokenKind::Comment
        };
        self.push(kind, end);
    }

    fn lex_single_quoted(&mut self) {
        let mut end = self.pos + 1;
        while end < self.bytes.len() {
            match self.bytes[end] {
                b'\\' => end += 2,
                b'\'' => {
                    self.push(TokenKind::ConstantString, end + 1);
                    return;
                }
                _ => end += 1,
            }
        }
        self.push(TokenKind::InterpolatedString, self.bytes.len());
    }

    fn lex_double_quoted(&mut self) {
        let mut end = self.pos + 1;
        let mut interpolated = false;
        while end < self.bytes.len() {
            match self.bytes[end] {
                b'\\' => end += 2,
                b'"' => {
                    let kind = if interpolated {
                        TokenKind::InterpolatedString
                    } else {
                        TokenKind::ConstantString
                    };
                    self.push(kind, end + 1);
                    return;
                }
                b'$' if self.bytes.get(end + 1).is_some_and(|&b| is_ident_start(b)) => {
                    interpolated = true;
                    end += 1;
                }
                b'{' if self.bytes.get(end + 1) == Some(&b'$') => {
                    interpolated = true;
                    end += 1;
                }
                _ => end += 1,
            }
        }
        self.push(TokenKind::InterpolatedString, self.bytes.len());
    }

    /// Heredoc and nowdoc: `<<<ID`, `<<<"ID"` or `<<<'ID'`, closed by `ID` at
    /// the start of a line (optionally indented).
    fn lex_heredoc(&mut self) {
        let mut at = self.pos + 3;
        while matches!(self.bytes.get(at), Some(b' ' | b'\t')) {
            at += 1;
        }
        let quote = match self.bytes.get(at) {
            Some(&q @ (b'\'' | b'"')) => {
                at += 1;
                Some(q)
            }
            _ => None,
        };
        let label_start = at;
        if !self.bytes.get(at).is_some_and(|&b| is_ident_start(b)) {
            self.push(TokenKind::Operator, self.pos + 3);
            return;
        }
        at = self.scan_ident(at);
        let label = &self.bytes[label_start..at];
        if let Some(q) = quote {
            if self.bytes.get(at) != Some(&q) {
                self.push(TokenKind::Operator, self.pos + 3);
                return;
            }
            at += 1;
        }
        if self.bytes.get(at) == Some(&b'\r') {
            at += 1;
        }
        if self.bytes.get(at) != Some(&b'\n') {
            self.push(TokenKind::Operator, self.pos + 3);
            return;
        }
        at += 1;

        let mut line_start = at;
        while line_start < self.bytes.len() {
            let mut cursor = line_start;
            while matches!(self.bytes.get(cursor), Some(b' ' | b'\t')) {
                cursor += 1;
            }
            if self.bytes[cursor..].starts_with(label)
                && !self
                    .bytes
                    .get(cursor + label.len())
                    .is_some_and(|&b| is_ident_char(b))
            {
                self.push(TokenKind::Heredoc, cursor + label.len());
                return;
            }
            match self.source[line_start..].find('\n') {
                Some(found) => line_start += found + 1,
                None => break,
            }
        }
        self.push(TokenKind::Heredoc, self.bytes.len());
    }
}
