//! String and path helpers shared by extractors and formatters.

/// Convert backslashes to forward slashes.
pub fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Rewrite literal newlines into a catalog continuation (`\n"` + newline + `"`).
///
/// `"foo\nbar"` becomes `foo\n"` / `"bar`, so the `msgid` spans several
/// quoted lines the way gettext tools normalize them.
pub fn catalog_newlines(content: &str) -> String {
    content.replace('\n', "\\n\"\n\"")
}

/// Backslash-escape every occurrence of `quote` so the string can be wrapped in it.
pub fn escape_for_quote(value: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == quote {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 1-based line number of a byte offset, counting newlines before it.
///
/// Offsets past the end of `content` resolve to the last line.
pub fn offset_to_line(content: &str, offset: usize) -> usize {
    let end = offset.min(content.len());
    content.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Returns the quote character if `value` is wrapped in a matching pair of `'` or `"`.
fn wrapping_quote(value: &str) -> Option<char> {
    let bytes = value.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
    match first {
        b'\'' | b'"' if first == last => Some(first as char),
        _ => None,
    }
}

/// Strip a PHP-style string wrap and undo its quote escape.
///
/// Single-quoted literals turn `\'` into `'`, double-quoted ones turn `\"`
/// into `"`. Nothing else is unescaped.
pub fn unwrap_code_string(value: &str) -> String {
    match wrapping_quote(value) {
        Some('\'') => value[1..value.len() - 1].replace("\\'", "'"),
        Some('"') => value[1..value.len() - 1].replace("\\\"", "\""),
        _ => value.to_string(),
    }
}

/// Strip an SQL-style string wrap and collapse doubled quotes (`''` -> `'`).
pub fn unwrap_sql_string(value: &str) -> String {
    match wrapping_quote(value) {
        Some(quote) => {
            let doubled: String = [quote, quote].iter().collect();
            value[1..value.len() - 1].replace(&doubled, &quote.to_string())
        }
        None => value.to_string(),
    }
}
