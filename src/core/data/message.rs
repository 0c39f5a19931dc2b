//! Message and occurrence types shared by extractors, targets and formatters.

use std::{collections::BTreeMap, fmt};

/// Where a message was found: a file path and, when meaningful, a 1-based line.
///
/// Rendered as `path:line`, or just `path` for occurrences without a line
/// (values selected from structured documents).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Occurrence {
    pub path: String,
    pub line: Option<usize>,
}

impl Occurrence {
    pub fn new(path: impl Into<String>, line: usize) -> Self {
        Self {
            path: path.into(),
            line: Some(line),
        }
    }

    /// Occurrence that only names a file.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line: None,
        }
    }

    /// Same occurrence with its path rewritten by `f`.
    pub fn map_path(self, f: impl FnOnce(&str) -> String) -> Self {
        Self {
            path: f(&self.path),
            line: self.line,
        }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path, line),
            None => write!(f, "{}", self.path),
        }
    }
}

/// Extracted messages keyed by their exact text.
///
/// Keys iterate in byte-lexicographic order. Occurrence lists only grow:
/// recording or merging appends and never deduplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageMap {
    entries: BTreeMap<String, Vec<Occurrence>>,
}

impl MessageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `message`.
    pub fn record(&mut self, message: impl Into<String>, occurrence: Occurrence) {
        self.entries
            .entry(message.into())
            .or_default()
            .push(occurrence);
    }

    /// Append every occurrence list of `other` to this map.
    pub fn merge(&mut self, other: MessageMap) {
        for (message, occurrences) in other.entries {
            self.entries.entry(message).or_default().extend(occurrences);
        }
    }

    pub fn get(&self, message: &str) -> Option<&[Occurrence]> {
        self.entries.get(message).map(Vec::as_slice)
    }

    pub fn contains_key(&self, message: &str) -> bool {
        self.entries.contains_key(message)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Occurrence])> {
        self.entries
            .iter()
            .map(|(message, occurrences)| (message.as_str(), occurrences.as_slice()))
    }

    /// Rewrite the path of every occurrence.
    pub fn map_paths(self, f: impl Fn(&str) -> String) -> Self {
        let entries = self
            .entries
            .into_iter()
            .map(|(message, occurrences)| {
                let occurrences = occurrences
                    .into_iter()
                    .map(|occurrence| occurrence.map_path(&f))
                    .collect();
                (message, occurrences)
            })
            .collect();
        Self { entries }
    }
}

impl FromIterator<(String, Occurrence)> for MessageMap {
    fn from_iter<I: IntoIterator<Item = (String, Occurrence)>>(iter: I) -> Self {
        let mut map = MessageMap::new();
        for (message, occurrence) in iter {
            map.record(message, occurrence);
        }
        map
    }
}

impl<'a> IntoIterator for &'a MessageMap {
    type Item = (&'a String, &'a Vec<Occurrence>);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Vec<Occurrence>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
