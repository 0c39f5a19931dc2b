//! Target orchestration.
//!
//! A [`Target`] is one named extraction job. Processing visits every candidate
//! file, runs the accepting extractors in configured order, merges their
//! results, rewrites paths relative to the project root and writes the
//! formatted output atomically.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use super::data::MessageMap;
use super::extract::{AnyExtractor, Extractor};
use super::file_scanner::{join_root, scan_files};
use super::format::{Formatter, OutputFormatter};
use super::utils::to_forward_slashes;
use crate::diagnostics::Diagnostic;

/// Marker replacing the project root in reported paths.
pub const RELATIVE_MARKER: &str = ".";

#[derive(Debug, Clone)]
pub struct Target {
    name: String,
    destination: PathBuf,
    project_root: PathBuf,
    sources: Vec<PathBuf>,
    files: Vec<PathBuf>,
    extractors: Vec<AnyExtractor>,
    formatter: Formatter,
}

/// A visited file and the extractors that accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedFile {
    /// Project-relative path (`./app/file.php`).
    pub path: String,
    pub extractors: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOutcome {
    Written,
    /// Stopped by an extraction error; nothing was written.
    Aborted,
    WriteFailed,
}

#[derive(Debug, Clone)]
pub struct TargetReport {
    pub name: String,
    pub destination: PathBuf,
    pub visited: Vec<VisitedFile>,
    pub message_count: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub outcome: TargetOutcome,
}

impl TargetReport {
    pub fn is_success(&self) -> bool {
        self.outcome == TargetOutcome::Written
    }
}

impl Target {
    /// Sources, files and a relative destination are resolved against `project_root`.
    pub fn new(
        name: impl Into<String>,
        destination: &str,
        project_root: &Path,
        sources: &[String],
        files: &[String],
        extractors: Vec<AnyExtractor>,
        formatter: Formatter,
    ) -> Self {
        Self {
            name: name.into(),
            destination: join_root(project_root, destination),
            project_root: project_root.to_path_buf(),
            sources: sources.iter().map(|s| join_root(project_root, s)).collect(),
            files: files.iter().map(|f| join_root(project_root, f)).collect(),
            extractors,
            formatter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn extractors(&self) -> &[AnyExtractor] {
        &self.extractors
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Rewrite `path` relative to the project root, with forward slashes.
    pub fn relative_path(&self, path: &str) -> String {
        let path = to_forward_slashes(path);
        let root = to_forward_slashes(&self.project_root.to_string_lossy());
        match path.strip_prefix(root.as_str()) {
            Some(rest) if !root.is_empty() && (rest.is_empty() || rest.starts_with('/')) => {
                format!("{RELATIVE_MARKER}{rest}")
            }
            _ => path,
        }
    }

    /// Extract from every candidate file and merge the results.
    ///
    /// Stops at the first extraction error: later files are never visited.
    pub fn collect(&self) -> Collected {
        let scan = scan_files(&self.sources, &self.files);
        let mut collected = Collected {
            diagnostics: scan.diagnostics,
            ..Default::default()
        };
        let root = self.project_root.to_string_lossy();

        for file in scan.files {
            let path = file.to_string_lossy();
            let accepting: Vec<&AnyExtractor> = self
                .extractors
                .iter()
                .filter(|extractor| extractor.accepts(&path))
                .collect();
            collected.visited.push(VisitedFile {
                path: self.relative_path(&path),
                extractors: accepting.iter().map(|extractor| extractor.name()).collect(),
            });
            if accepting.is_empty() {
                continue;
            }

            let content = match fs::read(&file) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    collected.diagnostics.push(Diagnostic::UnreadableFile {
                        path: file.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            for extractor in accepting {
                match extractor.extract(&path, &content, Some(root.as_ref())) {
                    Ok(messages) => collected.messages.merge(messages),
                    Err(error) => {
                        collected.diagnostics.push(Diagnostic::Aborted {
                            target: self.name.clone(),
                            error,
                        });
                        collected.aborted = true;
                        return collected;
                    }
                }
            }
        }

        collected.messages = collected
            .messages
            .map_paths(|path| self.relative_path(path));
        collected
    }

    /// Run the whole job: collect, format and write the destination.
    pub fn process(&self) -> TargetReport {
        let collected = self.collect();
        let mut report = TargetReport {
            name: self.name.clone(),
            destination: self.destination.clone(),
            visited: collected.visited,
            message_count: collected.messages.len(),
            diagnostics: collected.diagnostics,
            outcome: TargetOutcome::Aborted,
        };
        if collected.aborted {
            return report;
        }

        let output = self.formatter.format(&collected.messages);
        match write_atomic(&self.destination, &output) {
            Ok(()) => report.outcome = TargetOutcome::Written,
            Err(e) => {
                report.diagnostics.push(Diagnostic::WriteFailed {
                    target: self.name.clone(),
                    destination: self.destination.clone(),
                    reason: e.to_string(),
                });
                report.outcome = TargetOutcome::WriteFailed;
            }
        }
        report
    }
}

/// Messages and bookkeeping of one collection pass.
#[derive(Debug, Default)]
pub struct Collected {
    /// Merged messages, paths already project-relative.
    pub messages: MessageMap,
    pub visited: Vec<VisitedFile>,
    pub diagnostics: Vec<Diagnostic>,
    pub aborted: bool,
}

/// Write through a temporary file in the destination directory so the
/// destination is either fully replaced or left untouched.
fn write_atomic(destination: &Path, content: &str) -> io::Result<()> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.persist(destination).map_err(|e| e.error)?;
    Ok(())
}
