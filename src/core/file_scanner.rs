use std::path::{Component, Path, PathBuf};

use glob::glob;
use walkdir::WalkDir;

use crate::diagnostics::Diagnostic;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Join a configured entry onto the project root, dropping `.` components so
/// the joined path compares equal to `root/entry` spelled without them.
pub fn join_root(root: &Path, entry: &str) -> PathBuf {
    let relative: PathBuf = Path::new(entry)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    if relative.as_os_str().is_empty() {
        return root.to_path_buf();
    }
    root.join(relative)
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Candidate files in visiting order.
    pub files: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Enumerate candidates: every regular file under each source directory
/// (sorted by name for a stable order), then each explicit file.
///
/// Source entries containing wildcards expand to the matching directories.
pub fn scan_files(sources: &[PathBuf], files: &[PathBuf]) -> ScanResult {
    let mut result = ScanResult::default();

    let mut dirs_to_scan: Vec<PathBuf> = Vec::new();
    for source in sources {
        let pattern = source.to_string_lossy();
        if is_glob_pattern(&pattern) {
            match glob(&pattern) {
                Ok(entries) => {
                    dirs_to_scan.extend(entries.flatten().filter(|entry| entry.is_dir()));
                }
                Err(e) => result.diagnostics.push(Diagnostic::InvalidSource {
                    path: source.clone(),
                    reason: e.to_string(),
                }),
            }
        } else if source.is_dir() {
            dirs_to_scan.push(source.clone());
        } else {
            result.diagnostics.push(Diagnostic::InvalidSource {
                path: source.clone(),
                reason: "not a directory".to_string(),
            });
        }
    }

    for dir in dirs_to_scan {
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.diagnostics.push(Diagnostic::UnreadableFile {
                        path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.clone()),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            if entry.file_type().is_file() {
                result.files.push(entry.into_path());
            }
        }
    }

    result.files.extend(files.iter().cloned());
    result
}
