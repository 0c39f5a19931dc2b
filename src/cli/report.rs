//! Report formatting and printing utilities.
//!
//! Progress goes to stdout, diagnostics to stderr. Separate from core logic
//! so the miner can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{Target, TargetOutcome, TargetReport, VisitedFile};
use crate::diagnostics::{Diagnostic, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub fn print_started(target: &Target) {
    println!("Processing target [{}]...", target.name());
}

/// Print the outcome of one target: the optional file listing, diagnostics
/// and the save line.
pub fn print_target(report: &TargetReport, list: bool, verbose: bool) {
    if list {
        print_visited_to(&report.visited, &mut io::stdout().lock());
    }
    print_diagnostics_to(&report.diagnostics, verbose, &mut io::stderr().lock());
    print_outcome_to(report, &mut io::stdout().lock());
}

/// Print visited files, one per line, with the accepting extractors aligned
/// in a column.
pub fn print_visited_to<W: Write>(visited: &[VisitedFile], writer: &mut W) {
    let width = visited
        .iter()
        .map(|file| UnicodeWidthStr::width(file.path.as_str()))
        .max()
        .unwrap_or(0);

    for file in visited {
        let padding = width - UnicodeWidthStr::width(file.path.as_str());
        let extractors = if file.extractors.is_empty() {
            "-".dimmed().to_string()
        } else {
            file.extractors
                .iter()
                .map(|name| format!("[ {} ]", name))
                .collect::<Vec<_>>()
                .join(" ")
        };
        let _ = writeln!(
            writer,
            "{}:{:padding$}  {}",
            file.path,
            "",
            extractors,
            padding = padding
        );
    }
}

/// Print errors, and warnings when verbose. Hidden warnings are summarized.
pub fn print_diagnostics_to<W: Write>(diagnostics: &[Diagnostic], verbose: bool, writer: &mut W) {
    let mut hidden = 0;
    for diagnostic in diagnostics {
        match diagnostic.severity() {
            Severity::Error => {
                let _ = writeln!(writer, "{} {}", "error:".bold().red(), diagnostic);
            }
            Severity::Warning if verbose => {
                let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), diagnostic);
            }
            Severity::Warning => hidden += 1,
        }
    }

    if hidden > 0 {
        let _ = writeln!(
            writer,
            "{} {} file(s) or source(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            hidden,
            "-v".cyan()
        );
    }
}

pub fn print_outcome_to<W: Write>(report: &TargetReport, writer: &mut W) {
    let status = match report.outcome {
        TargetOutcome::Written => "[ OK ]".green().to_string(),
        TargetOutcome::WriteFailed => "[ FAILED ] (permissions?)".red().to_string(),
        TargetOutcome::Aborted => {
            let _ = writeln!(
                writer,
                "{} target [{}] aborted, nothing saved",
                "error:".bold().red(),
                report.name
            );
            return;
        }
    };
    let _ = writeln!(
        writer,
        "Saving extracted string template into: {}      {}",
        report.destination.display(),
        status
    );
}
