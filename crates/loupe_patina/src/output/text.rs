//! Terminal output rendered through oxc_diagnostics.

use crate::diagnostic::{LintDiagnostic, Severity};
use crate::linter::LintResult;
use oxc_diagnostics::{GraphicalReportHandler, GraphicalTheme, NamedSource};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Format lint results for a terminal.
///
/// Each file with diagnostics gets a heading followed by its reports in
/// source order; a summary line closes the output. Files whose text is not
/// in `sources` fall back to one `file:line:column` line per diagnostic.
pub fn format_text(results: &[LintResult], sources: &[(String, String)]) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let sources: FxHashMap<&str, &str> = sources
        .iter()
        .map(|(f, s)| (f.as_str(), s.as_str()))
        .collect();

    let mut output = String::new();
    let (mut errors, mut warnings) = (0, 0);

    for result in results {
        errors += result.error_count;
        warnings += result.warning_count;
        if result.diagnostics.is_empty() {
            continue;
        }

        let mut ordered: Vec<&LintDiagnostic> = result.diagnostics.iter().collect();
        ordered.sort_by_key(|d| (d.start, d.end));

        output.push_str(&result.filename);
        output.push('\n');

        let Some(source) = sources.get(result.filename.as_str()) else {
            tracing::debug!("{}: no source text, printing locations only", result.filename);
            for d in ordered {
                output.push_str(&location_line(&result.filename, d));
            }
            output.push('\n');
            continue;
        };

        let named_source = Arc::new(NamedSource::new(&result.filename, source.to_string()));
        for d in ordered {
            let report = d
                .clone()
                .into_oxc_diagnostic()
                .with_source_code(Arc::clone(&named_source));
            if handler.render_report(&mut output, report.as_ref()).is_err() {
                output.push_str(&location_line(&result.filename, d));
            }
            output.push('\n');
        }
    }

    output.push_str(&format_summary(errors, warnings, results.len()));
    output.push('\n');
    output
}

/// `file:line:column  warning  message  rule`
fn location_line(filename: &str, d: &LintDiagnostic) -> String {
    let level = match d.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    format!(
        "  {}:{}:{}  {}  {}  {}\n",
        filename, d.line, d.column, level, d.message, d.rule_name
    )
}

/// Format the closing summary line
pub fn format_summary(error_count: usize, warning_count: usize, file_count: usize) -> String {
    let problems = error_count + warning_count;
    if problems == 0 {
        return format!("{} checked, no problems", counted(file_count, "file"));
    }
    format!(
        "{} ({}, {}) in {}",
        counted(problems, "problem"),
        counted(error_count, "error"),
        counted(warning_count, "warning"),
        counted(file_count, "file")
    )
}

#[inline]
fn counted(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
