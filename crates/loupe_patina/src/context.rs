//! Lint context for rule execution.

use crate::diagnostic::{LintDiagnostic, Severity};
use loupe_relief::LineIndex;

/// Lint context provides utilities for rules during execution.
///
/// It is the reporting sink for one SFC: rules push diagnostics with byte
/// offsets and the context resolves them to lines and columns.
pub struct LintContext<'a> {
    /// Source code being linted (the whole SFC)
    pub source: &'a str,
    /// Filename for diagnostics
    pub filename: &'a str,
    line_index: LineIndex<'a>,
    /// Collected diagnostics (pre-allocated capacity)
    diagnostics: Vec<LintDiagnostic>,
    /// Current rule name (set by the linter before running a rule)
    pub current_rule: &'static str,
    /// Configured severity for the current rule, overriding the rule default
    severity_override: Option<Severity>,
    /// Cached error count for fast access
    error_count: usize,
    /// Cached warning count for fast access
    warning_count: usize,
}

impl<'a> LintContext<'a> {
    /// Initial capacity for diagnostics vector
    const INITIAL_DIAGNOSTICS_CAPACITY: usize = 16;

    #[inline]
    pub fn new(source: &'a str, filename: &'a str) -> Self {
        Self {
            source,
            filename,
            line_index: LineIndex::new(source),
            diagnostics: Vec::with_capacity(Self::INITIAL_DIAGNOSTICS_CAPACITY),
            current_rule: "",
            severity_override: None,
            error_count: 0,
            warning_count: 0,
        }
    }

    /// Line index over the whole source
    #[inline]
    pub fn line_index(&self) -> &LineIndex<'a> {
        &self.line_index
    }

    /// Select the rule whose diagnostics follow
    #[inline]
    pub fn enter_rule(&mut self, name: &'static str, severity: Option<Severity>) {
        self.current_rule = name;
        self.severity_override = severity;
    }

    /// Report a lint diagnostic
    pub fn report(&mut self, mut diagnostic: LintDiagnostic) {
        if let Some(severity) = self.severity_override {
            diagnostic.severity = severity;
        }

        let start = self.line_index.position(diagnostic.start);
        let end = self.line_index.position(diagnostic.end);
        diagnostic.line = start.line;
        diagnostic.column = start.column;
        diagnostic.end_line = end.line;
        diagnostic.end_column = end.column;
        for label in &mut diagnostic.labels {
            let start = self.line_index.position(label.start);
            let end = self.line_index.position(label.end);
            label.line = start.line;
            label.column = start.column;
            label.end_line = end.line;
            label.end_column = end.column;
        }

        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    /// Get collected diagnostics
    #[inline]
    pub fn into_diagnostics(self) -> Vec<LintDiagnostic> {
        self.diagnostics
    }

    /// Get reference to collected diagnostics
    #[inline]
    pub fn diagnostics(&self) -> &[LintDiagnostic] {
        &self.diagnostics
    }

    /// Get the error count (cached, O(1))
    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Get the warning count (cached, O(1))
    #[inline]
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }
}
