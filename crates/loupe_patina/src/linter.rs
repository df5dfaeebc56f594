//! Main linter entry point.

use crate::config::{ConfigError, LintConfig};
use crate::context::LintContext;
use crate::diagnostic::{LintDiagnostic, LintSummary};
use crate::rule::{Rule, RuleRegistry, ScriptProgram};
use loupe_armature::{parse_sfc, parse_template, SfcBlock};
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use rustc_hash::FxHashSet;

/// Lint result for a single file
#[derive(Debug, Clone)]
pub struct LintResult {
    /// Filename that was linted
    pub filename: String,
    /// Collected diagnostics
    pub diagnostics: Vec<LintDiagnostic>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
}

impl LintResult {
    fn empty(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
        }
    }

    /// Check if there are any errors
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any diagnostics
    #[inline]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Main linter struct.
///
/// A linter never fails on a file: malformed blocks are logged and analysis
/// continues with whatever could be parsed.
pub struct Linter {
    registry: RuleRegistry,
    /// Optional set of enabled rule names (if None, all rules are enabled)
    enabled_rules: Option<FxHashSet<String>>,
}

impl Linter {
    /// Create a new linter with recommended rules
    #[inline]
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::with_recommended())
    }

    /// Create a linter with a custom rule registry
    #[inline]
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            enabled_rules: None,
        }
    }

    /// Create a linter from configuration
    pub fn with_config(config: &LintConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_registry(config.build_registry()?))
    }

    /// Set enabled rules (if None, all rules are enabled)
    ///
    /// Pass a list of rule names to enable only those rules.
    /// Rules not in the list will be skipped during linting.
    #[inline]
    pub fn with_enabled_rules(mut self, rules: Option<Vec<String>>) -> Self {
        self.enabled_rules = rules.map(|r| r.into_iter().collect());
        self
    }

    /// Check if a rule is enabled
    #[inline]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        match &self.enabled_rules {
            Some(set) => set.contains(rule_name),
            None => true,
        }
    }

    /// Get the rule registry
    #[inline]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Get all registered rules
    #[inline]
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        self.registry.rules()
    }

    /// Lint a Vue SFC
    pub fn lint_sfc(&self, source: &str, filename: &str) -> LintResult {
        let descriptor = match parse_sfc(source) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                tracing::warn!("{}: cannot split SFC: {}", filename, err);
                return LintResult::empty(filename);
            }
        };
        tracing::debug!(
            "{}: template={} script={} script_setup={}",
            filename,
            descriptor.template.is_some(),
            descriptor.script.is_some(),
            descriptor.script_setup.is_some()
        );

        let mut ctx = LintContext::new(source, filename);

        let template = descriptor
            .template
            .as_ref()
            .filter(|block| match block.lang() {
                Some(lang) if !lang.eq_ignore_ascii_case("html") => {
                    tracing::debug!("{}: skipping <template lang=\"{}\">", filename, lang);
                    false
                }
                _ => true,
            })
            .map(|block| {
                let (root, errors) =
                    parse_template(block.content, block.start, ctx.line_index());
                for err in &errors {
                    tracing::debug!("{}: template error at {}: {}", filename, err.offset(), err);
                }
                root
            });

        let allocator = Allocator::default();
        let parsed = descriptor.script.as_ref().map(|block| {
            let ret = Parser::new(&allocator, block.content, script_source_type(block)).parse();
            (block.start, ret)
        });
        let script = match &parsed {
            Some((_, ret)) if ret.panicked => {
                tracing::warn!("{}: cannot parse <script>", filename);
                None
            }
            Some((offset, ret)) => {
                if !ret.errors.is_empty() {
                    tracing::debug!("{}: <script> has {} syntax errors", filename, ret.errors.len());
                }
                Some(ScriptProgram {
                    program: &ret.program,
                    offset: *offset,
                })
            }
            None => None,
        };

        for rule in self.registry.rules() {
            let name = rule.meta().name;
            if !self.is_rule_enabled(name) {
                continue;
            }
            ctx.enter_rule(name, self.registry.severity(name));
            rule.run_on_sfc(&mut ctx, template.as_ref(), script.as_ref());
        }

        let error_count = ctx.error_count();
        let warning_count = ctx.warning_count();
        let diagnostics = ctx.into_diagnostics();
        tracing::debug!("{}: {} diagnostics", filename, diagnostics.len());

        LintResult {
            filename: filename.to_string(),
            diagnostics,
            error_count,
            warning_count,
        }
    }

    /// Lint multiple files and aggregate results
    pub fn lint_files(&self, files: &[(String, String)]) -> (Vec<LintResult>, LintSummary) {
        let mut results = Vec::with_capacity(files.len());
        let mut summary = LintSummary::default();

        for (filename, source) in files {
            let result = self.lint_sfc(source, filename);
            summary.error_count += result.error_count;
            summary.warning_count += result.warning_count;
            results.push(result);
        }

        summary.file_count = files.len();
        (results, summary)
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

/// Source type for a `<script lang="...">` block
fn script_source_type(block: &SfcBlock<'_>) -> SourceType {
    let path = match block.lang() {
        Some("tsx") => "script.tsx",
        Some("jsx") => "script.jsx",
        Some("js") => "script.js",
        _ => "script.ts",
    };
    SourceType::from_path(path).unwrap_or_default()
}
