//! Rule trait and registry for lint rules.

use crate::context::LintContext;
use crate::diagnostic::Severity;
use loupe_relief::RootNode;
use oxc_ast::ast::Program;
use rustc_hash::FxHashMap;

/// Rule category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Essential rules (vue/essential) - prevent errors
    Essential,
    /// Strongly recommended rules (vue/strongly-recommended)
    StronglyRecommended,
    /// Recommended rules (vue/recommended)
    Recommended,
}

/// Rule metadata
pub struct RuleMeta {
    /// Rule name (e.g., "vue/no-unused-components")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Rule category
    pub category: RuleCategory,
    /// Whether rule is auto-fixable
    pub fixable: bool,
    /// Default severity
    pub default_severity: Severity,
}

/// The `<script>` block of an SFC, parsed by oxc
pub struct ScriptProgram<'p, 'a> {
    pub program: &'p Program<'a>,
    /// Byte offset of the script content within the SFC
    pub offset: u32,
}

/// Rule trait for implementing lint rules
///
/// A rule sees one SFC at a time: its template tree (absent when the file has
/// no `<template>` block) and its parsed `<script>` (absent when there is no
/// such block or it could not be parsed).
pub trait Rule: Send + Sync {
    /// Get rule metadata
    fn meta(&self) -> &'static RuleMeta;

    /// Run once per SFC
    fn run_on_sfc(
        &self,
        ctx: &mut LintContext<'_>,
        template: Option<&RootNode>,
        script: Option<&ScriptProgram<'_, '_>>,
    );
}

/// Registry holding all enabled lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
    /// Configured severities overriding `RuleMeta::default_severity`
    severities: FxHashMap<&'static str, Severity>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            severities: FxHashMap::default(),
        }
    }

    /// Register a rule
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Register a rule reporting at a fixed severity
    pub fn register_with_severity(&mut self, rule: Box<dyn Rule>, severity: Severity) {
        self.severities.insert(rule.meta().name, severity);
        self.register(rule);
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Configured severity of a rule, if it differs from the rule default
    #[inline]
    pub fn severity(&self, rule_name: &str) -> Option<Severity> {
        self.severities.get(rule_name).copied()
    }

    /// Create registry with all built-in rules enabled
    pub fn with_recommended() -> Self {
        let mut registry = Self::new();

        // ============================================
        // Vue Essential Rules
        // ============================================

        registry.register(Box::new(
            crate::rules::vue::NoUnusedComponents::default(),
        ));

        registry
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_recommended()
    }
}
