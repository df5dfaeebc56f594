//! # loupe_patina
//!
//! Patina - The quality checker for Loupe.
//! Lints Vue Single File Components for component registrations that the
//! template never uses.
//!
//! ## Name Origin
//!
//! **Patina** is the layer that forms on bronze as it ages. It shows where a
//! piece has been handled and where it has been left alone, the way unused
//! registrations show which parts of a component nobody touches any more.
//!
//! ## Usage
//!
//! ```rust
//! use loupe_patina::{format_results, Linter, OutputFormat};
//!
//! let source = r#"<template><div /></template>
//! <script>
//! export default { components: { TheButton } }
//! </script>"#;
//!
//! let linter = Linter::new();
//! let result = linter.lint_sfc(source, "test.vue");
//! assert_eq!(result.warning_count, 1);
//!
//! let output = format_results(
//!     &[result],
//!     &[("test.vue".to_string(), source.to_string())],
//!     OutputFormat::Json,
//! );
//! assert!(output.contains("vue/no-unused-components"));
//! ```
//!
//! ## Rules
//!
//! ### Essential Rules
//! - `vue/no-unused-components` - Disallow registering components that are
//!   not used inside templates
//!
//! ## Pipeline
//!
//! - [`registration`] collects the `components` option of the default export
//! - [`usage`] collects tag names and static `is` values from the template
//! - [`reconcile`] matches both sides through [`naming::normalize`]
//! - the rule reports what is left over

mod config;
mod context;
mod diagnostic;
mod linter;
pub mod naming;
pub mod output;
pub mod reconcile;
pub mod registration;
mod rule;
pub mod rules;
pub mod usage;

pub use config::{ConfigError, LintConfig, RuleLevel, RuleSetting};
pub use context::LintContext;
pub use diagnostic::{Label, LintDiagnostic, LintSummary, Severity};
pub use linter::{LintResult, Linter};
pub use output::{format_results, format_summary, OutputFormat};
pub use reconcile::ComponentMatching;
pub use rule::{Rule, RuleCategory, RuleMeta, RuleRegistry, ScriptProgram};

/// Lint a Vue SFC with default rules
///
/// This is a convenience function for simple use cases.
/// For more control, use `Linter::new()` directly.
pub fn lint(source: &str, filename: &str) -> LintResult {
    Linter::new().lint_sfc(source, filename)
}
