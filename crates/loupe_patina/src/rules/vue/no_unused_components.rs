//! vue/no-unused-components
//!
//! Disallow registering components that are not used inside templates.
//!
//! A registration is used when a template tag, or a statically known `is`
//! value of `<component>`, refers to it under any spelling Vue resolves to
//! the same component (`TheButton`, `theButton`, `the-button`, ...).
//!
//! ## Examples
//!
//! ### Invalid
//! ```vue
//! <template>
//!   <div>Hello</div>
//! </template>
//!
//! <script>
//! export default {
//!   components: { TheButton }  // registered but never used
//! }
//! </script>
//! ```
//!
//! ### Valid
//! ```vue
//! <template>
//!   <the-button>Click me</the-button>
//! </template>
//!
//! <script>
//! export default {
//!   components: { TheButton }
//! }
//! </script>
//! ```
//!
//! ## Options
//!
//! - `matching`: `"conventional"` (default) or `"canonical"`, see
//!   [`ComponentMatching`]
//! - `ignoreWhenBindingPresent`: skip the file when `<component :is>` is
//!   bound to something that is not a string literal
//! - `ignorePatterns`: name prefixes that are never reported

use crate::config::ConfigError;
use crate::context::LintContext;
use crate::diagnostic::{LintDiagnostic, Severity};
use crate::naming::{hyphenate, is_pascal_case};
use crate::reconcile::{reconcile, ComponentMatching};
use crate::registration::{OptionsApiRegistrations, RegistrationSource};
use crate::rule::{Rule, RuleCategory, RuleMeta, ScriptProgram};
use crate::usage::UsageSet;
use compact_str::CompactString;
use loupe_relief::RootNode;
use serde::Deserialize;

static META: RuleMeta = RuleMeta {
    name: "vue/no-unused-components",
    description: "Disallow registering components that are not used inside templates",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Warning,
};

/// Options for [`NoUnusedComponents`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct NoUnusedComponentsOptions {
    pub matching: ComponentMatching,
    pub ignore_when_binding_present: bool,
    pub ignore_patterns: Vec<CompactString>,
}

/// Disallow unused components
#[derive(Debug, Default)]
pub struct NoUnusedComponents {
    pub options: NoUnusedComponentsOptions,
}

impl NoUnusedComponents {
    pub fn new(options: NoUnusedComponentsOptions) -> Self {
        Self { options }
    }

    /// Build the rule from its JSON options
    pub fn from_options(options: Option<&serde_json::Value>) -> Result<Self, ConfigError> {
        let Some(value) = options else {
            return Ok(Self::default());
        };
        let options = NoUnusedComponentsOptions::deserialize(value).map_err(|source| {
            ConfigError::InvalidOptions {
                rule: META.name.into(),
                source,
            }
        })?;
        Ok(Self::new(options))
    }

    /// Check if a component name should be ignored
    fn should_ignore(&self, name: &str) -> bool {
        self.options
            .ignore_patterns
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }
}

impl Rule for NoUnusedComponents {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn run_on_sfc(
        &self,
        ctx: &mut LintContext<'_>,
        template: Option<&RootNode>,
        script: Option<&ScriptProgram<'_, '_>>,
    ) {
        let Some(script) = script else {
            return;
        };

        let source = OptionsApiRegistrations::new(script.program, script.offset, ctx.line_index());

        // Components rendered by a render function have no template to check
        let Some(root) = template else {
            if source.has_render_function() {
                tracing::trace!("{}: render function without template", ctx.filename);
            }
            return;
        };

        let registrations = source.registrations();
        if registrations.is_empty() {
            return;
        }

        let usages = UsageSet::collect(root);
        if self.options.ignore_when_binding_present && usages.has_unresolved_binding() {
            tracing::debug!(
                "{}: dynamic `is` binding present, skipping unused component check",
                ctx.filename
            );
            return;
        }

        for component in reconcile(&registrations, &usages, self.options.matching) {
            if self.should_ignore(&component.name) {
                continue;
            }

            let help = if is_pascal_case(&component.name) {
                format!(
                    "Use it in the template as `<{}>` or `<{}>`, or remove the registration",
                    component.name,
                    hyphenate(&component.name)
                )
            } else {
                format!(
                    "Use it in the template as `<{}>`, or remove the registration",
                    component.name
                )
            };

            ctx.report(
                LintDiagnostic::warn(
                    ctx.current_rule,
                    format!(
                        "The \"{}\" component has been registered but not used.",
                        component.name
                    ),
                    component.start,
                    component.end,
                )
                .with_help(help)
                .with_label("registered here", component.key_start, component.key_end),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta() {
        let rule = NoUnusedComponents::default();
        assert_eq!(rule.meta().name, "vue/no-unused-components");
        assert_eq!(rule.meta().category, RuleCategory::Essential);
        assert_eq!(rule.meta().default_severity, Severity::Warning);
    }

    #[test]
    fn test_should_ignore() {
        let rule = NoUnusedComponents::new(NoUnusedComponentsOptions {
            ignore_patterns: vec!["Base".into(), "lazy-".into()],
            ..Default::default()
        });
        assert!(rule.should_ignore("BaseButton"));
        assert!(rule.should_ignore("lazy-chart"));
        assert!(!rule.should_ignore("TheButton"));
        assert!(!NoUnusedComponents::default().should_ignore("_Internal"));
    }

    #[test]
    fn test_from_options() {
        let value = serde_json::json!({
            "matching": "canonical",
            "ignoreWhenBindingPresent": true,
            "ignorePatterns": ["Base"]
        });
        let rule = NoUnusedComponents::from_options(Some(&value)).unwrap();
        assert_eq!(rule.options.matching, ComponentMatching::Canonical);
        assert!(rule.options.ignore_when_binding_present);
        assert_eq!(rule.options.ignore_patterns, vec![CompactString::new("Base")]);

        let rule = NoUnusedComponents::from_options(None).unwrap();
        assert_eq!(rule.options, NoUnusedComponentsOptions::default());
    }

    #[test]
    fn test_from_options_rejects_unknown_fields() {
        let value = serde_json::json!({ "ignorePattern": "Base" });
        let err = NoUnusedComponents::from_options(Some(&value)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOptions { .. }));
    }
}
