//! Lint configuration.
//!
//! Rules are configured the way eslint does it, by name with a level and
//! optional options:
//!
//! ```json
//! {
//!   "rules": {
//!     "vue/no-unused-components": ["error", { "ignorePatterns": ["Base"] }]
//!   }
//! }
//! ```

use crate::diagnostic::Severity;
use crate::rule::RuleRegistry;
use crate::rules::{create_rule, RECOMMENDED};
use compact_str::CompactString;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while reading lint configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid lint configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown rule `{0}`")]
    UnknownRule(CompactString),

    #[error("unknown output format `{0}` (expected `text` or `json`)")]
    UnknownFormat(CompactString),

    #[error("invalid options for `{rule}`: {source}")]
    InvalidOptions {
        rule: CompactString,
        #[source]
        source: serde_json::Error,
    },
}

/// Reporting level of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Off,
    Warn,
    Error,
}

impl RuleLevel {
    /// Severity of reported diagnostics, `None` when the rule is off
    #[inline]
    pub fn severity(self) -> Option<Severity> {
        match self {
            Self::Off => None,
            Self::Warn => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
        }
    }
}

/// Configuration of one rule: `"warn"` or `["warn", { ...options }]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    Level(RuleLevel),
    WithOptions(RuleLevel, serde_json::Value),
}

impl RuleSetting {
    #[inline]
    pub fn level(&self) -> RuleLevel {
        match self {
            Self::Level(level) | Self::WithOptions(level, _) => *level,
        }
    }

    #[inline]
    pub fn options(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Level(_) => None,
            Self::WithOptions(_, options) => Some(options),
        }
    }
}

/// Lint configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    pub rules: FxHashMap<String, RuleSetting>,
}

impl LintConfig {
    /// Parse configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the rule registry this configuration describes.
    ///
    /// Recommended rules not mentioned keep their defaults, configured rules
    /// report at their configured level and `"off"` rules are left out.
    pub fn build_registry(&self) -> Result<RuleRegistry, ConfigError> {
        let mut registry = RuleRegistry::new();

        for name in RECOMMENDED {
            if !self.rules.contains_key(*name) {
                registry.register(create_rule(name, None)?);
            }
        }

        let mut configured: Vec<_> = self.rules.iter().collect();
        configured.sort_unstable_by(|a, b| a.0.cmp(b.0));

        for (name, setting) in configured {
            // Options are validated even for disabled rules
            let rule = create_rule(name, setting.options())?;
            match setting.level().severity() {
                Some(severity) => registry.register_with_severity(rule, severity),
                None => tracing::debug!("rule `{}` is off", name),
            }
        }

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_recommended() {
        let registry = LintConfig::from_json("{}").unwrap().build_registry().unwrap();
        assert_eq!(registry.rules().len(), 1);
        assert_eq!(registry.severity("vue/no-unused-components"), None);
    }

    #[test]
    fn test_rule_level() {
        let config =
            LintConfig::from_json(r#"{ "rules": { "vue/no-unused-components": "error" } }"#)
                .unwrap();
        let registry = config.build_registry().unwrap();
        assert_eq!(registry.rules().len(), 1);
        assert_eq!(
            registry.severity("vue/no-unused-components"),
            Some(Severity::Error)
        );
    }

    #[test]
    fn test_rule_off() {
        let config =
            LintConfig::from_json(r#"{ "rules": { "vue/no-unused-components": "off" } }"#)
                .unwrap();
        assert!(config.build_registry().unwrap().rules().is_empty());
    }

    #[test]
    fn test_rule_with_options() {
        let config = LintConfig::from_json(
            r#"{ "rules": { "vue/no-unused-components": ["warn", { "matching": "canonical" }] } }"#,
        )
        .unwrap();
        let setting = &config.rules["vue/no-unused-components"];
        assert_eq!(setting.level(), RuleLevel::Warn);
        assert!(setting.options().is_some());
        assert_eq!(config.build_registry().unwrap().rules().len(), 1);
    }

    #[test]
    fn test_unknown_rule() {
        let config =
            LintConfig::from_json(r#"{ "rules": { "vue/no-such-rule": "warn" } }"#).unwrap();
        let err = config.build_registry().err().unwrap();
        assert!(matches!(err, ConfigError::UnknownRule(ref name) if name == "vue/no-such-rule"));
        assert_eq!(err.to_string(), "unknown rule `vue/no-such-rule`");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            LintConfig::from_json("{ rules: }"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            LintConfig::from_json(r#"{ "rules": { "vue/no-unused-components": "loud" } }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_options() {
        let config = LintConfig::from_json(
            r#"{ "rules": { "vue/no-unused-components": ["off", { "matching": "fuzzy" }] } }"#,
        )
        .unwrap();
        assert!(matches!(
            config.build_registry(),
            Err(ConfigError::InvalidOptions { .. })
        ));
    }
}
