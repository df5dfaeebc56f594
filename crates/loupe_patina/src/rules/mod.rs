//! Lint rules for Vue.js SFC files.

pub mod vue;

use crate::config::ConfigError;
use crate::rule::Rule;

/// Rules enabled when no configuration mentions them
pub(crate) const RECOMMENDED: &[&str] = &["vue/no-unused-components"];

/// Build a rule by name from its JSON options
pub(crate) fn create_rule(
    name: &str,
    options: Option<&serde_json::Value>,
) -> Result<Box<dyn Rule>, ConfigError> {
    match name {
        "vue/no-unused-components" => Ok(Box::new(vue::NoUnusedComponents::from_options(
            options,
        )?)),
        _ => Err(ConfigError::UnknownRule(name.into())),
    }
}
