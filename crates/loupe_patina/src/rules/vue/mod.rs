//! Vue-specific lint rules.
//!
//! These rules are compatible with eslint-plugin-vue's essential rule set.

// Essential rules
mod no_unused_components;

// Essential rules exports
pub use no_unused_components::{NoUnusedComponents, NoUnusedComponentsOptions};
