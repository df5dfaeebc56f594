//! Reconciliation of registered components against template usages.
//!
//! The usage side is folded into hash sets once, then every registration is
//! a constant-time membership test.

use crate::naming::{is_camel_case, is_pascal_case, is_snake_case_like, normalize};
use crate::registration::RegisteredComponent;
use crate::usage::UsageSet;
use compact_str::CompactString;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// How a registration key is matched against template names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentMatching {
    /// PascalCase and camelCase keys match any usage with the same canonical
    /// key that does not use `_` separators. Other keys only match an
    /// identical spelling.
    #[default]
    Conventional,
    /// Any usage with the same canonical key is a match
    Canonical,
}

/// Lookup structure over the names used in a template
#[derive(Debug, Default)]
pub struct UsageIndex {
    /// Canonical keys of all usages
    canonical: FxHashSet<CompactString>,
    /// Canonical keys of usages spelled without `_`
    canonical_plain: FxHashSet<CompactString>,
    /// Names exactly as written
    raw: FxHashSet<CompactString>,
}

impl UsageIndex {
    pub fn new(usages: &UsageSet) -> Self {
        let mut index = Self::default();
        for usage in usages {
            let name = usage.name();
            let key = normalize(name);
            if !is_snake_case_like(name) {
                index.canonical_plain.insert(key.clone());
            }
            index.canonical.insert(key);
            index.raw.insert(CompactString::new(name));
        }
        index
    }

    /// Whether a component registered as `name` is referenced
    pub fn is_used(&self, name: &str, matching: ComponentMatching) -> bool {
        match matching {
            ComponentMatching::Canonical => self.canonical.contains(normalize(name).as_str()),
            ComponentMatching::Conventional if is_pascal_case(name) || is_camel_case(name) => {
                self.canonical_plain.contains(normalize(name).as_str())
            }
            ComponentMatching::Conventional => self.raw.contains(name),
        }
    }
}

/// Registrations that no usage refers to, in declaration order
pub fn reconcile<'r>(
    registrations: &'r [RegisteredComponent],
    usages: &UsageSet,
    matching: ComponentMatching,
) -> Vec<&'r RegisteredComponent> {
    if registrations.is_empty() {
        return Vec::new();
    }

    let index = UsageIndex::new(usages);
    registrations
        .iter()
        .filter(|component| !index.is_used(&component.name, matching))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use loupe_relief::Position;

    fn registered(name: &str) -> RegisteredComponent {
        RegisteredComponent {
            name: name.into(),
            identifier: None,
            start: 0,
            end: 0,
            key_start: 0,
            key_end: 0,
            loc: Position::new(0, 1, 1),
        }
    }

    fn usages(template: &str) -> UsageSet {
        let (root, _) = loupe_armature::parse(template);
        UsageSet::collect(&root)
    }

    fn unused(keys: &[&str], template: &str, matching: ComponentMatching) -> Vec<String> {
        let registrations: Vec<_> = keys.iter().map(|k| registered(k)).collect();
        reconcile(&registrations, &usages(template), matching)
            .into_iter()
            .map(|r| r.name.to_string())
            .collect()
    }

    #[test]
    fn test_pascal_key_matches_any_spelling() {
        for tag in [
            "TheButton",
            "theButton",
            "the-button",
            "The-button",
            "The-Button",
            "the-Button",
        ] {
            let template = format!("<div><{tag} /></div>");
            assert!(
                unused(&["TheButton"], &template, ComponentMatching::Conventional).is_empty(),
                "{tag}"
            );
            let template = format!(r#"<component is="{tag}" />"#);
            assert!(
                unused(&["TheButton"], &template, ComponentMatching::Conventional).is_empty(),
                "is={tag}"
            );
        }
    }

    #[test]
    fn test_snake_usage_does_not_match_pascal_key() {
        assert_eq!(
            unused(&["TheButton"], "<the_button />", ComponentMatching::Conventional),
            vec!["TheButton"]
        );
        assert!(unused(&["TheButton"], "<the_button />", ComponentMatching::Canonical).is_empty());
    }

    #[test]
    fn test_non_pascal_key_requires_exact_spelling() {
        assert!(unused(
            &["the-button", "next_Button"],
            "<div><the-button /><next_Button /></div>",
            ComponentMatching::Conventional
        )
        .is_empty());
        assert_eq!(
            unused(&["the-button"], "<TheButton />", ComponentMatching::Conventional),
            vec!["the-button"]
        );
        assert!(unused(&["the-button"], "<TheButton />", ComponentMatching::Canonical).is_empty());
    }

    #[test]
    fn test_camel_key_matches_any_plain_spelling() {
        for template in [
            "<the-button />",
            "<theButton />",
            "<TheButton />",
            r#"<component is="the-button" />"#,
        ] {
            assert!(
                unused(&["theButton"], template, ComponentMatching::Conventional).is_empty(),
                "{template}"
            );
        }
        assert_eq!(
            unused(&["theButton"], "<the_button />", ComponentMatching::Conventional),
            vec!["theButton"]
        );
    }

    #[test]
    fn test_declaration_order_kept() {
        assert_eq!(
            unused(
                &["Zeta", "Alpha", "Used", "Mid"],
                "<Used />",
                ComponentMatching::Conventional
            ),
            vec!["Zeta", "Alpha", "Mid"]
        );
    }

    #[test]
    fn test_no_registrations() {
        assert!(unused(&[], "<TheButton />", ComponentMatching::Conventional).is_empty());
    }
}
