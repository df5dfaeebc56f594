//! Naming convention utilities for Vue component names.
//!
//! This module provides:
//! - The canonical comparison key used to reconcile template tags with
//!   registered component names
//! - Case conversion (PascalCase, camelCase, kebab-case)
//! - Case validation

use compact_str::CompactString;

// =============================================================================
// Canonical Key
// =============================================================================

/// Convert any supported spelling of a component name to its canonical key.
///
/// `-` and `_` are word boundaries and are dropped, every character is
/// lower-cased. PascalCase, camelCase, kebab-case and snake_case spellings
/// of the same words share one key.
///
/// # Examples
/// ```
/// use loupe_patina::naming::normalize;
///
/// assert_eq!(normalize("TheButton"), "thebutton");
/// assert_eq!(normalize("the-Button"), "thebutton");
/// assert_eq!(normalize("the_button"), "thebutton");
/// ```
pub fn normalize(name: &str) -> CompactString {
    let mut key = CompactString::with_capacity(name.len());
    for c in name.chars() {
        if c == '-' || c == '_' {
            continue;
        }
        key.extend(c.to_lowercase());
    }
    key
}

// =============================================================================
// Conversions
// =============================================================================

/// Convert kebab-case, snake_case or camelCase to PascalCase
///
/// # Examples
/// ```
/// use loupe_patina::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("my-component"), "MyComponent");
/// assert_eq!(to_pascal_case("myComponent"), "MyComponent");
/// assert_eq!(to_pascal_case("MyComponent"), "MyComponent");
/// ```
pub fn to_pascal_case(s: &str) -> CompactString {
    let mut result = CompactString::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '-' || c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert kebab-case to camelCase (`my-component` -> `myComponent`)
pub fn camelize(s: &str) -> CompactString {
    let mut result = CompactString::with_capacity(s.len());
    let mut upper_next = false;

    for c in s.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert camelCase or PascalCase to kebab-case (`MyComponent` -> `my-component`)
pub fn hyphenate(s: &str) -> CompactString {
    let mut result = CompactString::with_capacity(s.len() + 4);

    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !result.ends_with('-') {
                result.push('-');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

// =============================================================================
// Validation Functions
// =============================================================================

/// Check if a string is in PascalCase format
///
/// Returns true if the string starts with an uppercase letter and contains
/// no dashes or underscores.
///
/// # Examples
/// ```
/// use loupe_patina::naming::is_pascal_case;
///
/// assert!(is_pascal_case("MyComponent"));
/// assert!(!is_pascal_case("myComponent")); // camelCase
/// assert!(!is_pascal_case("my-component")); // kebab-case
/// ```
#[inline]
pub fn is_pascal_case(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };

    first.is_uppercase() && !s.contains('-') && !s.contains('_')
}

/// Check if a string is in camelCase format
///
/// Returns true if the string starts with a lowercase letter and contains
/// no dashes or underscores. A single lowercase word (`button`) counts.
///
/// # Examples
/// ```
/// use loupe_patina::naming::is_camel_case;
///
/// assert!(is_camel_case("myComponent"));
/// assert!(!is_camel_case("MyComponent"));
/// assert!(!is_camel_case("my-component"));
/// ```
#[inline]
pub fn is_camel_case(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };

    first.is_lowercase() && !s.contains('-') && !s.contains('_')
}

/// Check if a name uses `_` as a word separator
#[inline]
pub fn is_snake_case_like(s: &str) -> bool {
    s.contains('_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_equivalent_spellings() {
        for name in [
            "TheButton",
            "theButton",
            "the-button",
            "The-button",
            "The-Button",
            "the-Button",
            "the_button",
            "THE_BUTTON",
        ] {
            assert_eq!(normalize(name).as_str(), "thebutton", "{name}");
        }
    }

    #[test]
    fn test_normalize_distinct_words() {
        assert_ne!(normalize("TheButton"), normalize("TheButtons"));
        assert_eq!(normalize("").as_str(), "");
        assert_eq!(normalize("--").as_str(), "");
    }

    #[test]
    fn test_normalize_unicode() {
        assert_eq!(normalize("Ärger-Knopf").as_str(), "ärgerknopf");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("my-component").as_str(), "MyComponent");
        assert_eq!(to_pascal_case("myComponent").as_str(), "MyComponent");
        assert_eq!(to_pascal_case("foo_bar").as_str(), "FooBar");
        assert_eq!(to_pascal_case("").as_str(), "");
    }

    #[test]
    fn test_camelize() {
        assert_eq!(camelize("my-component").as_str(), "myComponent");
        assert_eq!(camelize("foo-bar-baz").as_str(), "fooBarBaz");
        assert_eq!(camelize("foo").as_str(), "foo");
    }

    #[test]
    fn test_hyphenate() {
        assert_eq!(hyphenate("MyComponent").as_str(), "my-component");
        assert_eq!(hyphenate("myComponent").as_str(), "my-component");
        assert_eq!(hyphenate("the-Button").as_str(), "the-button");
        assert_eq!(hyphenate("foo").as_str(), "foo");
    }

    #[test]
    fn test_is_pascal_case() {
        assert!(is_pascal_case("MyComponent"));
        assert!(is_pascal_case("Foo"));
        assert!(!is_pascal_case("myComponent"));
        assert!(!is_pascal_case("My-Component"));
        assert!(!is_pascal_case("Next_Button"));
        assert!(!is_pascal_case(""));
    }

    #[test]
    fn test_is_camel_case() {
        assert!(is_camel_case("theButton"));
        assert!(is_camel_case("button"));
        assert!(!is_camel_case("TheButton"));
        assert!(!is_camel_case("the-button"));
        assert!(!is_camel_case("next_Button"));
        assert!(!is_camel_case(""));
    }

    #[test]
    fn test_is_snake_case_like() {
        assert!(is_snake_case_like("the_button"));
        assert!(is_snake_case_like("next_Button"));
        assert!(!is_snake_case_like("the-button"));
    }
}
