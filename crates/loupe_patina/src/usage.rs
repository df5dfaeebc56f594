//! Component usage collection from a template tree.

use compact_str::CompactString;
use loupe_relief::{ElementNode, Position, RootNode};
use oxc_allocator::Allocator;
use oxc_ast::ast::Expression;
use oxc_parser::Parser;
use oxc_span::SourceType;

/// Prefix marking a native element rendered as a component (`is="vue:Foo"`)
const VUE_IS_PREFIX: &str = "vue:";

/// Tag of the dynamic component placeholder
const DYNAMIC_COMPONENT_TAG: &str = "component";

/// A reference to a component name in the template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentUsage {
    /// Tag name of an element (`<TheButton>`)
    Static { name: CompactString, loc: Position },
    /// Statically known `is` value (`<component is="TheButton">`)
    Dynamic { name: CompactString, loc: Position },
}

impl ComponentUsage {
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Self::Static { name, .. } | Self::Dynamic { name, .. } => name,
        }
    }

    #[inline]
    pub fn loc(&self) -> Position {
        match self {
            Self::Static { loc, .. } | Self::Dynamic { loc, .. } => *loc,
        }
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic { .. })
    }
}

/// All component usages of one template
#[derive(Debug, Default)]
pub struct UsageSet {
    usages: Vec<ComponentUsage>,
    has_unresolved_binding: bool,
}

impl UsageSet {
    /// Walk every element of the template in document order
    pub fn collect(root: &RootNode) -> Self {
        let mut set = Self::default();
        for element in root.elements() {
            // The `<component>` placeholder names no component by itself
            if element.tag != DYNAMIC_COMPONENT_TAG {
                set.usages.push(ComponentUsage::Static {
                    name: element.tag.clone(),
                    loc: element.loc.start,
                });
            }
            set.collect_dynamic(element);
        }
        tracing::trace!(
            "collected {} component usages ({} unresolved binding)",
            set.usages.len(),
            if set.has_unresolved_binding { "with" } else { "no" }
        );
        set
    }

    fn collect_dynamic(&mut self, element: &ElementNode) {
        if element.tag == DYNAMIC_COMPONENT_TAG {
            if let Some(attr) = element.attribute("is") {
                if let Some(value) = &attr.value {
                    let name = value
                        .content
                        .strip_prefix(VUE_IS_PREFIX)
                        .unwrap_or(value.content.as_str());
                    self.push_dynamic(name, value.loc.start);
                }
            }

            if let Some(dir) = element.directive("bind", Some("is")) {
                match dir.exp.as_ref().and_then(|exp| {
                    static_string_value(&exp.content).map(|name| (name, exp.loc.start))
                }) {
                    Some((name, loc)) => self.push_dynamic(&name, loc),
                    None => self.has_unresolved_binding = true,
                }
            }
            return;
        }

        if let Some(value) = element.attribute("is").and_then(|attr| attr.value.as_ref()) {
            if let Some(name) = value.content.strip_prefix(VUE_IS_PREFIX) {
                self.push_dynamic(name, value.loc.start);
            }
        }
    }

    fn push_dynamic(&mut self, name: &str, loc: Position) {
        if name.is_empty() {
            return;
        }
        self.usages.push(ComponentUsage::Dynamic {
            name: CompactString::new(name),
            loc,
        });
    }

    #[inline]
    pub fn usages(&self) -> &[ComponentUsage] {
        &self.usages
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, ComponentUsage> {
        self.usages.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.usages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }

    /// Whether a bound `is` could not be resolved to a name
    #[inline]
    pub fn has_unresolved_binding(&self) -> bool {
        self.has_unresolved_binding
    }
}

impl<'s> IntoIterator for &'s UsageSet {
    type Item = &'s ComponentUsage;
    type IntoIter = std::slice::Iter<'s, ComponentUsage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Value of a binding expression that is a single string literal
/// (`'TheButton'`, `"TheButton"` or an expression-free template literal)
fn static_string_value(expression: &str) -> Option<CompactString> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path("expr.ts").unwrap_or_default();

    let expr = Parser::new(&allocator, expression, source_type)
        .parse_expression()
        .ok()?;

    match &expr {
        Expression::StringLiteral(lit) => Some(CompactString::new(lit.value.as_str())),
        Expression::TemplateLiteral(tpl) if tpl.expressions.is_empty() => tpl
            .quasis
            .first()
            .and_then(|quasi| quasi.value.cooked.as_ref())
            .map(|cooked| CompactString::new(cooked.as_str())),
        _ => None,
    }
}
