//! Component registration collection.
//!
//! A [`RegistrationSource`] yields the components a file registers. The only
//! source implemented here is the `components` option of the default-exported
//! component options object:
//!
//! ```js
//! export default {
//!   components: {
//!     TheButton,                 // shorthand
//!     Header: AppHeader,         // identifier key
//!     'the-list': TheList,       // string key
//!     ['the-card']: TheCard,     // computed, statically known
//!   }
//! }
//! ```
//!
//! `defineComponent({ ... })` and `Vue.extend({ ... })` wrappers are looked
//! through, as are parentheses and TypeScript `as` / `satisfies`.

use compact_str::CompactString;
use loupe_relief::{LineIndex, Position};
use oxc_ast::ast::{
    Expression, ObjectExpression, ObjectProperty, ObjectPropertyKind, Program, PropertyKey,
    Statement,
};
use oxc_span::GetSpan;

/// A component registered under a key of the `components` option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredComponent {
    /// Key exactly as declared (`TheButton`, `the-button`, ...)
    pub name: CompactString,
    /// Identifier on the value side, when the value is a plain identifier
    pub identifier: Option<CompactString>,
    /// Start byte offset of the whole property in the SFC
    pub start: u32,
    /// End byte offset of the whole property in the SFC
    pub end: u32,
    /// Start byte offset of the key in the SFC
    pub key_start: u32,
    /// End byte offset of the key in the SFC
    pub key_end: u32,
    /// Position of the property start
    pub loc: Position,
}

/// Anything that can tell which components a file registers
pub trait RegistrationSource {
    /// Short name for logging
    fn source_name(&self) -> &'static str;

    /// Collect the registered components in declaration order
    fn registrations(&self) -> Vec<RegisteredComponent>;
}

/// Registrations from the `components` option of the default export
pub struct OptionsApiRegistrations<'p, 'a> {
    options: Option<&'p ObjectExpression<'a>>,
    /// Offset of the script content within the SFC
    base: u32,
    index: &'p LineIndex<'p>,
}

impl<'p, 'a> OptionsApiRegistrations<'p, 'a> {
    /// `base` is the offset of the script block content in the SFC and
    /// `index` indexes the whole SFC source
    pub fn new(program: &'p Program<'a>, base: u32, index: &'p LineIndex<'p>) -> Self {
        Self {
            options: find_component_options(program),
            base,
            index,
        }
    }

    /// Whether the script default-exports a component options object
    #[inline]
    pub fn has_options(&self) -> bool {
        self.options.is_some()
    }

    /// Whether the options object defines a `render` function
    pub fn has_render_function(&self) -> bool {
        self.options
            .and_then(|options| find_property(options, "render"))
            .is_some_and(|prop| {
                prop.method
                    || matches!(
                        prop.value,
                        Expression::FunctionExpression(_) | Expression::ArrowFunctionExpression(_)
                    )
            })
    }

    fn create_component(
        &self,
        prop: &ObjectProperty<'a>,
        name: &str,
    ) -> RegisteredComponent {
        let identifier = match &prop.value {
            Expression::Identifier(id) => Some(CompactString::new(id.name.as_str())),
            _ => None,
        };
        let key_span = prop.key.span();
        let start = self.base + prop.span.start;

        RegisteredComponent {
            name: CompactString::new(name),
            identifier,
            start,
            end: self.base + prop.span.end,
            key_start: self.base + key_span.start,
            key_end: self.base + key_span.end,
            loc: self.index.position(start),
        }
    }
}

impl RegistrationSource for OptionsApiRegistrations<'_, '_> {
    fn source_name(&self) -> &'static str {
        "options-api"
    }

    fn registrations(&self) -> Vec<RegisteredComponent> {
        let Some(components) = self
            .options
            .and_then(|options| find_property(options, "components"))
        else {
            return Vec::new();
        };

        let Some(object) = object_literal(&components.value) else {
            tracing::trace!("`components` option is not an object literal");
            return Vec::new();
        };

        let mut registered = Vec::with_capacity(object.properties.len());
        for prop in object.properties.iter() {
            match prop {
                ObjectPropertyKind::ObjectProperty(p) => match static_key_name(p) {
                    Some(name) => registered.push(self.create_component(p, name)),
                    None => tracing::trace!("skipping component with a dynamic key"),
                },
                ObjectPropertyKind::SpreadProperty(_) => {
                    tracing::trace!("skipping spread in `components`")
                }
            }
        }
        registered
    }
}

/// Find the component options object of `export default ...`
fn find_component_options<'p, 'a>(program: &'p Program<'a>) -> Option<&'p ObjectExpression<'a>> {
    program.body.iter().find_map(|stmt| match stmt {
        Statement::ExportDefaultDeclaration(decl) => {
            decl.declaration.as_expression().and_then(options_object)
        }
        _ => None,
    })
}

/// Look through wrappers down to the options object literal
fn options_object<'p, 'a>(expr: &'p Expression<'a>) -> Option<&'p ObjectExpression<'a>> {
    match expr {
        Expression::ObjectExpression(object) => Some(&**object),
        Expression::ParenthesizedExpression(paren) => options_object(&paren.expression),
        Expression::TSAsExpression(ts) => options_object(&ts.expression),
        Expression::TSSatisfiesExpression(ts) => options_object(&ts.expression),
        Expression::CallExpression(call) if is_component_factory(&call.callee) => call
            .arguments
            .first()
            .and_then(|arg| arg.as_expression())
            .and_then(options_object),
        _ => None,
    }
}

/// Object literal behind parentheses and type assertions
fn object_literal<'p, 'a>(expr: &'p Expression<'a>) -> Option<&'p ObjectExpression<'a>> {
    match expr {
        Expression::ObjectExpression(object) => Some(&**object),
        Expression::ParenthesizedExpression(paren) => object_literal(&paren.expression),
        Expression::TSAsExpression(ts) => object_literal(&ts.expression),
        Expression::TSSatisfiesExpression(ts) => object_literal(&ts.expression),
        _ => None,
    }
}

/// `defineComponent(...)` or `Vue.extend(...)`
fn is_component_factory(callee: &Expression<'_>) -> bool {
    match callee {
        Expression::Identifier(id) => id.name == "defineComponent",
        Expression::StaticMemberExpression(member) => {
            member.property.name == "extend"
                && matches!(&member.object, Expression::Identifier(id) if id.name == "Vue")
        }
        _ => false,
    }
}

fn find_property<'p, 'a>(
    object: &'p ObjectExpression<'a>,
    name: &str,
) -> Option<&'p ObjectProperty<'a>> {
    object.properties.iter().find_map(|prop| match prop {
        ObjectPropertyKind::ObjectProperty(p) if static_key_name(p) == Some(name) => Some(&**p),
        _ => None,
    })
}

/// Key of a property when it is known without evaluation
fn static_key_name<'p>(prop: &'p ObjectProperty<'_>) -> Option<&'p str> {
    match &prop.key {
        PropertyKey::StaticIdentifier(id) if !prop.computed => Some(id.name.as_str()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.as_str()),
        PropertyKey::TemplateLiteral(tpl) if tpl.expressions.is_empty() => tpl
            .quasis
            .first()
            .and_then(|quasi| quasi.value.cooked.as_ref())
            .map(|cooked| cooked.as_str()),
        _ => None,
    }
}
