//! Vue template AST node types.
//!
//! The tree only keeps what static analysis of a template needs: elements,
//! their attributes and directives, text, comments and interpolations.
//! Every node carries a [`SourceLocation`] measured against the whole SFC
//! source, not against the template block.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Node type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Root = 0,
    Element = 1,
    Text = 2,
    Comment = 3,
    SimpleExpression = 4,
    Interpolation = 5,
    Attribute = 6,
    Directive = 7,
}

/// Element type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum ElementType {
    #[default]
    Element = 0,
    Component = 1,
    Slot = 2,
    Template = 3,
}

/// Source position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    /// Byte offset from start of file
    pub offset: u32,
    /// 1-indexed line number
    pub line: u32,
    /// 1-indexed column number
    pub column: u32,
}

impl Position {
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

/// Source location span [start, end)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
    pub source: CompactString,
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::STUB
    }
}

impl SourceLocation {
    /// Stub location for synthesized nodes
    pub const STUB: Self = Self {
        start: Position {
            offset: 0,
            line: 1,
            column: 1,
        },
        end: Position {
            offset: 0,
            line: 1,
            column: 1,
        },
        source: CompactString::const_new(""),
    };

    pub fn new(start: Position, end: Position, source: impl Into<CompactString>) -> Self {
        Self {
            start,
            end,
            source: source.into(),
        }
    }
}

/// Root AST node
#[derive(Debug, Default)]
pub struct RootNode {
    pub children: Vec<TemplateChildNode>,
    /// Raw template content
    pub source: CompactString,
    pub loc: SourceLocation,
}

impl RootNode {
    pub fn new(source: impl Into<CompactString>, loc: SourceLocation) -> Self {
        Self {
            children: Vec::new(),
            source: source.into(),
            loc,
        }
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::Root
    }

    /// Iterate over every element in document order (depth-first, pre-order)
    pub fn elements(&self) -> Elements<'_> {
        Elements {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Depth-first iterator over the elements of a template
pub struct Elements<'a> {
    stack: Vec<&'a TemplateChildNode>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a ElementNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let TemplateChildNode::Element(el) = node {
                self.stack.extend(el.children.iter().rev());
                return Some(el.as_ref());
            }
        }
        None
    }
}

/// All template child node types
#[derive(Debug)]
pub enum TemplateChildNode {
    Element(Box<ElementNode>),
    Text(Box<TextNode>),
    Comment(Box<CommentNode>),
    Interpolation(Box<InterpolationNode>),
}

impl TemplateChildNode {
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Element(_) => NodeType::Element,
            Self::Text(_) => NodeType::Text,
            Self::Comment(_) => NodeType::Comment,
            Self::Interpolation(_) => NodeType::Interpolation,
        }
    }

    pub fn loc(&self) -> &SourceLocation {
        match self {
            Self::Element(n) => &n.loc,
            Self::Text(n) => &n.loc,
            Self::Comment(n) => &n.loc,
            Self::Interpolation(n) => &n.loc,
        }
    }
}

/// Element node
#[derive(Debug)]
pub struct ElementNode {
    /// Tag name exactly as written in the source
    pub tag: CompactString,
    pub tag_type: ElementType,
    pub props: Vec<PropNode>,
    pub children: Vec<TemplateChildNode>,
    pub is_self_closing: bool,
    pub loc: SourceLocation,
}

impl ElementNode {
    pub fn new(tag: impl Into<CompactString>, loc: SourceLocation) -> Self {
        Self {
            tag: tag.into(),
            tag_type: ElementType::Element,
            props: Vec::new(),
            children: Vec::new(),
            is_self_closing: false,
            loc,
        }
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::Element
    }

    /// Find a plain (non-directive) attribute by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeNode> {
        self.props.iter().find_map(|p| match p {
            PropNode::Attribute(attr) if attr.name == name => Some(attr.as_ref()),
            _ => None,
        })
    }

    /// Find a directive by normalized name and static argument,
    /// e.g. `("bind", Some("is"))` for `:is` / `v-bind:is`
    pub fn directive(&self, name: &str, arg: Option<&str>) -> Option<&DirectiveNode> {
        self.props.iter().find_map(|p| match p {
            PropNode::Directive(dir)
                if dir.name == name
                    && dir.arg.as_ref().map(|a| a.content.as_str()) == arg =>
            {
                Some(dir.as_ref())
            }
            _ => None,
        })
    }
}

/// Prop node (attribute or directive)
#[derive(Debug)]
pub enum PropNode {
    Attribute(Box<AttributeNode>),
    Directive(Box<DirectiveNode>),
}

impl PropNode {
    pub fn loc(&self) -> &SourceLocation {
        match self {
            Self::Attribute(n) => &n.loc,
            Self::Directive(n) => &n.loc,
        }
    }
}

/// Attribute node
#[derive(Debug)]
pub struct AttributeNode {
    pub name: CompactString,
    pub value: Option<TextNode>,
    pub loc: SourceLocation,
}

impl AttributeNode {
    pub fn new(name: impl Into<CompactString>, loc: SourceLocation) -> Self {
        Self {
            name: name.into(),
            value: None,
            loc,
        }
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::Attribute
    }
}

/// Directive node (v-if, v-for, v-bind, etc.)
#[derive(Debug)]
pub struct DirectiveNode {
    /// Normalized directive name without prefix (e.g., "if", "for", "bind")
    pub name: CompactString,
    /// Raw attribute name including shorthand (e.g., "@click", ":is")
    pub raw_name: CompactString,
    /// Directive expression
    pub exp: Option<SimpleExpressionNode>,
    /// Directive argument (e.g., "is" in `:is`)
    pub arg: Option<SimpleExpressionNode>,
    /// Directive modifiers (e.g., ["stop", "prevent"] in @click.stop.prevent)
    pub modifiers: SmallVec<[CompactString; 2]>,
    pub loc: SourceLocation,
}

impl DirectiveNode {
    pub fn new(
        name: impl Into<CompactString>,
        raw_name: impl Into<CompactString>,
        loc: SourceLocation,
    ) -> Self {
        Self {
            name: name.into(),
            raw_name: raw_name.into(),
            exp: None,
            arg: None,
            modifiers: SmallVec::new(),
            loc,
        }
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::Directive
    }
}

/// Text node
#[derive(Debug)]
pub struct TextNode {
    pub content: CompactString,
    pub loc: SourceLocation,
}

impl TextNode {
    pub fn new(content: impl Into<CompactString>, loc: SourceLocation) -> Self {
        Self {
            content: content.into(),
            loc,
        }
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::Text
    }
}

/// Comment node
#[derive(Debug)]
pub struct CommentNode {
    pub content: CompactString,
    pub loc: SourceLocation,
}

impl CommentNode {
    pub fn new(content: impl Into<CompactString>, loc: SourceLocation) -> Self {
        Self {
            content: content.into(),
            loc,
        }
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::Comment
    }
}

/// Interpolation node ({{ expr }})
#[derive(Debug)]
pub struct InterpolationNode {
    pub content: SimpleExpressionNode,
    pub loc: SourceLocation,
}

impl InterpolationNode {
    pub fn node_type(&self) -> NodeType {
        NodeType::Interpolation
    }
}

/// Simple expression node
#[derive(Debug, Clone)]
pub struct SimpleExpressionNode {
    pub content: CompactString,
    /// Static expressions are literal text (directive arguments, not JS)
    pub is_static: bool,
    pub loc: SourceLocation,
}

impl SimpleExpressionNode {
    pub fn new(content: impl Into<CompactString>, is_static: bool, loc: SourceLocation) -> Self {
        Self {
            content: content.into(),
            is_static,
            loc,
        }
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::SimpleExpression
    }
}
