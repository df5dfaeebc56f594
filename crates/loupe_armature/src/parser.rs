//! Vue template parser.
//!
//! A single forward pass over the template bytes with an explicit stack of
//! open elements. Malformed markup never aborts the parse: problems are
//! collected as [`ParseError`]s and the tree is closed off as well as possible.

use crate::error::ParseError;
use compact_str::CompactString;
use loupe_relief::{
    AttributeNode, CommentNode, DirectiveNode, ElementNode, ElementType, InterpolationNode,
    LineIndex, PropNode, RootNode, SimpleExpressionNode, SourceLocation, TemplateChildNode,
    TextNode,
};
use memchr::memmem;
use phf::phf_set;

/// HTML elements that never have children or an end tag
static VOID_TAGS: phf::Set<&'static str> = phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
};

/// Elements whose content is raw text, not markup
static RAW_TEXT_TAGS: phf::Set<&'static str> = phf_set! {
    "script", "style", "textarea",
};

/// Vue built-in components
static BUILTIN_COMPONENTS: phf::Set<&'static str> = phf_set! {
    "Teleport", "Suspense", "KeepAlive", "BaseTransition", "Transition",
    "TransitionGroup", "component",
};

/// Template parser
pub struct Parser<'a, 'i> {
    source: &'a str,
    /// Offset of `source` within the full file
    base: u32,
    index: &'i LineIndex<'i>,
    pos: usize,
    stack: Vec<ElementNode>,
    root: RootNode,
    errors: Vec<ParseError>,
}

impl<'a, 'i> Parser<'a, 'i> {
    /// Create a parser for template content located at `base` inside the
    /// file indexed by `index`
    pub fn new(source: &'a str, base: u32, index: &'i LineIndex<'i>) -> Self {
        let root_loc = index.location(base, base + source.len() as u32);
        Self {
            source,
            base,
            index,
            pos: 0,
            stack: Vec::with_capacity(16),
            root: RootNode::new(source, root_loc),
            errors: Vec::new(),
        }
    }

    /// Parse the template
    pub fn parse(mut self) -> (RootNode, Vec<ParseError>) {
        let bytes = self.source.as_bytes();
        let len = bytes.len();

        while self.pos < len {
            let rest = &bytes[self.pos..];
            if rest.starts_with(b"{{") {
                self.parse_interpolation();
            } else if rest.starts_with(b"<!--") {
                self.parse_comment();
            } else if rest.starts_with(b"</") {
                self.parse_close_tag();
            } else if rest.starts_with(b"<!") || rest.starts_with(b"<?") {
                self.skip_declaration();
            } else if rest.len() > 1 && rest[0] == b'<' && rest[1].is_ascii_alphabetic() {
                self.parse_open_tag();
            } else {
                self.parse_text();
            }
        }

        self.handle_unclosed_elements();
        (self.root, self.errors)
    }

    #[inline]
    fn offset(&self, local: usize) -> u32 {
        self.base + local as u32
    }

    #[inline]
    fn create_loc(&self, start: usize, end: usize) -> SourceLocation {
        self.index.location(self.offset(start), self.offset(end))
    }

    fn add_child(&mut self, child: TemplateChildNode) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(child),
            None => self.root.children.push(child),
        }
    }

    fn close_element(&mut self, end: usize) {
        if let Some(mut el) = self.stack.pop() {
            el.loc = self.index.location(el.loc.start.offset, self.offset(end));
            self.add_child(TemplateChildNode::Element(Box::new(el)));
        }
    }

    fn handle_unclosed_elements(&mut self) {
        let end = self.source.len();
        while let Some(el) = self.stack.last() {
            self.errors.push(ParseError::MissingEndTag {
                tag: el.tag.clone(),
                offset: el.loc.start.offset,
            });
            self.close_element(end);
        }
    }

    fn parse_text(&mut self) {
        let bytes = self.source.as_bytes();
        let start = self.pos;
        let mut end = start + 1;
        while end < bytes.len() {
            if bytes[end] == b'<' || bytes[end..].starts_with(b"{{") {
                break;
            }
            end += 1;
        }
        self.pos = end;

        let content = &self.source[start..end];
        if !content.trim().is_empty() {
            let loc = self.create_loc(start, end);
            self.add_child(TemplateChildNode::Text(Box::new(TextNode::new(content, loc))));
        }
    }

    fn parse_interpolation(&mut self) {
        let start = self.pos;
        let inner_start = start + 2;
        match memmem::find(&self.source.as_bytes()[inner_start..], b"}}") {
            Some(rel) => {
                let inner_end = inner_start + rel;
                let raw = &self.source[inner_start..inner_end];
                let trimmed_start = inner_start + (raw.len() - raw.trim_start().len());
                let trimmed_end = inner_end - (raw.len() - raw.trim_end().len());
                let content = SimpleExpressionNode::new(
                    raw.trim(),
                    false,
                    self.create_loc(trimmed_start, trimmed_end.max(trimmed_start)),
                );
                let loc = self.create_loc(start, inner_end + 2);
                self.add_child(TemplateChildNode::Interpolation(Box::new(
                    InterpolationNode { content, loc },
                )));
                self.pos = inner_end + 2;
            }
            None => {
                self.errors.push(ParseError::MissingInterpolationEnd {
                    offset: self.offset(start),
                });
                let loc = self.create_loc(start, self.source.len());
                self.add_child(TemplateChildNode::Text(Box::new(TextNode::new(
                    &self.source[start..],
                    loc,
                ))));
                self.pos = self.source.len();
            }
        }
    }

    fn parse_comment(&mut self) {
        let start = self.pos;
        let inner_start = start + 4;
        let (inner_end, end) = match memmem::find(&self.source.as_bytes()[inner_start..], b"-->")
        {
            Some(rel) => (inner_start + rel, inner_start + rel + 3),
            None => {
                self.errors.push(ParseError::EofInComment {
                    offset: self.offset(start),
                });
                (self.source.len(), self.source.len())
            }
        };
        let loc = self.create_loc(start, end);
        self.add_child(TemplateChildNode::Comment(Box::new(CommentNode::new(
            &self.source[inner_start..inner_end],
            loc,
        ))));
        self.pos = end;
    }

    fn skip_declaration(&mut self) {
        self.pos = match memchr::memchr(b'>', &self.source.as_bytes()[self.pos..]) {
            Some(rel) => self.pos + rel + 1,
            None => self.source.len(),
        };
    }

    fn parse_close_tag(&mut self) {
        let bytes = self.source.as_bytes();
        let start = self.pos;
        let name_start = start + 2;
        let mut name_end = name_start;
        while name_end < bytes.len() && !bytes[name_end].is_ascii_whitespace() && bytes[name_end] != b'>'
        {
            name_end += 1;
        }
        let tag = &self.source[name_start..name_end];

        let end = match memchr::memchr(b'>', &bytes[name_end..]) {
            Some(rel) => name_end + rel + 1,
            None => {
                self.errors.push(ParseError::EofInTag {
                    offset: self.offset(start),
                });
                self.pos = bytes.len();
                return;
            }
        };
        self.pos = end;

        let open_index = self
            .stack
            .iter()
            .rposition(|el| el.tag == tag)
            .or_else(|| {
                self.stack
                    .iter()
                    .rposition(|el| el.tag.eq_ignore_ascii_case(tag))
            });

        match open_index {
            Some(index) => {
                while self.stack.len() > index + 1 {
                    if let Some(el) = self.stack.last() {
                        self.errors.push(ParseError::MissingEndTag {
                            tag: el.tag.clone(),
                            offset: el.loc.start.offset,
                        });
                    }
                    self.close_element(start);
                }
                self.close_element(end);
            }
            None => self.errors.push(ParseError::InvalidEndTag {
                tag: tag.into(),
                offset: self.offset(start),
            }),
        }
    }

    fn parse_open_tag(&mut self) {
        let bytes = self.source.as_bytes();
        let len = bytes.len();
        let start = self.pos;
        let mut pos = start + 1;

        while pos < len && !bytes[pos].is_ascii_whitespace() && !matches!(bytes[pos], b'>' | b'/')
        {
            pos += 1;
        }
        let tag = &self.source[start + 1..pos];
        let mut element = ElementNode::new(tag, self.create_loc(start, pos));

        let mut self_closing = false;
        loop {
            while pos < len && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            if pos >= len {
                self.errors.push(ParseError::EofInTag {
                    offset: self.offset(start),
                });
                self_closing = true;
                break;
            }
            match bytes[pos] {
                b'>' => {
                    pos += 1;
                    break;
                }
                b'/' if bytes.get(pos + 1) == Some(&b'>') => {
                    pos += 2;
                    self_closing = true;
                    break;
                }
                b'/' => {
                    pos += 1;
                    continue;
                }
                _ => {}
            }
            pos = self.parse_attribute(&mut element, pos);
        }

        self.pos = pos;
        element.is_self_closing = self_closing;
        element.tag_type = determine_element_type(&element);

        if self_closing || VOID_TAGS.contains(tag) {
            element.loc = self.create_loc(start, pos);
            self.add_child(TemplateChildNode::Element(Box::new(element)));
            return;
        }

        if RAW_TEXT_TAGS.contains(tag) {
            self.parse_raw_text(element);
            return;
        }

        self.stack.push(element);
    }

    /// Raw text elements run until their own end tag
    fn parse_raw_text(&mut self, mut element: ElementNode) {
        let bytes = self.source.as_bytes();
        let content_start = self.pos;
        let closing = format!("</{}", element.tag);
        let (content_end, end) = match memmem::find(&bytes[content_start..], closing.as_bytes()) {
            Some(rel) => {
                let close_start = content_start + rel;
                let end = memchr::memchr(b'>', &bytes[close_start..])
                    .map(|gt| close_start + gt + 1)
                    .unwrap_or(bytes.len());
                (close_start, end)
            }
            None => {
                self.errors.push(ParseError::MissingEndTag {
                    tag: element.tag.clone(),
                    offset: element.loc.start.offset,
                });
                (bytes.len(), bytes.len())
            }
        };

        if content_end > content_start {
            let loc = self.create_loc(content_start, content_end);
            element
                .children
                .push(TemplateChildNode::Text(Box::new(TextNode::new(
                    &self.source[content_start..content_end],
                    loc,
                ))));
        }
        element.loc = self.index.location(element.loc.start.offset, self.offset(end));
        self.pos = end;
        self.add_child(TemplateChildNode::Element(Box::new(element)));
    }

    /// Parse one attribute starting at `pos`, returning the position after it
    fn parse_attribute(&mut self, element: &mut ElementNode, mut pos: usize) -> usize {
        let bytes = self.source.as_bytes();
        let len = bytes.len();

        let name_start = pos;
        let mut in_brackets = false;
        while pos < len {
            let c = bytes[pos];
            if c == b'[' {
                in_brackets = true;
            } else if c == b']' {
                in_brackets = false;
            } else if !in_brackets && (c.is_ascii_whitespace() || matches!(c, b'=' | b'>' | b'/'))
            {
                break;
            }
            pos += 1;
        }
        if pos == name_start {
            // Stray `=` or similar
            return pos + 1;
        }
        let name_end = pos;
        let name = &self.source[name_start..name_end];

        let mut lookahead = pos;
        while lookahead < len && bytes[lookahead].is_ascii_whitespace() {
            lookahead += 1;
        }

        let mut value: Option<(usize, usize)> = None;
        if lookahead < len && bytes[lookahead] == b'=' {
            pos = lookahead + 1;
            while pos < len && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            if pos < len && matches!(bytes[pos], b'"' | b'\'') {
                let quote = bytes[pos];
                let value_start = pos + 1;
                match memchr::memchr(quote, &bytes[value_start..]) {
                    Some(rel) => {
                        value = Some((value_start, value_start + rel));
                        pos = value_start + rel + 1;
                    }
                    None => {
                        self.errors.push(ParseError::EofInTag {
                            offset: self.offset(name_start),
                        });
                        value = Some((value_start, len));
                        pos = len;
                    }
                }
            } else {
                let value_start = pos;
                while pos < len && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b'>' {
                    pos += 1;
                }
                value = Some((value_start, pos));
            }
        }

        let loc = self.create_loc(name_start, pos);
        let prop = match parse_directive(name) {
            Some(parts) => {
                let mut dir = DirectiveNode::new(parts.name, name, loc);
                if let Some((arg, is_static)) = parts.arg {
                    let arg_start = name_start + (arg.as_ptr() as usize - name.as_ptr() as usize);
                    dir.arg = Some(SimpleExpressionNode::new(
                        arg,
                        is_static,
                        self.create_loc(arg_start, arg_start + arg.len()),
                    ));
                }
                dir.modifiers = parts.modifiers.into_iter().map(CompactString::from).collect();
                if let Some((start, end)) = value {
                    dir.exp = Some(SimpleExpressionNode::new(
                        &self.source[start..end],
                        false,
                        self.create_loc(start, end),
                    ));
                }
                PropNode::Directive(Box::new(dir))
            }
            None => {
                let mut attr = AttributeNode::new(name, loc);
                if let Some((start, end)) = value {
                    attr.value = Some(TextNode::new(
                        &self.source[start..end],
                        self.create_loc(start, end),
                    ));
                }
                PropNode::Attribute(Box::new(attr))
            }
        };
        element.props.push(prop);
        pos
    }
}

/// Pieces of a directive attribute name
#[derive(Debug, PartialEq, Eq)]
struct DirectiveParts<'s> {
    name: &'s str,
    /// (argument, is_static)
    arg: Option<(&'s str, bool)>,
    modifiers: Vec<&'s str>,
}

/// Split a directive attribute name such as `v-on:click.stop`, `:is`,
/// `@click`, `#default` or `v-bind:[key]` into its parts
fn parse_directive(raw: &str) -> Option<DirectiveParts<'_>> {
    let (name, rest, prop_shorthand) = match raw.as_bytes().first()? {
        b':' => ("bind", &raw[1..], false),
        b'@' => ("on", &raw[1..], false),
        b'#' => ("slot", &raw[1..], false),
        b'.' => ("bind", &raw[1..], true),
        _ => {
            let body = raw.strip_prefix("v-")?;
            let end = body.find([':', '.']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            let rest = &body[end..];
            match rest.strip_prefix(':') {
                Some(arg_rest) => (name, arg_rest, false),
                None => {
                    let modifiers = split_modifiers(rest);
                    return Some(DirectiveParts {
                        name,
                        arg: None,
                        modifiers,
                    });
                }
            }
        }
    };

    let (arg, after_arg) = if let Some(dynamic) = rest.strip_prefix('[') {
        match dynamic.find(']') {
            Some(close) => (Some((&dynamic[..close], false)), &dynamic[close + 1..]),
            None => (Some((dynamic, false)), ""),
        }
    } else {
        let end = rest.find('.').unwrap_or(rest.len());
        let arg = &rest[..end];
        ((!arg.is_empty()).then_some((arg, true)), &rest[end..])
    };

    let mut modifiers = split_modifiers(after_arg);
    if prop_shorthand {
        modifiers.push("prop");
    }

    Some(DirectiveParts {
        name,
        arg,
        modifiers,
    })
}

#[inline]
fn split_modifiers(rest: &str) -> Vec<&str> {
    rest.split('.').filter(|m| !m.is_empty()).collect()
}

/// Determine element type (element, component, slot, template)
fn determine_element_type(element: &ElementNode) -> ElementType {
    let tag = element.tag.as_str();

    if tag == "slot" {
        return ElementType::Slot;
    }

    if tag == "template" {
        let has_structural_directive = element.props.iter().any(|p| {
            matches!(p, PropNode::Directive(d) if matches!(d.name.as_str(), "if" | "else-if" | "else" | "for" | "slot"))
        });
        if has_structural_directive {
            return ElementType::Template;
        }
    }

    if BUILTIN_COMPONENTS.contains(tag)
        || tag.contains('-')
        || tag.chars().next().is_some_and(|c| c.is_uppercase())
    {
        return ElementType::Component;
    }

    ElementType::Element
}

/// Parse a template located at `base` inside the file indexed by `index`
pub fn parse_template(
    source: &str,
    base: u32,
    index: &LineIndex<'_>,
) -> (RootNode, Vec<ParseError>) {
    let (root, errors) = Parser::new(source, base, index).parse();
    if !errors.is_empty() {
        tracing::debug!("template at offset {} parsed with {} errors", base, errors.len());
    }
    (root, errors)
}

/// Parse standalone template markup
pub fn parse(source: &str) -> (RootNode, Vec<ParseError>) {
    let index = LineIndex::new(source);
    parse_template(source, 0, &index)
}
