//! SFC block splitting.
//!
//! Zero-copy: every block borrows its content and attributes from the source.
//! Only the top level is scanned; nested markup is left to the template parser.

use crate::error::SfcError;
use memchr::{memchr, memmem};
use rustc_hash::FxHashMap;

const TAG_TEMPLATE: &[u8] = b"template";
const TAG_SCRIPT: &[u8] = b"script";
const TAG_STYLE: &[u8] = b"style";

/// A top-level block of an SFC (`<template>`, `<script>`, `<style>`, custom)
#[derive(Debug, Clone)]
pub struct SfcBlock<'a> {
    /// Tag name as written
    pub tag: &'a str,
    /// Content between the opening and closing tag
    pub content: &'a str,
    /// Attributes of the opening tag (boolean attributes map to "")
    pub attrs: FxHashMap<&'a str, &'a str>,
    /// Byte offset of the opening `<`
    pub tag_start: u32,
    /// Byte offset where `content` starts
    pub start: u32,
    /// Byte offset where `content` ends
    pub end: u32,
}

impl<'a> SfcBlock<'a> {
    #[inline]
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.attrs.get(name).copied()
    }

    #[inline]
    pub fn lang(&self) -> Option<&'a str> {
        self.attr("lang").filter(|l| !l.is_empty())
    }

    #[inline]
    pub fn is_setup(&self) -> bool {
        self.attrs.contains_key("setup")
    }
}

/// Parsed SFC descriptor
#[derive(Debug, Clone, Default)]
pub struct SfcDescriptor<'a> {
    pub source: &'a str,
    pub template: Option<SfcBlock<'a>>,
    pub script: Option<SfcBlock<'a>>,
    pub script_setup: Option<SfcBlock<'a>>,
    pub styles: Vec<SfcBlock<'a>>,
    pub custom_blocks: Vec<SfcBlock<'a>>,
}

impl<'a> SfcDescriptor<'a> {
    /// Whether the SFC has any script block
    #[inline]
    pub fn has_script(&self) -> bool {
        self.script.is_some() || self.script_setup.is_some()
    }
}

/// Split a Vue SFC into its top-level blocks
pub fn parse_sfc(source: &str) -> Result<SfcDescriptor<'_>, SfcError> {
    let mut descriptor = SfcDescriptor {
        source,
        ..Default::default()
    };

    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut pos = 0;

    while pos < len {
        let Some(lt) = memchr(b'<', &bytes[pos..]) else {
            break;
        };
        pos += lt;

        // Top-level comments
        if bytes[pos..].starts_with(b"<!--") {
            match memmem::find(&bytes[pos + 4..], b"-->") {
                Some(end) => {
                    pos += 4 + end + 3;
                    continue;
                }
                None => break,
            }
        }

        let Some(open) = parse_open_tag(source, pos) else {
            pos += 1;
            continue;
        };

        let tag_bytes = open.tag.as_bytes();
        let (content_start, content_end, end_pos) = if open.self_closing {
            (open.end, open.end, open.end)
        } else {
            let close = if tag_bytes.eq_ignore_ascii_case(TAG_TEMPLATE) {
                find_template_end(bytes, open.end)
            } else {
                find_closing_tag(bytes, open.end, tag_bytes)
            };
            match close {
                Some((close_start, close_end)) => (open.end, close_start, close_end),
                None => {
                    return Err(SfcError::UnclosedBlock {
                        tag: open.tag.into(),
                        offset: pos as u32,
                    })
                }
            }
        };

        let block = SfcBlock {
            tag: open.tag,
            content: &source[content_start..content_end],
            attrs: open.attrs,
            tag_start: pos as u32,
            start: content_start as u32,
            end: content_end as u32,
        };

        if tag_bytes.eq_ignore_ascii_case(TAG_TEMPLATE) {
            if descriptor.template.is_some() {
                return Err(SfcError::DuplicateTemplate {
                    offset: block.tag_start,
                });
            }
            descriptor.template = Some(block);
        } else if tag_bytes.eq_ignore_ascii_case(TAG_SCRIPT) {
            if block.is_setup() {
                if descriptor.script_setup.is_some() {
                    return Err(SfcError::DuplicateScriptSetup {
                        offset: block.tag_start,
                    });
                }
                descriptor.script_setup = Some(block);
            } else {
                if descriptor.script.is_some() {
                    return Err(SfcError::DuplicateScript {
                        offset: block.tag_start,
                    });
                }
                descriptor.script = Some(block);
            }
        } else if tag_bytes.eq_ignore_ascii_case(TAG_STYLE) {
            descriptor.styles.push(block);
        } else {
            descriptor.custom_blocks.push(block);
        }

        pos = end_pos;
    }

    Ok(descriptor)
}

struct OpenTag<'a> {
    tag: &'a str,
    attrs: FxHashMap<&'a str, &'a str>,
    self_closing: bool,
    /// Offset right after the closing `>`
    end: usize,
}

/// Parse `<tag attr="value" ...>` starting at the `<`
fn parse_open_tag(source: &str, start: usize) -> Option<OpenTag<'_>> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut pos = start + 1;

    let tag_start = pos;
    while pos < len && is_tag_name_char(bytes[pos]) {
        pos += 1;
    }
    if pos == tag_start || !bytes[tag_start].is_ascii_alphabetic() {
        return None;
    }
    let tag = &source[tag_start..pos];

    let mut attrs = FxHashMap::default();
    loop {
        while pos < len && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= len {
            return None;
        }
        match bytes[pos] {
            b'>' => {
                return Some(OpenTag {
                    tag,
                    attrs,
                    self_closing: false,
                    end: pos + 1,
                })
            }
            b'/' if bytes.get(pos + 1) == Some(&b'>') => {
                return Some(OpenTag {
                    tag,
                    attrs,
                    self_closing: true,
                    end: pos + 2,
                })
            }
            b'/' => {
                pos += 1;
                continue;
            }
            _ => {}
        }

        let name_start = pos;
        while pos < len && !is_attr_name_end(bytes[pos]) {
            pos += 1;
        }
        let name = &source[name_start..pos];

        while pos < len && matches!(bytes[pos], b' ' | b'\t') {
            pos += 1;
        }

        let value = if pos < len && bytes[pos] == b'=' {
            pos += 1;
            while pos < len && matches!(bytes[pos], b' ' | b'\t') {
                pos += 1;
            }
            if pos < len && matches!(bytes[pos], b'"' | b'\'') {
                let quote = bytes[pos];
                let value_start = pos + 1;
                let value_end = memchr(quote, &bytes[value_start..])? + value_start;
                pos = value_end + 1;
                &source[value_start..value_end]
            } else {
                let value_start = pos;
                while pos < len && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b'>' {
                    pos += 1;
                }
                &source[value_start..pos]
            }
        } else {
            ""
        };

        if !name.is_empty() {
            attrs.insert(name, value);
        }
    }
}

/// Find `</template>` matching an already opened root template, honoring
/// nested non-self-closing `<template>` elements.
/// Returns (closing tag start, offset after closing tag).
fn find_template_end(bytes: &[u8], from: usize) -> Option<(usize, usize)> {
    let len = bytes.len();
    let mut depth = 1usize;
    let mut pos = from;

    while pos < len {
        pos += memchr(b'<', &bytes[pos..])?;

        if bytes[pos..].starts_with(b"<!--") {
            pos += 4 + memmem::find(&bytes[pos + 4..], b"-->")? + 3;
            continue;
        }

        if let Some(end) = closing_tag_at(bytes, pos, TAG_TEMPLATE) {
            depth -= 1;
            if depth == 0 {
                return Some((pos, end));
            }
            pos = end;
            continue;
        }

        let name_end = pos + 1 + TAG_TEMPLATE.len();
        if name_end < len
            && bytes[pos + 1..name_end].eq_ignore_ascii_case(TAG_TEMPLATE)
            && matches!(bytes[name_end], b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/')
        {
            let gt = name_end + memchr(b'>', &bytes[name_end..])?;
            if bytes[gt - 1] != b'/' {
                depth += 1;
            }
            pos = gt + 1;
            continue;
        }

        pos += 1;
    }

    None
}

/// Find the first `</tag>` (case-insensitive) at or after `from`
fn find_closing_tag(bytes: &[u8], from: usize, tag: &[u8]) -> Option<(usize, usize)> {
    let mut pos = from;
    while pos < bytes.len() {
        pos += memmem::find(&bytes[pos..], b"</")?;
        if let Some(end) = closing_tag_at(bytes, pos, tag) {
            return Some((pos, end));
        }
        pos += 2;
    }
    None
}

/// If a `</tag >` closing tag starts at `pos`, return the offset after it
#[inline]
fn closing_tag_at(bytes: &[u8], pos: usize, tag: &[u8]) -> Option<usize> {
    let name_start = pos + 2;
    let name_end = name_start + tag.len();
    if !bytes[pos..].starts_with(b"</")
        || name_end > bytes.len()
        || !bytes[name_start..name_end].eq_ignore_ascii_case(tag)
    {
        return None;
    }
    let mut end = name_end;
    while end < bytes.len() && bytes[end].is_ascii_whitespace() {
        end += 1;
    }
    (bytes.get(end) == Some(&b'>')).then_some(end + 1)
}

#[inline(always)]
fn is_tag_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_'
}

#[inline(always)]
fn is_attr_name_end(c: u8) -> bool {
    c.is_ascii_whitespace() || matches!(c, b'=' | b'>' | b'/')
}
