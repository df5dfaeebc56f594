//! Byte offset to line/column conversion.

use crate::ast::{Position, SourceLocation};

/// Precomputed line start offsets of a source text.
///
/// Columns are counted in characters, lines and columns are 1-indexed.
#[derive(Debug, Clone)]
pub struct LineIndex<'s> {
    source: &'s str,
    line_starts: Vec<u32>,
}

impl<'s> LineIndex<'s> {
    pub fn new(source: &'s str) -> Self {
        let mut line_starts = Vec::with_capacity(source.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i as u32 + 1),
        );
        Self {
            source,
            line_starts,
        }
    }

    #[inline]
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Number of lines in the source
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of a byte offset. Offsets past the end clamp to the end.
    pub fn position(&self, offset: u32) -> Position {
        let offset = offset.min(self.source.len() as u32);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line] as usize;
        let column = self
            .source
            .get(line_start..offset as usize)
            .map(|s| s.chars().count())
            .unwrap_or(offset as usize - line_start);

        Position::new(offset, line as u32 + 1, column as u32 + 1)
    }

    /// Location covering `[start, end)`
    pub fn location(&self, start: u32, end: u32) -> SourceLocation {
        let source = self
            .source
            .get(start as usize..end as usize)
            .unwrap_or_default();
        SourceLocation::new(self.position(start), self.position(end), source)
    }
}
