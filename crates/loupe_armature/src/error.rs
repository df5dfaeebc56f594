//! Parse errors for SFC splitting and template parsing.
//!
//! Offsets are byte offsets into the whole SFC source.

use compact_str::CompactString;
use thiserror::Error;

/// Errors raised while splitting an SFC into its top-level blocks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SfcError {
    #[error("SFC can only contain one <template> block (second one at offset {offset})")]
    DuplicateTemplate { offset: u32 },

    #[error("SFC can only contain one <script> block (second one at offset {offset})")]
    DuplicateScript { offset: u32 },

    #[error("SFC can only contain one <script setup> block (second one at offset {offset})")]
    DuplicateScriptSetup { offset: u32 },

    #[error("<{tag}> block starting at offset {offset} is never closed")]
    UnclosedBlock { tag: CompactString, offset: u32 },
}

impl SfcError {
    /// Byte offset the error points at
    pub fn offset(&self) -> u32 {
        match self {
            Self::DuplicateTemplate { offset }
            | Self::DuplicateScript { offset }
            | Self::DuplicateScriptSetup { offset }
            | Self::UnclosedBlock { offset, .. } => *offset,
        }
    }
}

/// Recoverable errors raised while parsing template markup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("element <{tag}> is missing its end tag")]
    MissingEndTag { tag: CompactString, offset: u32 },

    #[error("invalid end tag </{tag}>")]
    InvalidEndTag { tag: CompactString, offset: u32 },

    #[error("unterminated comment")]
    EofInComment { offset: u32 },

    #[error("unterminated tag")]
    EofInTag { offset: u32 },

    #[error("unterminated interpolation")]
    MissingInterpolationEnd { offset: u32 },
}

impl ParseError {
    /// Byte offset the error points at
    pub fn offset(&self) -> u32 {
        match self {
            Self::MissingEndTag { offset, .. }
            | Self::InvalidEndTag { offset, .. }
            | Self::EofInComment { offset }
            | Self::EofInTag { offset }
            | Self::MissingInterpolationEnd { offset } => *offset,
        }
    }
}
