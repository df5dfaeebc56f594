//! Relief - The template AST surface for Loupe.
//!
//! A relief is a sculpture that stands out from a flat background. This crate
//! holds the shape of a Vue template once it has been lifted out of the SFC
//! text: elements, props and positions that analysis passes walk over.

pub mod ast;
mod line_index;

pub use ast::*;
pub use line_index::LineIndex;
