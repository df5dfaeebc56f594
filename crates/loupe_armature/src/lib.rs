//! Armature - The structural parser for Loupe.
//!
//! An armature is the framework a sculptor builds a figure around. This crate
//! gives a Vue SFC its frame: [`parse_sfc`] splits the file into top-level
//! blocks and [`parse_template`] turns the `<template>` content into a
//! [`loupe_relief`] tree whose positions point back into the whole file.
//!
//! ```rust
//! use loupe_armature::{parse_sfc, parse_template};
//! use loupe_relief::LineIndex;
//!
//! let source = "<template>\n  <TheButton/>\n</template>";
//! let descriptor = parse_sfc(source).unwrap();
//! let template = descriptor.template.unwrap();
//!
//! let index = LineIndex::new(source);
//! let (root, errors) = parse_template(template.content, template.start, &index);
//! assert!(errors.is_empty());
//! assert_eq!(root.elements().next().unwrap().loc.start.line, 2);
//! ```

mod error;
mod parser;
mod sfc;

pub use error::{ParseError, SfcError};
pub use parser::{parse, parse_template, Parser};
pub use sfc::{parse_sfc, SfcBlock, SfcDescriptor};
