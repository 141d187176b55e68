//! Snippet header parsing
//!
//! Snippets describe themselves in a leading comment block of `Label: value`
//! lines. The parser is tolerant of the comment style (`/* */`, `//`, `#`)
//! and only ever looks at the first [`HEADER_WINDOW_BYTES`] of a file.

pub mod fields;
pub mod parser;

pub use fields::{HeaderField, HeaderFieldSet, HeaderValues};
pub use parser::{parse_header, HEADER_WINDOW_BYTES};
