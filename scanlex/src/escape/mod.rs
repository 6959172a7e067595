//! Escape-sequence decoding for quoted strings
//!
//! The tokenizer never hard-codes escape rules. Each quote character is
//! registered with an optional [`EscapeConverter`]; when the converter's
//! prefix character shows up inside a string, the remaining text of the line
//! (starting at the prefix) is handed to the converter, which decodes exactly
//! one character and reports how many source characters it used.

pub mod converter;

pub use converter::{EscapeConverter, EscapeError, EscapeSequence, StdEscapeConverter};
