//! Configurable lexical scanning
//!
//! A [`TokenizerBuilder`] collects literal definitions (atoms, blanks,
//! comment markers, line terminators and quote characters) and turns them
//! into a [`Tokenizer`] that pulls one token at a time from any
//! [`LineSource`].

pub mod builder;
pub mod definitions;
pub mod error;
pub mod metrics;
pub mod reader;
pub mod tokenizer;

use crate::config::compile_time::lexical::*;

pub use builder::TokenizerBuilder;
pub use definitions::{DefinitionKind, Eol, MultiLineComment, StringDefinition, TokenDefinitions};
pub use error::{DefinitionError, TokenizerError};
pub use metrics::ScanMetrics;
pub use reader::{LineSource, SourceLine};
pub use tokenizer::{Tokenizer, Tokens};

/// Compile-time limits applied while scanning
pub fn get_security_limits() -> SecurityLimits {
    SecurityLimits {
        max_line_length: MAX_LINE_LENGTH,
        max_string_size: MAX_STRING_SIZE,
        max_comment_length: MAX_COMMENT_LENGTH,
        max_definitions: MAX_DEFINITIONS,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityLimits {
    pub max_line_length: usize,
    pub max_string_size: usize,
    pub max_comment_length: usize,
    pub max_definitions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_limits_are_positive() {
        let limits = get_security_limits();
        assert!(limits.max_line_length > 0);
        assert!(limits.max_string_size > 0);
        assert!(limits.max_comment_length > 0);
        assert!(limits.max_definitions > 0);
    }
}
