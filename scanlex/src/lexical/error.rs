//! Error types for token definition and scanning

use super::definitions::{DefinitionKind, Eol};
use crate::config::compile_time::lexical::*;
use crate::escape::EscapeError;
use crate::logging::{codes, Code};
use crate::utils::Position;

/// Rejected `def_*` call; the definitions are left unchanged
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("{kind} '{value}' is already defined")]
    Duplicate { kind: DefinitionKind, value: String },

    #[error("'{value}' is already defined as {existing}")]
    Conflict {
        value: String,
        existing: DefinitionKind,
    },

    #[error("{kind} definition cannot be empty")]
    Empty { kind: DefinitionKind },

    #[error("quote character '{quote}' is already defined")]
    DuplicateQuote { quote: char },

    #[error("too many {kind} definitions (max {limit})")]
    TooManyDefinitions { kind: DefinitionKind, limit: usize },
}

impl DefinitionError {
    pub fn error_code(&self) -> Code {
        match self {
            DefinitionError::Duplicate { .. } => codes::definition::DUPLICATE_DEFINITION,
            DefinitionError::Conflict { .. } => codes::definition::CONFLICTING_DEFINITION,
            DefinitionError::Empty { .. } => codes::definition::EMPTY_DEFINITION,
            DefinitionError::DuplicateQuote { .. } => codes::definition::DUPLICATE_QUOTE,
            DefinitionError::TooManyDefinitions { .. } => codes::definition::TOO_MANY_DEFINITIONS,
        }
    }
}

/// Fatal scanning failure; the tokenizer does not resynchronize after one
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizerError {
    #[error("I/O error reading line {}: {message}", .line + 1)]
    Io { line: usize, message: String },

    #[error("invalid UTF-8 on line {}", .line + 1)]
    InvalidEncoding { line: usize },

    #[error("line terminator {eol} on line {} is not enabled", .line + 1)]
    UnsupportedEol { eol: Eol, line: usize },

    #[error("line {} exceeds {MAX_LINE_LENGTH} characters", .line + 1)]
    LineTooLong { line: usize },

    #[error("unterminated string starting with {quote} at {position}")]
    UnterminatedString { quote: char, position: Position },

    #[error("unterminated comment starting with '{begin}' at {position}")]
    UnterminatedComment { begin: String, position: Position },

    #[error("invalid escape at {position}: {source}")]
    InvalidEscape {
        position: Position,
        #[source]
        source: EscapeError,
    },

    #[error("string at {position} exceeds {MAX_STRING_SIZE} characters")]
    StringTooLarge { position: Position },

    #[error("comment at {position} exceeds {MAX_COMMENT_LENGTH} characters")]
    CommentTooLong { position: Position },
}

impl TokenizerError {
    pub fn error_code(&self) -> Code {
        match self {
            TokenizerError::Io { .. } => codes::stream::IO_ERROR,
            TokenizerError::InvalidEncoding { .. } => codes::stream::INVALID_ENCODING,
            TokenizerError::UnsupportedEol { .. } => codes::stream::UNSUPPORTED_EOL,
            TokenizerError::LineTooLong { .. } => codes::stream::LINE_TOO_LONG,
            TokenizerError::UnterminatedString { .. } => codes::lexical::UNTERMINATED_STRING,
            TokenizerError::UnterminatedComment { .. } => codes::lexical::UNTERMINATED_COMMENT,
            TokenizerError::InvalidEscape { .. } => codes::lexical::INVALID_ESCAPE,
            TokenizerError::StringTooLarge { .. } => codes::lexical::STRING_TOO_LARGE,
            TokenizerError::CommentTooLong { .. } => codes::lexical::COMMENT_TOO_LONG,
        }
    }

    /// Best known source position of the failure
    pub fn position(&self) -> Position {
        match self {
            TokenizerError::Io { line, .. }
            | TokenizerError::InvalidEncoding { line }
            | TokenizerError::UnsupportedEol { line, .. }
            | TokenizerError::LineTooLong { line } => Position::new(*line, 0),
            TokenizerError::UnterminatedString { position, .. }
            | TokenizerError::UnterminatedComment { position, .. }
            | TokenizerError::InvalidEscape { position, .. }
            | TokenizerError::StringTooLarge { position }
            | TokenizerError::CommentTooLong { position } => *position,
        }
    }
}
