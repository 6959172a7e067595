//! Parse errors for JSON documents
//!
//! Positions are 0-based internally and rendered 1-based in messages.

use scanlex::config::compile_time::syntax::MAX_PARSE_DEPTH;
use scanlex::lexical::{DefinitionError, TokenizerError};
use scanlex::logging::{codes, Code};
use scanlex::Position;

pub type JsonResult<T> = Result<T, JsonError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JsonError {
    #[error(transparent)]
    Scan(#[from] TokenizerError),

    #[error("tokenizer configuration rejected: {0}")]
    Definition(#[from] DefinitionError),

    #[error("value expected at {position}")]
    ValueExpected { position: Position },

    #[error("invalid value '{value}' at {position}")]
    InvalidValue { value: String, position: Position },

    #[error("string expected at {position}")]
    StringExpected { position: Position },

    #[error("':' expected at {position}")]
    ColonExpected { position: Position },

    #[error("'}}' or ',' expected at {position}")]
    CloseBraceExpected { position: Position },

    #[error("']' or ',' expected at {position}")]
    CloseBracketExpected { position: Position },

    #[error("'{{' or '[' expected at {position}")]
    OpenBraceExpected { position: Position },

    #[error("unexpected content after document at {position}")]
    TrailingContent { position: Position },

    #[error("nesting deeper than {MAX_PARSE_DEPTH} levels at {position}")]
    MaxDepthExceeded { position: Position },
}

impl JsonError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Definition(e) => e.error_code(),
            Self::ValueExpected { .. } => codes::syntax::VALUE_EXPECTED,
            Self::InvalidValue { .. } => codes::syntax::INVALID_VALUE,
            Self::StringExpected { .. } => codes::syntax::STRING_EXPECTED,
            Self::ColonExpected { .. } => codes::syntax::COLON_EXPECTED,
            Self::CloseBraceExpected { .. }
            | Self::CloseBracketExpected { .. }
            | Self::OpenBraceExpected { .. } => codes::syntax::DELIMITER_EXPECTED,
            Self::TrailingContent { .. } => codes::syntax::TRAILING_CONTENT,
            Self::MaxDepthExceeded { .. } => codes::syntax::MAX_RECURSION_DEPTH,
        }
    }

    /// Source position of the offending token, when there is one
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Scan(e) => Some(e.position()),
            Self::Definition(_) => None,
            Self::ValueExpected { position }
            | Self::InvalidValue { position, .. }
            | Self::StringExpected { position }
            | Self::ColonExpected { position }
            | Self::CloseBraceExpected { position }
            | Self::CloseBracketExpected { position }
            | Self::OpenBraceExpected { position }
            | Self::TrailingContent { position }
            | Self::MaxDepthExceeded { position } => Some(*position),
        }
    }

    /// Get error description from the code registry
    pub fn description(&self) -> &'static str {
        codes::get_description(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_one_based() {
        let error = JsonError::ColonExpected {
            position: Position::new(0, 4),
        };
        assert_eq!(error.to_string(), "':' expected at 1:5");

        let error = JsonError::CloseBraceExpected {
            position: Position::new(2, 0),
        };
        assert_eq!(error.to_string(), "'}' or ',' expected at 3:1");
    }

    #[test]
    fn test_scan_errors_keep_their_code() {
        let error = JsonError::from(TokenizerError::UnterminatedString {
            quote: '"',
            position: Position::new(1, 1),
        });
        assert_eq!(error.error_code(), codes::lexical::UNTERMINATED_STRING);
        assert_eq!(error.position(), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_delimiter_errors_share_a_code() {
        let position = Position::start();
        for error in [
            JsonError::CloseBraceExpected { position },
            JsonError::CloseBracketExpected { position },
            JsonError::OpenBraceExpected { position },
        ] {
            assert_eq!(error.error_code(), codes::syntax::DELIMITER_EXPECTED);
            assert_ne!(error.description(), "Unknown error");
        }
    }
}
