//! Token record produced by the tokenizer
use crate::utils::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned to a recognized lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    /// Fixed literal recognized verbatim
    Atom,
    /// Fixed literal classified as insignificant whitespace
    Blank,
    /// Single- or multi-line comment; the value excludes the markers
    Comment,
    /// Quoted string; the value holds the decoded content
    String,
    EndOfLine,
    EndOfFile,
    /// Maximal run of characters matching no configured pattern
    Other,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Atom => "atomic",
            TokenClass::Blank => "blank",
            TokenClass::Comment => "comment",
            TokenClass::String => "string",
            TokenClass::EndOfLine => "eol",
            TokenClass::EndOfFile => "eof",
            TokenClass::Other => "other",
        }
    }

    /// Classes a token-list collector files under "blanks" by default
    pub fn is_blank_like(&self) -> bool {
        matches!(
            self,
            TokenClass::Blank | TokenClass::Comment | TokenClass::EndOfLine
        )
    }

    pub fn all() -> [TokenClass; 7] {
        [
            TokenClass::Atom,
            TokenClass::Blank,
            TokenClass::Comment,
            TokenClass::String,
            TokenClass::EndOfLine,
            TokenClass::EndOfFile,
            TokenClass::Other,
        ]
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable token: class, literal value and 0-based source position.
///
/// `quote` and `escape_prefix` are only ever set on [`TokenClass::String`]
/// tokens; `escape_prefix` is `None` when the quote has escapes disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    class: TokenClass,
    value: String,
    line: usize,
    column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    quote: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    escape_prefix: Option<char>,
}

impl Token {
    pub fn new(class: TokenClass, value: impl Into<String>, position: Position) -> Self {
        Self {
            class,
            value: value.into(),
            line: position.line,
            column: position.column,
            quote: None,
            escape_prefix: None,
        }
    }

    pub fn string(
        value: impl Into<String>,
        position: Position,
        quote: char,
        escape_prefix: Option<char>,
    ) -> Self {
        Self {
            quote: Some(quote),
            escape_prefix,
            ..Self::new(TokenClass::String, value, position)
        }
    }

    pub fn end_of_file(position: Position) -> Self {
        Self::new(TokenClass::EndOfFile, String::new(), position)
    }

    pub fn class(&self) -> TokenClass {
        self.class
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn quote(&self) -> Option<char> {
        self.quote
    }

    pub fn escape_prefix(&self) -> Option<char> {
        self.escape_prefix
    }

    pub fn is(&self, class: TokenClass) -> bool {
        self.class == class
    }

    /// Atom with exactly this literal
    pub fn is_atom(&self, literal: &str) -> bool {
        self.class == TokenClass::Atom && self.value == literal
    }

    pub fn is_eof(&self) -> bool {
        self.class == TokenClass::EndOfFile
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type:'{}' value:'{}' at {}.{}",
            self.class,
            self.value.escape_debug(),
            self.line + 1,
            self.column + 1
        )
    }
}
