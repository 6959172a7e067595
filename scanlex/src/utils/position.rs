//! Source location tracking
//!
//! Positions are stored 0-based, exactly as the tokenizer counts them.
//! Human-facing output (the `Display` impl and every diagnostic built on it)
//! adds one to both components.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with 0-based line and column.
///
/// Columns count Unicode scalar values consumed from the start of the line,
/// not bytes and not decoded string length.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Line number (0-based)
    pub line: usize,
    /// Column number (0-based)
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Line 0, column 0
    pub fn start() -> Self {
        Self::default()
    }

    /// Same line, `count` characters further right
    pub fn advance(self, count: usize) -> Self {
        Self {
            line: self.line,
            column: self.column + count,
        }
    }

    /// Advance over `text`, moving to a new line on every terminator it contains.
    ///
    /// `\r\n` counts as a single terminator; a lone `\r` or `\n` counts as one each.
    pub fn advance_str(self, text: &str) -> Self {
        let mut pos = self;
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    pos = pos.next_line();
                }
                '\n' => pos = pos.next_line(),
                _ => pos.column += 1,
            }
        }
        pos
    }

    /// Start of the following line
    pub fn next_line(self) -> Self {
        Self {
            line: self.line + 1,
            column: 0,
        }
    }

    /// 1-based line number for diagnostics
    pub fn display_line(&self) -> usize {
        self.line + 1
    }

    /// 1-based column number for diagnostics
    pub fn display_column(&self) -> usize {
        self.column + 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.display_line(), self.display_column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_origin() {
        let pos = Position::start();
        assert_eq!(pos.line, 0);
        assert_eq!(pos.column, 0);
    }

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(Position::new(0, 0).to_string(), "1:1");
        assert_eq!(Position::new(4, 11).to_string(), "5:12");
    }

    #[test]
    fn test_advance_counts_characters() {
        let pos = Position::new(2, 3).advance(4);
        assert_eq!(pos, Position::new(2, 7));
    }

    #[test]
    fn test_advance_str_handles_every_terminator() {
        let pos = Position::start().advance_str("ab\r\ncd\ne\rfgh");
        assert_eq!(pos, Position::new(3, 3));
    }

    #[test]
    fn test_advance_str_counts_scalars_not_bytes() {
        let pos = Position::start().advance_str("héllo");
        assert_eq!(pos.column, 5);
    }

    #[test]
    fn test_ordering_is_line_major() {
        assert!(Position::new(1, 0) > Position::new(0, 99));
        assert!(Position::new(1, 2) < Position::new(1, 3));
    }
}
