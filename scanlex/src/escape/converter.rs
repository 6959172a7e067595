use crate::logging::codes;
use std::fmt::Debug;

/// One decoded escape: the produced character and the number of source
/// characters it replaced, prefix included (always at least 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeSequence {
    pub value: char,
    pub consumed: usize,
}

impl EscapeSequence {
    pub fn new(value: char, consumed: usize) -> Self {
        Self { value, consumed }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EscapeError {
    #[error("escape sequence does not start with '{expected}'")]
    MissingPrefix { expected: char },

    #[error("escape prefix at end of line")]
    Truncated,

    #[error("unrecognized escape sequence '{sequence}'")]
    Unrecognized { sequence: String },

    #[error("hexadecimal escape without digits")]
    MissingHexDigits,

    #[error("escape value {value:#x} is not a valid character")]
    InvalidCodePoint { value: u64 },
}

impl EscapeError {
    pub fn error_code(&self) -> crate::logging::Code {
        codes::lexical::INVALID_ESCAPE
    }
}

/// Pluggable decoder for escape sequences inside quoted strings.
///
/// Implementations must be pure: the same input always yields the same
/// result, so one converter can be shared by any number of tokenizers.
pub trait EscapeConverter: Send + Sync + Debug {
    /// Decode the escape at the start of `text`.
    ///
    /// `text` begins with the escape prefix and runs to the end of the
    /// current line.
    fn convert(&self, text: &str) -> Result<EscapeSequence, EscapeError>;

    /// The character that introduces an escape sequence
    fn escape_char(&self) -> char;
}

/// C-style escapes: `\' \" \\ \n \t \b \f \a \? \0`, octal `\1`..`\777`
/// and hexadecimal `\x41`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdEscapeConverter {
    prefix: char,
}

impl StdEscapeConverter {
    pub fn new(prefix: char) -> Self {
        Self { prefix }
    }

    fn decode_octal(&self, text: &str) -> Result<EscapeSequence, EscapeError> {
        let digits: Vec<u32> = text
            .chars()
            .take(3)
            .map_while(|c| c.to_digit(8))
            .collect();

        let value = digits.iter().fold(0u32, |acc, d| acc * 8 + d);
        let ch = char::from_u32(value).ok_or(EscapeError::InvalidCodePoint {
            value: u64::from(value),
        })?;

        Ok(EscapeSequence::new(ch, digits.len() + 1))
    }

    fn decode_hex(&self, text: &str) -> Result<EscapeSequence, EscapeError> {
        let digits: Vec<u32> = text.chars().map_while(|c| c.to_digit(16)).collect();
        if digits.is_empty() {
            return Err(EscapeError::MissingHexDigits);
        }

        let mut value: u64 = 0;
        for d in &digits {
            value = value
                .checked_mul(16)
                .and_then(|v| v.checked_add(u64::from(*d)))
                .filter(|v| *v <= u64::from(u32::MAX))
                .ok_or(EscapeError::InvalidCodePoint { value })?;
        }

        let ch = u32::try_from(value)
            .ok()
            .and_then(char::from_u32)
            .ok_or(EscapeError::InvalidCodePoint { value })?;

        Ok(EscapeSequence::new(ch, digits.len() + 2))
    }
}

impl Default for StdEscapeConverter {
    fn default() -> Self {
        Self::new('\\')
    }
}

impl EscapeConverter for StdEscapeConverter {
    fn convert(&self, text: &str) -> Result<EscapeSequence, EscapeError> {
        let mut chars = text.chars();
        if chars.next() != Some(self.prefix) {
            return Err(EscapeError::MissingPrefix {
                expected: self.prefix,
            });
        }

        let rest = chars.as_str();
        let selector = chars.next().ok_or(EscapeError::Truncated)?;

        let simple = match selector {
            '\'' | '"' | '?' | '\\' => Some(selector),
            'n' => Some('\n'),
            't' => Some('\t'),
            'b' => Some('\u{08}'),
            'f' => Some('\u{0C}'),
            'a' => Some('\u{07}'),
            '0' => Some('\0'),
            c if c == self.prefix => Some(c),
            _ => None,
        };

        if let Some(ch) = simple {
            return Ok(EscapeSequence::new(ch, 2));
        }

        match selector {
            '1'..='7' => self.decode_octal(rest),
            'x' | 'X' => self.decode_hex(chars.as_str()),
            other => Err(EscapeError::Unrecognized {
                sequence: format!("{}{}", self.prefix, other),
            }),
        }
    }

    fn escape_char(&self) -> char {
        self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn decode(text: &str) -> Result<EscapeSequence, EscapeError> {
        StdEscapeConverter::default().convert(text)
    }

    #[test]
    fn test_single_character_escapes_consume_two() {
        let cases = [
            ("\\'", '\''),
            ("\\\"", '"'),
            ("\\\\", '\\'),
            ("\\n", '\n'),
            ("\\t", '\t'),
            ("\\b", '\u{08}'),
            ("\\f", '\u{0C}'),
            ("\\a", '\u{07}'),
            ("\\?", '?'),
            ("\\0", '\0'),
        ];

        for (text, expected) in cases {
            assert_eq!(decode(text), Ok(EscapeSequence::new(expected, 2)), "{}", text);
        }
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        assert_eq!(decode("\\nrest\""), Ok(EscapeSequence::new('\n', 2)));
    }

    #[test]
    fn test_octal_escapes() {
        assert_eq!(decode("\\101"), Ok(EscapeSequence::new('A', 4)));
        assert_eq!(decode("\\12"), Ok(EscapeSequence::new('\n', 3)));
        assert_eq!(decode("\\7x"), Ok(EscapeSequence::new('\u{07}', 2)));
        // At most three digits
        assert_eq!(decode("\\1011"), Ok(EscapeSequence::new('A', 4)));
        assert_eq!(decode("\\777"), Ok(EscapeSequence::new('\u{1FF}', 4)));
    }

    #[test]
    fn test_zero_is_a_single_character_escape() {
        assert_eq!(decode("\\012"), Ok(EscapeSequence::new('\0', 2)));
        assert_eq!(decode("\\00"), Ok(EscapeSequence::new('\0', 2)));
    }

    #[test]
    fn test_hex_escapes() {
        assert_eq!(decode("\\x41"), Ok(EscapeSequence::new('A', 4)));
        assert_eq!(decode("\\X7e\""), Ok(EscapeSequence::new('~', 4)));
        assert_eq!(decode("\\x3c9"), Ok(EscapeSequence::new('\u{3C9}', 5)));
    }

    #[test]
    fn test_hex_escape_accepts_letter_f() {
        assert_eq!(decode("\\xff"), Ok(EscapeSequence::new('\u{FF}', 4)));
        assert_eq!(decode("\\xF"), Ok(EscapeSequence::new('\u{0F}', 3)));
        assert_eq!(decode("\\x1Fg"), Ok(EscapeSequence::new('\u{1F}', 4)));
    }

    #[test]
    fn test_hex_escape_without_digits_fails() {
        assert_eq!(decode("\\x"), Err(EscapeError::MissingHexDigits));
        assert_eq!(decode("\\xg1"), Err(EscapeError::MissingHexDigits));
    }

    #[test]
    fn test_hex_escape_out_of_range_fails() {
        assert_matches!(decode("\\xd800"), Err(EscapeError::InvalidCodePoint { .. }));
        assert_matches!(
            decode("\\xffffffffff"),
            Err(EscapeError::InvalidCodePoint { .. })
        );
    }

    #[test]
    fn test_unrecognized_and_truncated() {
        assert_matches!(
            decode("\\q"),
            Err(EscapeError::Unrecognized { sequence }) if sequence == "\\q"
        );
        assert_eq!(decode("\\"), Err(EscapeError::Truncated));
        assert_eq!(
            decode("n"),
            Err(EscapeError::MissingPrefix { expected: '\\' })
        );
    }

    #[test]
    fn test_custom_prefix() {
        let converter = StdEscapeConverter::new('^');
        assert_eq!(converter.escape_char(), '^');
        assert_eq!(converter.convert("^n"), Ok(EscapeSequence::new('\n', 2)));
        assert_eq!(converter.convert("^^"), Ok(EscapeSequence::new('^', 2)));
        assert_matches!(converter.convert("\\n"), Err(EscapeError::MissingPrefix { .. }));
    }

    #[test]
    fn test_error_code() {
        assert_eq!(
            EscapeError::Truncated.error_code(),
            codes::lexical::INVALID_ESCAPE
        );
    }
}
