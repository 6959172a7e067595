//! Pull-based scanner over a line source
//!
//! Each `next_token` call produces exactly one token. Candidates are tried
//! in a fixed order (multi-line comment, single-line comment, blank, atom,
//! string) and the first family with a match wins; within a family the
//! longest literal wins. Text matching nothing becomes an OTHER token that
//! runs up to the next position where something else could start.

use super::definitions::{Eol, MultiLineComment, StringDefinition, TokenDefinitions};
use super::error::TokenizerError;
use super::metrics::ScanMetrics;
use super::reader::{LineSource, SourceLine};
use crate::config::compile_time::lexical::{MAX_COMMENT_LENGTH, MAX_STRING_SIZE};
use crate::config::runtime::TokenizerPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use crate::tokens::{Token, TokenClass};
use crate::utils::Position;
use std::sync::Arc;

/// Mutable read position; `pos` is a byte offset, `column` counts chars
#[derive(Debug, Default)]
struct ScanCursor {
    line: String,
    pos: usize,
    column: usize,
    line_number: usize,
    pending_eol: Option<Eol>,
    eof: bool,
}

impl ScanCursor {
    fn rest(&self) -> &str {
        &self.line[self.pos..]
    }

    fn is_exhausted(&self) -> bool {
        self.pos >= self.line.len()
    }

    fn position(&self) -> Position {
        Position::new(self.line_number, self.column)
    }

    /// Take `bytes` bytes off the front of the remaining line
    fn consume(&mut self, bytes: usize) -> &str {
        let start = self.pos;
        self.pos = (start + bytes).min(self.line.len());
        let taken = &self.line[start..self.pos];
        self.column += taken.chars().count();
        taken
    }

    fn set_line(&mut self, line: SourceLine) {
        self.line = line.text;
        self.pos = 0;
        self.column = 0;
        self.pending_eol = line.eol;
    }

    fn next_line(&mut self) {
        self.line.clear();
        self.pos = 0;
        self.column = 0;
        self.line_number += 1;
    }
}

/// Byte length of the first `count` chars of `text`
fn byte_len(text: &str, count: usize) -> usize {
    text.char_indices()
        .nth(count)
        .map_or(text.len(), |(index, _)| index)
}

#[derive(Debug)]
pub struct Tokenizer {
    definitions: Arc<TokenDefinitions>,
    cursor: ScanCursor,
    preferences: TokenizerPreferences,
    metrics: ScanMetrics,
    finished: bool,
}

impl Tokenizer {
    pub fn new(definitions: TokenDefinitions) -> Self {
        Self::with_preferences(definitions, TokenizerPreferences::default())
    }

    pub fn with_preferences(
        mut definitions: TokenDefinitions,
        preferences: TokenizerPreferences,
    ) -> Self {
        if definitions.ensure_eol() {
            log_debug!("No line terminator defined, accepting LF");
        }

        Self {
            definitions: Arc::new(definitions),
            cursor: ScanCursor::default(),
            preferences,
            metrics: ScanMetrics::default(),
            finished: false,
        }
    }

    pub fn definitions(&self) -> &TokenDefinitions {
        &self.definitions
    }

    pub fn preferences(&self) -> &TokenizerPreferences {
        &self.preferences
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    /// Whether END_OF_FILE has been produced
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Produce the next token from `source`.
    ///
    /// Once END_OF_FILE has been returned every further call returns it
    /// again without touching the source. After an error the tokenizer
    /// state is unspecified and scanning should stop.
    pub fn next_token<S: LineSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Token, TokenizerError> {
        let token = self.scan(source).map_err(|e| {
            log_error!(e.error_code(), "Scanning failed",
                position = e.position(),
                "reason" => e
            );
            e
        })?;

        if token.is_eof() {
            if self.finished {
                return Ok(token);
            }
            self.finished = true;
        }

        if self.preferences.collect_metrics {
            self.metrics.record_token(&token);
        }

        if self.preferences.trace_tokens {
            log_debug!("Token produced",
                "class" => token.class(),
                "value" => token.value().escape_debug(),
                "position" => token.position()
            );
        }

        if token.is_eof() && self.preferences.log_completion {
            log_success!(codes::success::TOKENIZATION_COMPLETE, "Reached end of input",
                "tokens" => self.metrics.total_tokens,
                "lines" => self.metrics.lines_read
            );
        }

        Ok(token)
    }

    /// Iterate tokens up to and including END_OF_FILE, or up to the first error
    pub fn tokens<'a, S: LineSource + ?Sized>(&'a mut self, source: &'a mut S) -> Tokens<'a, S> {
        Tokens {
            tokenizer: self,
            source,
            done: false,
        }
    }

    fn load_line<S: LineSource + ?Sized>(&mut self, source: &mut S) -> Result<(), TokenizerError> {
        match source.next_line(self.definitions.eols(), self.cursor.line_number)? {
            Some(line) => {
                self.metrics.record_line();
                self.cursor.set_line(line);
            }
            None => self.cursor.eof = true,
        }
        Ok(())
    }

    fn scan<S: LineSource + ?Sized>(&mut self, source: &mut S) -> Result<Token, TokenizerError> {
        while self.cursor.is_exhausted() {
            if let Some(eol) = self.cursor.pending_eol.take() {
                let token = Token::new(TokenClass::EndOfLine, eol.sequence(), self.cursor.position());
                self.cursor.next_line();
                return Ok(token);
            }
            if self.cursor.eof {
                return Ok(Token::end_of_file(Position::new(self.cursor.line_number, 0)));
            }
            self.load_line(source)?;
        }

        let definitions = Arc::clone(&self.definitions);
        let rest = self.cursor.rest();

        if let Some(pair) = definitions.match_ml_comment(rest) {
            return self.scan_ml_comment(source, pair);
        }
        if let Some(prefix) = definitions.match_sl_comment(rest) {
            return self.scan_sl_comment(prefix);
        }
        if let Some(blank) = definitions.match_blank(rest) {
            return Ok(self.fixed(TokenClass::Blank, blank));
        }
        if let Some(atom) = definitions.match_atom(rest) {
            return Ok(self.fixed(TokenClass::Atom, atom));
        }
        if let Some(definition) = rest
            .chars()
            .next()
            .and_then(|c| definitions.string_definition(c))
        {
            return self.scan_string(definition);
        }

        Ok(self.scan_other(&definitions))
    }

    fn fixed(&mut self, class: TokenClass, literal: &str) -> Token {
        let start = self.cursor.position();
        self.cursor.consume(literal.len());
        Token::new(class, literal, start)
    }

    fn scan_ml_comment<S: LineSource + ?Sized>(
        &mut self,
        source: &mut S,
        pair: &MultiLineComment,
    ) -> Result<Token, TokenizerError> {
        let start = self.cursor.position();
        let unterminated = || TokenizerError::UnterminatedComment {
            begin: pair.begin.clone(),
            position: start,
        };

        self.cursor.consume(pair.begin.len());
        let mut value = String::new();
        let mut length = 0;

        loop {
            let closing = self.cursor.rest().find(pair.end.as_str());
            let body_len = closing.unwrap_or(self.cursor.rest().len());
            let body = self.cursor.consume(body_len);
            length += body.chars().count();
            value.push_str(body);

            if length > MAX_COMMENT_LENGTH {
                return Err(TokenizerError::CommentTooLong { position: start });
            }

            if closing.is_some() {
                self.cursor.consume(pair.end.len());
                return Ok(Token::new(TokenClass::Comment, value, start));
            }

            // The comment continues on the next line, terminator included
            let eol = self.cursor.pending_eol.take().ok_or_else(unterminated)?;
            value.push_str(eol.sequence());
            length += eol.sequence().len();
            self.cursor.next_line();
            self.load_line(source)?;
            if self.cursor.eof {
                return Err(unterminated());
            }
        }
    }

    fn scan_sl_comment(&mut self, prefix: &str) -> Result<Token, TokenizerError> {
        let start = self.cursor.position();
        self.cursor.consume(prefix.len());

        let remaining = self.cursor.rest().len();
        let value = self.cursor.consume(remaining).to_string();
        if value.chars().count() > MAX_COMMENT_LENGTH {
            return Err(TokenizerError::CommentTooLong { position: start });
        }

        Ok(Token::new(TokenClass::Comment, value, start))
    }

    fn scan_string(&mut self, definition: &StringDefinition) -> Result<Token, TokenizerError> {
        let start = self.cursor.position();
        let quote = definition.quote;
        self.cursor.consume(quote.len_utf8());

        let mut value = String::new();
        let mut length = 0;

        loop {
            let Some(ch) = self.cursor.rest().chars().next() else {
                return Err(TokenizerError::UnterminatedString {
                    quote,
                    position: start,
                });
            };

            if ch == quote {
                self.cursor.consume(ch.len_utf8());
                return Ok(Token::string(value, start, quote, definition.escape_char()));
            }

            match &definition.converter {
                Some(converter) if ch == converter.escape_char() => {
                    let rest = self.cursor.rest();
                    let escape = converter
                        .convert(rest)
                        .map_err(|source| TokenizerError::InvalidEscape {
                            position: self.cursor.position(),
                            source,
                        })?;
                    // A converter must make progress
                    let bytes = byte_len(rest, escape.consumed.max(1));
                    self.cursor.consume(bytes);
                    value.push(escape.value);
                }
                _ => {
                    self.cursor.consume(ch.len_utf8());
                    value.push(ch);
                }
            }

            length += 1;
            if length > MAX_STRING_SIZE {
                return Err(TokenizerError::StringTooLarge { position: start });
            }
        }
    }

    fn scan_other(&mut self, definitions: &TokenDefinitions) -> Token {
        let start = self.cursor.position();
        let rest = self.cursor.rest();
        let end = rest
            .char_indices()
            .skip(1)
            .find(|(index, _)| definitions.starts_token(&rest[*index..]))
            .map_or(rest.len(), |(index, _)| index);

        let value = self.cursor.consume(end).to_string();
        Token::new(TokenClass::Other, value, start)
    }
}

/// Iterator returned by [`Tokenizer::tokens`]
pub struct Tokens<'a, S: LineSource + ?Sized> {
    tokenizer: &'a mut Tokenizer,
    source: &'a mut S,
    done: bool,
}

impl<S: LineSource + ?Sized> Iterator for Tokens<'_, S> {
    type Item = Result<Token, TokenizerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.tokenizer.next_token(&mut *self.source);
        self.done = match &result {
            Ok(token) => token.is_eof(),
            Err(_) => true,
        };
        Some(result)
    }
}
