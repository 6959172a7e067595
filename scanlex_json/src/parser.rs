//! Recursive-descent JSON parser driven by the scanlex tokenizer
//!
//! The parser never sees characters. It pulls significant tokens (blanks,
//! line ends and comments are skipped) and assembles them into a
//! [`JsonValue`]. Keywords and numbers arrive as OTHER tokens.

use crate::error::{JsonError, JsonResult};
use crate::value::JsonValue;
use scanlex::config::compile_time::syntax::MAX_PARSE_DEPTH;
use scanlex::lexical::{Eol, LineSource, Tokenizer, TokenizerBuilder};
use scanlex::logging::codes;
use scanlex::tokens::{Token, TokenClass};
use scanlex::{log_error, log_success, Position, StdEscapeConverter};
use std::sync::Arc;

/// Tokenizer configuration for JSON text
pub fn json_grammar() -> JsonResult<TokenizerBuilder> {
    let mut builder = TokenizerBuilder::new();
    builder.def_atoms(["[", "]", "{", "}", ";", ",", ":"])?;
    // CR is a blank so CRLF files scan with LF as the only terminator
    builder.def_blanks([" ", "\r", "\t"])?;
    builder.def_eol(Eol::Lf)?;
    builder.def_string('"', Some(Arc::new(StdEscapeConverter::default())))?;
    Ok(builder)
}

fn parse_number(token: &Token) -> JsonResult<JsonValue> {
    let text = token.value();
    let invalid = || JsonError::InvalidValue {
        value: text.to_string(),
        position: token.position(),
    };

    let leading_ok = text
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '.');
    if !leading_ok {
        return Err(invalid());
    }

    if text.contains(&['.', 'e', 'E'][..]) {
        text.parse::<f64>().map(JsonValue::Float).map_err(|_| invalid())
    } else {
        text.parse::<i64>().map(JsonValue::Integer).map_err(|_| invalid())
    }
}

pub struct JsonParser {
    tokenizer: Tokenizer,
}

impl JsonParser {
    pub fn new() -> JsonResult<Self> {
        Ok(Self {
            tokenizer: json_grammar()?.build(),
        })
    }

    /// Parse one document; `Ok(None)` when the input holds no tokens at all
    pub fn parse<S: LineSource + ?Sized>(mut self, source: &mut S) -> JsonResult<Option<JsonValue>> {
        let result = self.parse_document(source);

        match &result {
            Ok(Some(value)) => {
                log_success!(codes::success::DOCUMENT_PARSED, "JSON document parsed",
                    "root" => value.type_name()
                );
            }
            Ok(None) => {}
            // Scan errors were already reported by the tokenizer
            Err(JsonError::Scan(_)) => {}
            Err(e) => {
                let position = e.position().unwrap_or_default();
                log_error!(e.error_code(), "JSON parsing failed",
                    position = position,
                    "reason" => e
                );
            }
        }

        result
    }

    fn next_significant<S: LineSource + ?Sized>(&mut self, source: &mut S) -> JsonResult<Token> {
        loop {
            let token = self.tokenizer.next_token(source)?;
            if !token.class().is_blank_like() {
                return Ok(token);
            }
        }
    }

    fn parse_document<S: LineSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> JsonResult<Option<JsonValue>> {
        let token = self.next_significant(source)?;
        if token.is_eof() {
            return Ok(None);
        }

        let root = if token.is_atom("{") {
            self.parse_object(source, token.position(), 1)?
        } else if token.is_atom("[") {
            self.parse_array(source, token.position(), 1)?
        } else {
            return Err(JsonError::OpenBraceExpected {
                position: token.position(),
            });
        };

        let trailing = self.next_significant(source)?;
        if !trailing.is_eof() {
            return Err(JsonError::TrailingContent {
                position: trailing.position(),
            });
        }

        Ok(Some(root))
    }

    fn parse_value<S: LineSource + ?Sized>(
        &mut self,
        source: &mut S,
        token: Token,
        depth: usize,
    ) -> JsonResult<JsonValue> {
        match token.class() {
            TokenClass::String => Ok(JsonValue::String(token.into_value())),
            TokenClass::Atom if token.value() == "{" => {
                self.parse_object(source, token.position(), depth + 1)
            }
            TokenClass::Atom if token.value() == "[" => {
                self.parse_array(source, token.position(), depth + 1)
            }
            TokenClass::Other => match token.value() {
                "null" => Ok(JsonValue::Null),
                "true" => Ok(JsonValue::Bool(true)),
                "false" => Ok(JsonValue::Bool(false)),
                _ => parse_number(&token),
            },
            _ => Err(JsonError::ValueExpected {
                position: token.position(),
            }),
        }
    }

    fn check_depth(depth: usize, position: Position) -> JsonResult<()> {
        if depth > MAX_PARSE_DEPTH {
            return Err(JsonError::MaxDepthExceeded { position });
        }
        Ok(())
    }

    fn parse_object<S: LineSource + ?Sized>(
        &mut self,
        source: &mut S,
        open: Position,
        depth: usize,
    ) -> JsonResult<JsonValue> {
        Self::check_depth(depth, open)?;

        let mut members = Vec::new();
        let mut token = self.next_significant(source)?;
        if token.is_atom("}") {
            return Ok(JsonValue::Object(members));
        }

        loop {
            if !token.is(TokenClass::String) {
                return Err(JsonError::StringExpected {
                    position: token.position(),
                });
            }
            let key = token.into_value();

            let colon = self.next_significant(source)?;
            if !colon.is_atom(":") {
                return Err(JsonError::ColonExpected {
                    position: colon.position(),
                });
            }

            let value_token = self.next_significant(source)?;
            let value = self.parse_value(source, value_token, depth)?;
            members.push((key, value));

            let delimiter = self.next_significant(source)?;
            if delimiter.is_atom("}") {
                return Ok(JsonValue::Object(members));
            }
            if !delimiter.is_atom(",") {
                return Err(JsonError::CloseBraceExpected {
                    position: delimiter.position(),
                });
            }
            token = self.next_significant(source)?;
        }
    }

    fn parse_array<S: LineSource + ?Sized>(
        &mut self,
        source: &mut S,
        open: Position,
        depth: usize,
    ) -> JsonResult<JsonValue> {
        Self::check_depth(depth, open)?;

        let mut items = Vec::new();
        let mut token = self.next_significant(source)?;
        if token.is_atom("]") {
            return Ok(JsonValue::Array(items));
        }

        loop {
            items.push(self.parse_value(source, token, depth)?);

            let delimiter = self.next_significant(source)?;
            if delimiter.is_atom("]") {
                return Ok(JsonValue::Array(items));
            }
            if !delimiter.is_atom(",") {
                return Err(JsonError::CloseBracketExpected {
                    position: delimiter.position(),
                });
            }
            token = self.next_significant(source)?;
        }
    }
}

/// Parse a complete document held in memory
pub fn parse_str(text: &str) -> JsonResult<Option<JsonValue>> {
    let mut source = text.as_bytes();
    JsonParser::new()?.parse(&mut source)
}
