//! Declarative token definitions and the longest-match primitives over them
//!
//! `TokenDefinitions` is plain data: it never touches a stream, so every
//! matching rule can be exercised directly against a string slice.

use super::error::DefinitionError;
use crate::config::compile_time::lexical::MAX_DEFINITIONS;
use crate::escape::EscapeConverter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Accepted line terminator convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eol {
    /// `\r`
    Cr,
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl Eol {
    /// The terminator text itself
    pub fn sequence(&self) -> &'static str {
        match self {
            Eol::Cr => "\r",
            Eol::Lf => "\n",
            Eol::CrLf => "\r\n",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Eol::Cr => "CR",
            Eol::Lf => "LF",
            Eol::CrLf => "CR_LF",
        }
    }
}

impl fmt::Display for Eol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which definition set a literal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DefinitionKind {
    Atom,
    Blank,
    SingleLineComment,
    MultiLineComment,
    Eol,
    String,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DefinitionKind::Atom => "atom",
            DefinitionKind::Blank => "blank",
            DefinitionKind::SingleLineComment => "single-line comment",
            DefinitionKind::MultiLineComment => "multi-line comment",
            DefinitionKind::Eol => "end of line",
            DefinitionKind::String => "string",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiLineComment {
    pub begin: String,
    pub end: String,
}

/// A quote character and the converter for escapes inside it
#[derive(Debug, Clone)]
pub struct StringDefinition {
    pub quote: char,
    pub converter: Option<Arc<dyn EscapeConverter>>,
}

impl StringDefinition {
    /// Prefix that starts an escape, or `None` when escapes are disabled
    pub fn escape_char(&self) -> Option<char> {
        self.converter.as_ref().map(|c| c.escape_char())
    }
}

/// Frozen scanner configuration.
///
/// Every set keeps insertion order; among equally long candidates the one
/// defined first wins.
#[derive(Debug, Clone, Default)]
pub struct TokenDefinitions {
    atoms: Vec<String>,
    blanks: Vec<String>,
    sl_comments: Vec<String>,
    ml_comments: Vec<MultiLineComment>,
    eols: Vec<Eol>,
    strings: Vec<StringDefinition>,
}

/// Longest candidate that prefixes `text`; ties keep the earliest candidate
fn longest_prefix<'a, I>(candidates: I, text: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<&'a str> = None;
    for candidate in candidates {
        if text.starts_with(candidate) && best.map_or(true, |b| candidate.len() > b.len()) {
            best = Some(candidate);
        }
    }
    best
}

fn check_capacity(len: usize, kind: DefinitionKind) -> Result<(), DefinitionError> {
    if len >= MAX_DEFINITIONS {
        return Err(DefinitionError::TooManyDefinitions {
            kind,
            limit: MAX_DEFINITIONS,
        });
    }
    Ok(())
}

impl TokenDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Insertion
    // ------------------------------------------------------------------

    /// Set that already claims `literal` as a fixed token, if any
    fn owner_of(&self, literal: &str) -> Option<DefinitionKind> {
        if self.atoms.iter().any(|a| a == literal) {
            Some(DefinitionKind::Atom)
        } else if self.blanks.iter().any(|b| b == literal) {
            Some(DefinitionKind::Blank)
        } else if self.sl_comments.iter().any(|c| c == literal) {
            Some(DefinitionKind::SingleLineComment)
        } else if self.ml_comments.iter().any(|c| c.begin == literal) {
            Some(DefinitionKind::MultiLineComment)
        } else {
            None
        }
    }

    fn claim(&self, literal: &str, kind: DefinitionKind) -> Result<(), DefinitionError> {
        if literal.is_empty() {
            return Err(DefinitionError::Empty { kind });
        }
        match self.owner_of(literal) {
            Some(existing) if existing == kind => Err(DefinitionError::Duplicate {
                kind,
                value: literal.to_string(),
            }),
            Some(existing) => Err(DefinitionError::Conflict {
                value: literal.to_string(),
                existing,
            }),
            None => Ok(()),
        }
    }

    pub fn add_atom(&mut self, atom: &str) -> Result<(), DefinitionError> {
        self.claim(atom, DefinitionKind::Atom)?;
        check_capacity(self.atoms.len(), DefinitionKind::Atom)?;
        self.atoms.push(atom.to_string());
        Ok(())
    }

    pub fn add_blank(&mut self, blank: &str) -> Result<(), DefinitionError> {
        self.claim(blank, DefinitionKind::Blank)?;
        check_capacity(self.blanks.len(), DefinitionKind::Blank)?;
        self.blanks.push(blank.to_string());
        Ok(())
    }

    pub fn add_sl_comment(&mut self, prefix: &str) -> Result<(), DefinitionError> {
        self.claim(prefix, DefinitionKind::SingleLineComment)?;
        check_capacity(self.sl_comments.len(), DefinitionKind::SingleLineComment)?;
        self.sl_comments.push(prefix.to_string());
        Ok(())
    }

    /// Pairs sharing a begin marker are allowed; only the exact pair is a duplicate.
    pub fn add_ml_comment(&mut self, begin: &str, end: &str) -> Result<(), DefinitionError> {
        let kind = DefinitionKind::MultiLineComment;
        if begin.is_empty() || end.is_empty() {
            return Err(DefinitionError::Empty { kind });
        }
        if self
            .ml_comments
            .iter()
            .any(|c| c.begin == begin && c.end == end)
        {
            return Err(DefinitionError::Duplicate {
                kind,
                value: format!("{} {}", begin, end),
            });
        }
        match self.owner_of(begin) {
            Some(existing) if existing != kind => {
                return Err(DefinitionError::Conflict {
                    value: begin.to_string(),
                    existing,
                })
            }
            _ => {}
        }
        check_capacity(self.ml_comments.len(), kind)?;
        self.ml_comments.push(MultiLineComment {
            begin: begin.to_string(),
            end: end.to_string(),
        });
        Ok(())
    }

    pub fn add_eol(&mut self, eol: Eol) -> Result<(), DefinitionError> {
        if self.eols.contains(&eol) {
            return Err(DefinitionError::Duplicate {
                kind: DefinitionKind::Eol,
                value: eol.name().to_string(),
            });
        }
        self.eols.push(eol);
        Ok(())
    }

    pub fn add_string(
        &mut self,
        quote: char,
        converter: Option<Arc<dyn EscapeConverter>>,
    ) -> Result<(), DefinitionError> {
        if self.is_quote(quote) {
            return Err(DefinitionError::DuplicateQuote { quote });
        }
        check_capacity(self.strings.len(), DefinitionKind::String)?;
        self.strings.push(StringDefinition { quote, converter });
        Ok(())
    }

    /// Fall back to LF when no terminator was defined; returns true if it did
    pub(crate) fn ensure_eol(&mut self) -> bool {
        if self.eols.is_empty() {
            self.eols.push(Eol::Lf);
            true
        } else {
            false
        }
    }

    // ------------------------------------------------------------------
    // Matching
    // ------------------------------------------------------------------

    pub fn match_atom<'a>(&'a self, text: &str) -> Option<&'a str> {
        longest_prefix(self.atoms.iter().map(String::as_str), text)
    }

    pub fn match_blank<'a>(&'a self, text: &str) -> Option<&'a str> {
        longest_prefix(self.blanks.iter().map(String::as_str), text)
    }

    pub fn match_sl_comment<'a>(&'a self, text: &str) -> Option<&'a str> {
        longest_prefix(self.sl_comments.iter().map(String::as_str), text)
    }

    /// Pair whose begin marker is the longest prefix of `text`
    pub fn match_ml_comment(&self, text: &str) -> Option<&MultiLineComment> {
        let begin = longest_prefix(self.ml_comments.iter().map(|c| c.begin.as_str()), text)?;
        self.ml_comments.iter().find(|c| c.begin == begin)
    }

    pub fn string_definition(&self, quote: char) -> Option<&StringDefinition> {
        self.strings.iter().find(|s| s.quote == quote)
    }

    pub fn is_quote(&self, ch: char) -> bool {
        self.strings.iter().any(|s| s.quote == ch)
    }

    /// Whether any configured token other than OTHER can start at `text`
    pub fn starts_token(&self, text: &str) -> bool {
        self.match_ml_comment(text).is_some()
            || self.match_sl_comment(text).is_some()
            || self.match_blank(text).is_some()
            || self.match_atom(text).is_some()
            || text.chars().next().is_some_and(|c| self.is_quote(c))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn atoms(&self) -> &[String] {
        &self.atoms
    }

    pub fn blanks(&self) -> &[String] {
        &self.blanks
    }

    pub fn sl_comments(&self) -> &[String] {
        &self.sl_comments
    }

    pub fn ml_comments(&self) -> &[MultiLineComment] {
        &self.ml_comments
    }

    pub fn eols(&self) -> &[Eol] {
        &self.eols
    }

    pub fn accepts_eol(&self, eol: Eol) -> bool {
        self.eols.contains(&eol)
    }

    pub fn strings(&self) -> &[StringDefinition] {
        &self.strings
    }
}
