//! Accumulates token definitions and hands them to a tokenizer exactly once

use super::definitions::{Eol, TokenDefinitions};
use super::error::DefinitionError;
use super::tokenizer::Tokenizer;
use crate::config::runtime::TokenizerPreferences;
use crate::escape::EscapeConverter;
use crate::logging::codes;
use crate::{log_error, log_success};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct TokenizerBuilder {
    definitions: TokenDefinitions,
}

/// Log a rejected definition and pass the result through
fn logged(result: Result<(), DefinitionError>) -> Result<(), DefinitionError> {
    if let Err(e) = &result {
        log_error!(e.error_code(), "Token definition rejected", "reason" => e);
    }
    result
}

impl TokenizerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn def_atom(&mut self, atom: &str) -> Result<(), DefinitionError> {
        logged(self.definitions.add_atom(atom))
    }

    pub fn def_blank(&mut self, blank: &str) -> Result<(), DefinitionError> {
        logged(self.definitions.add_blank(blank))
    }

    pub fn def_sl_comment(&mut self, prefix: &str) -> Result<(), DefinitionError> {
        logged(self.definitions.add_sl_comment(prefix))
    }

    pub fn def_ml_comment(&mut self, begin: &str, end: &str) -> Result<(), DefinitionError> {
        logged(self.definitions.add_ml_comment(begin, end))
    }

    pub fn def_eol(&mut self, eol: Eol) -> Result<(), DefinitionError> {
        logged(self.definitions.add_eol(eol))
    }

    /// Define a quote character; `None` disables escapes inside it
    pub fn def_string(
        &mut self,
        quote: char,
        converter: Option<Arc<dyn EscapeConverter>>,
    ) -> Result<(), DefinitionError> {
        logged(self.definitions.add_string(quote, converter))
    }

    /// Define several atoms, stopping at the first rejected one
    pub fn def_atoms<'a, I>(&mut self, atoms: I) -> Result<(), DefinitionError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        atoms.into_iter().try_for_each(|atom| self.def_atom(atom))
    }

    pub fn def_blanks<'a, I>(&mut self, blanks: I) -> Result<(), DefinitionError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        blanks.into_iter().try_for_each(|blank| self.def_blank(blank))
    }

    pub fn definitions(&self) -> &TokenDefinitions {
        &self.definitions
    }

    pub fn into_definitions(self) -> TokenDefinitions {
        self.definitions
    }

    pub fn build(self) -> Tokenizer {
        self.build_with_preferences(TokenizerPreferences::default())
    }

    pub fn build_with_preferences(self, preferences: TokenizerPreferences) -> Tokenizer {
        let definitions = self.definitions;
        log_success!(codes::success::TOKENIZER_BUILT, "Tokenizer built",
            "atoms" => definitions.atoms().len(),
            "blanks" => definitions.blanks().len(),
            "comments" => definitions.sl_comments().len() + definitions.ml_comments().len(),
            "strings" => definitions.strings().len()
        );
        Tokenizer::with_preferences(definitions, preferences)
    }
}
