//! Collects a whole input into token vectors, splitting off insignificant tokens

use super::token::{Token, TokenClass};
use crate::config::runtime::TokenizerPreferences;
use crate::lexical::{LineSource, TokenizerBuilder, TokenizerError};
use crate::logging::codes;
use crate::log_success;
use serde::Serialize;
use std::collections::HashSet;

/// Every token of one input except END_OF_FILE, in source order per list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenList {
    pub significant: Vec<Token>,
    pub blanks: Vec<Token>,
}

impl TokenList {
    pub fn len(&self) -> usize {
        self.significant.len() + self.blanks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.significant.is_empty() && self.blanks.is_empty()
    }

    /// Both lists merged back into source order
    pub fn all_tokens(&self) -> Vec<&Token> {
        let mut all: Vec<&Token> = self.significant.iter().chain(&self.blanks).collect();
        all.sort_by_key(|t| t.position());
        all
    }
}

/// One-shot collector: consumes a builder and drains one source with it
#[derive(Debug)]
pub struct TokenListBuilder {
    builder: TokenizerBuilder,
    blank_classes: HashSet<TokenClass>,
    preferences: TokenizerPreferences,
}

impl TokenListBuilder {
    pub fn new(builder: TokenizerBuilder) -> Self {
        Self {
            builder,
            blank_classes: TokenClass::all()
                .into_iter()
                .filter(TokenClass::is_blank_like)
                .collect(),
            preferences: TokenizerPreferences::default(),
        }
    }

    /// Preferences for the tokenizer built at collection time
    pub fn with_preferences(mut self, preferences: TokenizerPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn preferences(&self) -> &TokenizerPreferences {
        &self.preferences
    }

    /// Replace the classes filed under `blanks`
    pub fn with_blank_classes<I>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = TokenClass>,
    {
        self.blank_classes = classes.into_iter().collect();
        self
    }

    pub fn collect<S: LineSource + ?Sized>(self, source: &mut S) -> Result<TokenList, TokenizerError> {
        let mut tokenizer = self.builder.build_with_preferences(self.preferences);
        let mut list = TokenList::default();

        for token in tokenizer.tokens(source) {
            let token = token?;
            if token.is_eof() {
                break;
            }
            if self.blank_classes.contains(&token.class()) {
                list.blanks.push(token);
            } else {
                list.significant.push(token);
            }
        }

        log_success!(codes::success::TOKEN_LIST_COLLECTED, "Token list collected",
            "significant" => list.significant.len(),
            "blanks" => list.blanks.len()
        );

        Ok(list)
    }

    pub fn collect_significant<S: LineSource + ?Sized>(
        self,
        source: &mut S,
    ) -> Result<Vec<Token>, TokenizerError> {
        self.collect(source).map(|list| list.significant)
    }
}
