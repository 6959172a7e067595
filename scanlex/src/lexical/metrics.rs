use crate::tokens::{Token, TokenClass};
use serde::Serialize;
use std::collections::HashMap;

/// Counters gathered while scanning one input
#[derive(Debug, Default, Clone, Serialize)]
pub struct ScanMetrics {
    pub total_tokens: usize,
    pub lines_read: usize,
    pub max_comment_length: usize,
    pub max_string_length: usize,
    pub class_counts: HashMap<TokenClass, usize>,
}

impl ScanMetrics {
    pub(crate) fn record_token(&mut self, token: &Token) {
        self.total_tokens += 1;
        *self.class_counts.entry(token.class()).or_insert(0) += 1;

        let length = token.value().chars().count();
        match token.class() {
            TokenClass::Comment => self.max_comment_length = self.max_comment_length.max(length),
            TokenClass::String => self.max_string_length = self.max_string_length.max(length),
            _ => {}
        }
    }

    pub(crate) fn record_line(&mut self) {
        self.lines_read += 1;
    }

    pub fn count(&self, class: TokenClass) -> usize {
        self.class_counts.get(&class).copied().unwrap_or(0)
    }
}
