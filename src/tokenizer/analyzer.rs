//! Analyzers turn field text into the terms a query is built from.

use super::tokenizer::{Token, Tokenizer};
use crate::config::TokenizerConfig;
use crate::Result;

/// Text analysis strategy for a field
#[derive(Debug)]
pub enum Analyzer {
    /// The whole value is one term, untouched
    Keyword,
    /// Free text split into words and normalized by a tokenizer
    Text(Tokenizer),
}

impl Analyzer {
    /// Build a text analyzer from tokenizer settings
    pub fn text(config: &TokenizerConfig) -> Result<Self> {
        Ok(Analyzer::Text(Tokenizer::new(config)?))
    }

    /// Analyze text into positioned tokens
    ///
    /// The keyword analyzer yields nothing for an empty value so that an empty
    /// match degrades to a query matching no documents.
    pub fn analyze(&self, text: &str) -> Vec<Token> {
        match self {
            Analyzer::Keyword => vec![Token::new(text, 0)],
            Analyzer::Text(tokenizer) => tokenizer.tokenize_with_positions(text),
        }
    }
}
