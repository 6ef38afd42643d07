//! Text analysis: tokenizers and the analyzers built on them

mod analyzer;
mod tokenizer;

pub use analyzer::Analyzer;
pub use tokenizer::{Token, Tokenizer};
