use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::fmt;
use stop_words::{get, LANGUAGE};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::TokenizerConfig;
use crate::error::{CondexError, Result};

/// A term produced by analysis together with its position in the input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub term: String,
    pub position: u32,
}

impl Token {
    pub fn new(term: impl Into<String>, position: u32) -> Self {
        Self {
            term: term.into(),
            position,
        }
    }
}

/// Text tokenizer with stemming and stopword removal
pub struct Tokenizer {
    config: TokenizerConfig,
    stemmer: Option<Stemmer>,
    stopwords: HashSet<String>,
}

fn language_of(name: &str) -> Option<(Algorithm, LANGUAGE)> {
    match name.to_ascii_lowercase().as_str() {
        "english" => Some((Algorithm::English, LANGUAGE::English)),
        "french" => Some((Algorithm::French, LANGUAGE::French)),
        "german" => Some((Algorithm::German, LANGUAGE::German)),
        "spanish" => Some((Algorithm::Spanish, LANGUAGE::Spanish)),
        "italian" => Some((Algorithm::Italian, LANGUAGE::Italian)),
        "portuguese" => Some((Algorithm::Portuguese, LANGUAGE::Portuguese)),
        _ => None,
    }
}

impl Tokenizer {
    /// Create a new tokenizer from configuration
    ///
    /// Fails if the configured language has no stemmer/stopword list or if the
    /// token length bounds are inverted.
    pub fn new(config: &TokenizerConfig) -> Result<Self> {
        let (algorithm, language) = language_of(&config.language).ok_or_else(|| {
            CondexError::invalid(format!("Unsupported analyzer language '{}'", config.language))
        })?;

        if config.min_token_length > config.max_token_length {
            return Err(CondexError::invalid(format!(
                "min_token_length {} is greater than max_token_length {}",
                config.min_token_length, config.max_token_length
            )));
        }

        let stemmer = config.stem.then(|| Stemmer::create(algorithm));

        let stopwords = if config.remove_stopwords {
            get(language)
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect()
        } else {
            HashSet::new()
        };

        Ok(Self {
            config: config.clone(),
            stemmer,
            stopwords,
        })
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Normalize a single word, or `None` if it is filtered out
    fn analyze_word(&self, word: &str) -> Option<String> {
        let token = if self.config.lowercase {
            word.to_lowercase()
        } else {
            word.to_string()
        };

        if token.len() < self.config.min_token_length
            || token.len() > self.config.max_token_length
            || self.stopwords.contains(&token)
        {
            return None;
        }

        Some(match &self.stemmer {
            Some(stemmer) => stemmer.stem(&token).into_owned(),
            None => token,
        })
    }

    /// Tokenize text keeping positions
    ///
    /// Filtered words (stopwords, out-of-bounds lengths) still consume a position,
    /// so phrase matching sees the gaps they leave.
    pub fn tokenize_with_positions(&self, text: &str) -> Vec<Token> {
        text.unicode_words()
            .zip(0u32..)
            .filter_map(|(word, position)| {
                self.analyze_word(word)
                    .map(|term| Token::new(term, position))
            })
            .collect()
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("config", &self.config)
            .field("stopwords", &self.stopwords.len())
            .finish_non_exhaustive()
    }
}
