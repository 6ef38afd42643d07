//! Phrase query - matches a sequence of analyzed terms
//!
//! Each term carries the position the analyzer gave it, so gaps left by
//! removed stopwords must also appear between the matched terms.

use crate::error::CondexError;
use crate::models::Document;
use crate::query::ast::{boost_suffix, QueryNode};
use crate::query::context::QueryContext;
use crate::tokenizer::Token;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Query that matches an ordered sequence of terms
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhraseQuery {
    /// Field to search in
    pub field: String,
    /// Terms in phrase order
    pub terms: Vec<String>,
    /// Position of each term relative to the first one
    pub positions: Vec<u32>,
    /// Boost factor for scoring
    #[serde(default = "default_boost")]
    pub boost: f32,
}

fn default_boost() -> f32 {
    1.0
}

impl PhraseQuery {
    /// Create an exact phrase query from analyzed tokens
    pub fn new(field: impl Into<String>, tokens: Vec<Token>) -> Self {
        let first = tokens.first().map(|t| t.position).unwrap_or(0);
        let (terms, positions) = tokens
            .into_iter()
            .map(|t| (t.term, t.position.saturating_sub(first)))
            .unzip();
        Self {
            field: field.into(),
            terms,
            positions,
            boost: 1.0,
        }
    }

    /// Set the boost factor
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl QueryNode for PhraseQuery {
    fn matches(&self, ctx: &QueryContext<'_>, doc: &Document) -> Result<bool> {
        if self.terms.len() != self.positions.len() {
            return Err(CondexError::invalid(format!(
                "Phrase query on '{}' has {} terms but {} positions",
                self.field,
                self.terms.len(),
                self.positions.len()
            )));
        }
        if self.terms.is_empty() {
            return Ok(false);
        }

        let mut by_term: HashMap<&str, Vec<u32>> = HashMap::new();
        let tokens = ctx.terms(doc, &self.field)?;
        for token in &tokens {
            by_term
                .entry(token.term.as_str())
                .or_default()
                .push(token.position);
        }

        let mut term_positions = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            match by_term.get(term.as_str()) {
                Some(positions) => term_positions.push(positions.as_slice()),
                None => return Ok(false),
            }
        }

        Ok(positions_form_phrase(&term_positions, &self.positions))
    }

    fn query_type(&self) -> &'static str {
        "phrase"
    }

    fn boost(&self) -> f32 {
        self.boost
    }
}

impl fmt::Display for PhraseQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::new();
        let mut next = 0u32;
        for (term, &position) in self.terms.iter().zip(&self.positions) {
            while next < position {
                parts.push("?");
                next += 1;
            }
            parts.push(term);
            next = position + 1;
        }

        write!(f, "{}:\"{}\"", self.field, parts.join(" "))?;
        f.write_str(&boost_suffix(self.boost))
    }
}

/// Check if term positions form the phrase
///
/// `term_positions[i]` lists where the i-th phrase term occurs in the document
/// and `offsets[i]` is where it sits in the phrase.
fn positions_form_phrase(term_positions: &[&[u32]], offsets: &[u32]) -> bool {
    let (Some(first), Some(&base)) = (term_positions.first(), offsets.first()) else {
        return term_positions.is_empty();
    };

    first.iter().any(|&start| {
        term_positions
            .iter()
            .zip(offsets)
            .all(|(positions, &offset)| {
                positions.contains(&start.saturating_add(offset.saturating_sub(base)))
            })
    })
}
