//! Prefix query - matches terms starting with a prefix

use crate::models::Document;
use crate::query::ast::{boost_suffix, QueryNode};
use crate::query::context::QueryContext;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Query that matches terms starting with a prefix
///
/// This is the cheap form of a wildcard query like `prefix*`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrefixQuery {
    /// Field to search in
    pub field: String,
    /// Prefix to match
    pub prefix: String,
    /// Boost factor for scoring
    #[serde(default = "default_boost")]
    pub boost: f32,
}

fn default_boost() -> f32 {
    1.0
}

impl PrefixQuery {
    /// Create a new prefix query
    pub fn new(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            prefix: prefix.into(),
            boost: 1.0,
        }
    }

    /// Set the boost factor
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl QueryNode for PrefixQuery {
    fn matches(&self, ctx: &QueryContext<'_>, doc: &Document) -> Result<bool> {
        Ok(ctx
            .terms(doc, &self.field)?
            .iter()
            .any(|token| token.term.starts_with(&self.prefix)))
    }

    fn query_type(&self) -> &'static str {
        "prefix"
    }

    fn boost(&self) -> f32 {
        self.boost
    }
}

impl fmt::Display for PrefixQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}*{}", self.field, self.prefix, boost_suffix(self.boost))
    }
}
