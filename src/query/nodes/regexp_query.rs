//! Regexp query - matches whole terms against a regular expression

use crate::models::Document;
use crate::query::ast::{boost_suffix, QueryNode};
use crate::query::context::QueryContext;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Query that matches terms fully matching a regular expression
///
/// The pattern is used as given, it is never analyzed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegexpQuery {
    /// Field to search in
    pub field: String,
    /// Regular expression a whole term must match
    pub pattern: String,
    /// Boost factor for scoring
    #[serde(default = "default_boost")]
    pub boost: f32,
}

fn default_boost() -> f32 {
    1.0
}

impl RegexpQuery {
    pub fn new(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            pattern: pattern.into(),
            boost: 1.0,
        }
    }

    /// Set the boost factor
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the cache key for this query
    pub fn cache_key(&self) -> String {
        format!("regexp:{}", self.pattern)
    }
}

impl QueryNode for RegexpQuery {
    fn matches(&self, ctx: &QueryContext<'_>, doc: &Document) -> Result<bool> {
        let regex = ctx.get_or_compile(&self.cache_key(), || format!("^(?:{})$", self.pattern))?;
        Ok(ctx
            .terms(doc, &self.field)?
            .iter()
            .any(|token| regex.is_match(&token.term)))
    }

    fn query_type(&self) -> &'static str {
        "regexp"
    }

    fn boost(&self) -> f32 {
        self.boost
    }
}

impl fmt::Display for RegexpQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:/{}/{}",
            self.field,
            self.pattern,
            boost_suffix(self.boost)
        )
    }
}
