//! Wildcard query - matches terms using wildcards
//!
//! Supports:
//! - `*` - matches any sequence of characters
//! - `?` - matches any single character
//! - `\` - makes the next character literal

use crate::models::Document;
use crate::query::ast::{boost_suffix, QueryNode};
use crate::query::context::QueryContext;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Query that matches terms using wildcard patterns
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WildcardQuery {
    /// Field to search in
    pub field: String,
    /// Wildcard pattern
    pub pattern: String,
    /// Boost factor for scoring
    #[serde(default = "default_boost")]
    pub boost: f32,
}

fn default_boost() -> f32 {
    1.0
}

impl WildcardQuery {
    /// Create a new wildcard query
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
        format!("wildcard:{}", self.pattern)
    }

    /// Convert the wildcard pattern to an anchored regex source
    ///
    /// A trailing lone `\` is taken literally.
    pub fn to_regex(&self) -> String {
        let mut regex_pattern = String::with_capacity(self.pattern.len() + 8);
        regex_pattern.push('^');

        let mut chars = self.pattern.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '*' => regex_pattern.push_str(".*"),
                '?' => regex_pattern.push('.'),
                '\\' => {
                    let literal = chars.next().unwrap_or('\\');
                    regex_pattern.push_str(&regex::escape(literal.encode_utf8(&mut [0; 4])));
                }
                _ => regex_pattern.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4]))),
            }
        }

        regex_pattern.push('$');
        regex_pattern
    }

    /// Check if the pattern starts with a wildcard and so scans every term
    pub fn has_leading_wildcard(&self) -> bool {
        self.pattern.starts_with('*') || self.pattern.starts_with('?')
    }
}

impl QueryNode for WildcardQuery {
    fn matches(&self, ctx: &QueryContext<'_>, doc: &Document) -> Result<bool> {
        let regex = ctx.get_or_compile(&self.cache_key(), || self.to_regex())?;
        Ok(ctx
            .terms(doc, &self.field)?
            .iter()
            .any(|token| regex.is_match(&token.term)))
    }

    fn query_type(&self) -> &'static str {
        "wildcard"
    }

    fn boost(&self) -> f32 {
        self.boost
    }
}

impl fmt::Display for WildcardQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.field, self.pattern, boost_suffix(self.boost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Mapper, Schema};
    use regex::Regex;
    use serde_json::json;

    fn regex(pattern: &str) -> Regex {
        Regex::new(&WildcardQuery::new("name", pattern).to_regex()).unwrap()
    }

    #[test]
    fn test_wildcard_query_creation() {
        let query = WildcardQuery::new("name", "prog*").with_boost(2.5);
        assert_eq!(query.field, "name");
        assert_eq!(query.pattern, "prog*");
        assert_eq!(query.boost, 2.5);
        assert_eq!(query.query_type(), "wildcard");
        assert_eq!(query.to_string(), "name:prog*^2.5");
    }

    #[test]
    fn test_leading_wildcard() {
        assert!(WildcardQuery::new("name", "*suffix").has_leading_wildcard());
        assert!(WildcardQuery::new("name", "?uffix").has_leading_wildcard());
        assert!(!WildcardQuery::new("name", "prog*").has_leading_wildcard());
    }

    #[test]
    fn test_pattern_to_regex() {
        let re = regex("prog*");
        assert!(re.is_match("programming"));
        assert!(re.is_match("prog"));
        assert!(!re.is_match("aprog"));

        let re = regex("te?t");
        assert!(re.is_match("test"));
        assert!(re.is_match("text"));
        assert!(!re.is_match("teest"));

        let re = regex("a.b");
        assert!(re.is_match("a.b"));
        assert!(!re.is_match("axb"));
    }

    #[test]
    fn test_escaped_wildcards_are_literal() {
        let re = regex(r"what\?");
        assert!(re.is_match("what?"));
        assert!(!re.is_match("whats"));

        let re = regex(r"5\*");
        assert!(re.is_match("5*"));
        assert!(!re.is_match("55"));

        let re = regex(r"back\\slash");
        assert!(re.is_match(r"back\slash"));
    }

    #[test]
    fn test_matches_document() {
        let schema = Schema::builder()
            .mapper(Mapper::string("name"))
            .build()
            .unwrap();
        let ctx = QueryContext::new(&schema);
        let mut doc = Document::new(1);
        doc.add_value(&schema, "name", &json!("tuple")).unwrap();

        assert!(WildcardQuery::new("name", "tu*").matches(&ctx, &doc).unwrap());
        assert!(WildcardQuery::new("name", "*ple").matches(&ctx, &doc).unwrap());
        assert!(!WildcardQuery::new("name", "tu?").matches(&ctx, &doc).unwrap());
    }
}
