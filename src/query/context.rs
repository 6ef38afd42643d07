//! Query execution context
//!
//! The `QueryContext` gives query nodes the analyzers of the schema they were
//! compiled against and caches the automata built for pattern queries.

use parking_lot::RwLock;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{CondexError, Result};
use crate::models::Document;
use crate::schema::{IndexedValue, Schema};
use crate::tokenizer::Token;

/// Cache of compiled patterns keyed by query type and pattern
pub type PatternCache = Arc<RwLock<HashMap<String, Arc<Regex>>>>;

/// Execution context shared by every node of a query
pub struct QueryContext<'a> {
    schema: &'a Schema,
    pattern_cache: PatternCache,
}

impl<'a> QueryContext<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            pattern_cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Terms of a field in a document, with their positions
    ///
    /// Untokenized values are one term each. Text values are analyzed with the
    /// field's analyzer; positions continue across values of a multi-valued
    /// field.
    pub fn terms(&self, doc: &Document, field: &str) -> Result<Vec<Token>> {
        let mut terms = Vec::new();
        let mut offset = 0u32;
        for value in doc.fields(field) {
            match value {
                IndexedValue::Term(term) => {
                    terms.push(Token::new(term.as_str(), offset));
                    offset += 1;
                }
                IndexedValue::Text(text) => {
                    let analyzer = self.schema.field_analyzer(field)?;
                    let tokens = analyzer.analyze(text);
                    let next = tokens.iter().map(|t| t.position + 1).max().unwrap_or(0);
                    terms.extend(
                        tokens
                            .into_iter()
                            .map(|t| Token::new(t.term, t.position + offset)),
                    );
                    offset += next;
                }
                _ => {}
            }
        }
        Ok(terms)
    }

    /// Get or compile a cached pattern
    pub fn get_or_compile<F>(&self, cache_key: &str, pattern: F) -> Result<Arc<Regex>>
    where
        F: FnOnce() -> String,
    {
        if let Some(regex) = self.pattern_cache.read().get(cache_key) {
            return Ok(Arc::clone(regex));
        }

        let source = pattern();
        let regex = Regex::new(&source)
            .map_err(|e| CondexError::InvalidPattern(format!("'{}': {}", source, e)))?;
        let regex = Arc::new(regex);
        self.pattern_cache
            .write()
            .insert(cache_key.to_string(), Arc::clone(&regex));
        Ok(regex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Mapper;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::builder()
            .mapper(Mapper::string("name"))
            .mapper(Mapper::text("body"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_terms_of_keyword_field() {
        let schema = schema();
        let ctx = QueryContext::new(&schema);
        let mut doc = Document::new(1);
        doc.add_values(&schema, "name", &[json!("Alpha Beta"), json!("gamma")])
            .unwrap();

        let terms = ctx.terms(&doc, "name").unwrap();
        assert_eq!(
            terms,
            vec![Token::new("Alpha Beta", 0), Token::new("gamma", 1)]
        );
    }

    #[test]
    fn test_terms_of_text_field() {
        let schema = schema();
        let ctx = QueryContext::new(&schema);
        let mut doc = Document::new(1);
        doc.add_value(&schema, "body", &json!("Quick brown fox")).unwrap();

        let terms: Vec<String> = ctx
            .terms(&doc, "body")
            .unwrap()
            .into_iter()
            .map(|t| t.term)
            .collect();
        assert_eq!(terms, vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn test_pattern_cache() {
        let schema = schema();
        let ctx = QueryContext::new(&schema);
        let first = ctx.get_or_compile("regexp:a.*", || "^a.*$".to_string()).unwrap();
        let second = ctx
            .get_or_compile("regexp:a.*", || unreachable!("pattern is cached"))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_invalid_pattern() {
        let schema = schema();
        let ctx = QueryContext::new(&schema);
        let err = ctx.get_or_compile("bad", || "(".to_string()).unwrap_err();
        assert!(matches!(err, CondexError::InvalidPattern(_)));
    }
}
