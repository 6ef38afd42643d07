//! Match condition - exact value equality in the field's base type

use serde_json::Value;
use std::fmt;
use tracing::trace;

use super::{coerce_required, display_value, unsupported};
use crate::error::{CondexError, Result};
use crate::query::{MatchNoneQuery, NumericRangeQuery, PhraseQuery, Query, TermQuery};
use crate::schema::{BaseType, Mapper, Schema};

#[derive(Clone, Debug, PartialEq)]
pub struct MatchCondition {
    value: Value,
}

impl MatchCondition {
    pub(crate) fn new(value: Value) -> Result<Self> {
        if value.is_null() {
            return Err(CondexError::invalid("Field value required"));
        }
        Ok(Self { value })
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn query(&self, field: &str, mapper: &Mapper, schema: &Schema) -> Result<Query> {
        match mapper.base_type() {
            BaseType::String => {
                let value = coerce_required(field, mapper, &self.value)?;
                let text = value.to_string();
                let analyzer = schema.field_analyzer(field)?;
                let mut tokens = analyzer.analyze(&text);
                trace!(field, tokens = tokens.len(), "analyzed match value");

                Ok(match tokens.len() {
                    0 => Query::MatchNone(MatchNoneQuery::default()),
                    1 => {
                        let token = tokens.remove(0);
                        Query::Term(TermQuery::new(field, token.term))
                    }
                    _ => Query::Phrase(PhraseQuery::new(field, tokens)),
                })
            }
            BaseType::Integer | BaseType::Long | BaseType::Float | BaseType::Double => {
                let value = coerce_required(field, mapper, &self.value)?;
                let numeric = value.as_numeric().ok_or_else(|| {
                    CondexError::coercion(field, mapper.base_type(), format!("{} is not a number", value))
                })?;
                Ok(Query::NumericRange(NumericRangeQuery::exact(field, numeric)))
            }
            BaseType::Uuid | BaseType::GeoPoint | BaseType::BiTemporal => {
                Err(unsupported("Match", mapper))
            }
        }
    }
}

impl fmt::Display for MatchCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value={}", display_value(&self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::config::ENGLISH_ANALYZER;
    use crate::models::Document;
    use crate::query::{QueryContext, QueryNode};
    use crate::schema::{MapperKind, NumericValue};
    use serde_json::json;

    fn schema() -> Schema {
        Schema::builder()
            .mapper(Mapper::string("name"))
            .mapper(Mapper::text("body"))
            .mapper(Mapper::new("english", MapperKind::text_with_analyzer(ENGLISH_ANALYZER)))
            .mapper(Mapper::integer("age"))
            .mapper(Mapper::long("count"))
            .mapper(Mapper::double("score"))
            .mapper(Mapper::boolean("active"))
            .mapper(Mapper::uuid("id"))
            .mapper(Mapper::date("when"))
            .mapper(Mapper::geo_point("place", 8))
            .mapper(Mapper::bitemporal("period"))
            .build()
            .unwrap()
    }

    fn compile(field: &str, value: Value) -> Result<Query> {
        Condition::match_value(Some(0.5), field, value)?.compile(&schema())
    }

    #[test]
    fn test_null_value_rejected() {
        assert!(matches!(
            Condition::match_value(None, "name", Value::Null),
            Err(CondexError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_string() {
        let query = compile("name", json!("value")).unwrap();
        assert_eq!(query, Query::Term(TermQuery::new("name", "value").with_boost(0.5)));
        assert_eq!(query.to_string(), "name:value^0.5");
    }

    #[test]
    fn test_keyword_keeps_whole_value() {
        let query = compile("name", json!("Two Words")).unwrap();
        assert_eq!(query, Query::Term(TermQuery::new("name", "Two Words").with_boost(0.5)));
    }

    #[test]
    fn test_text_single_token() {
        let query = compile("body", json!("Cassandra")).unwrap();
        assert_eq!(query, Query::Term(TermQuery::new("body", "cassandra").with_boost(0.5)));
    }

    #[test]
    fn test_text_phrase() {
        let query = compile("english", json!("the cassandra databases")).unwrap();
        match query {
            Query::Phrase(phrase) => {
                assert_eq!(phrase.terms, vec!["cassandra", "databas"]);
                assert_eq!(phrase.positions, vec![0, 1]);
                assert_eq!(phrase.boost, 0.5);
            }
            other => panic!("expected a phrase, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_keyword_matches_empty_value() {
        let schema = schema();
        let query = compile("name", json!("")).unwrap();
        assert_eq!(query, Query::Term(TermQuery::new("name", "").with_boost(0.5)));

        let ctx = QueryContext::new(&schema);
        let mut doc = Document::new(1);
        doc.add_value(&schema, "name", &json!("")).unwrap();
        assert!(query.matches(&ctx, &doc).unwrap());
    }

    #[test]
    fn test_analyzed_to_nothing() {
        let query = compile("body", json!("  ")).unwrap();
        assert_eq!(query.query_type(), "match_none");
        assert_eq!(query.boost(), 0.5);
    }

    #[test]
    fn test_boolean() {
        let query = compile("active", json!("TRUE")).unwrap();
        assert_eq!(query, Query::Term(TermQuery::new("active", "true").with_boost(0.5)));
    }

    #[test]
    fn test_integer() {
        let query = compile("age", json!(42)).unwrap();
        assert_eq!(
            query,
            Query::NumericRange(NumericRangeQuery::exact("age", NumericValue::Int(42)).with_boost(0.5))
        );
    }

    #[test]
    fn test_long_truncates() {
        let query = compile("count", json!(3.6)).unwrap();
        assert_eq!(query.to_string(), "count:[3 TO 3]^0.5");
    }

    #[test]
    fn test_double() {
        let query = compile("score", json!("2.5")).unwrap();
        assert_eq!(
            query,
            Query::NumericRange(
                NumericRangeQuery::exact("score", NumericValue::Double(2.5)).with_boost(0.5)
            )
        );
    }

    #[test]
    fn test_date_matches_millis() {
        let query = compile("when", json!("1970/01/01 00:00:01.000")).unwrap();
        assert_eq!(query.to_string(), "when:[1000 TO 1000]^0.5");
    }

    #[test]
    fn test_invalid_number() {
        assert!(matches!(
            compile("count", json!("error")),
            Err(CondexError::TypeCoercion { .. })
        ));
    }

    #[test]
    fn test_unsupported_types() {
        for field in ["id", "place", "period"] {
            let err = compile(field, json!("value")).unwrap_err();
            assert!(
                matches!(err, CondexError::UnsupportedCondition { condition: "Match", .. }),
                "{} gave {:?}",
                field,
                err
            );
        }
        assert_eq!(
            compile("id", json!("value")).unwrap_err().to_string(),
            "Match queries are not supported by uuid mapper"
        );
    }

    #[test]
    fn test_unresolved_field() {
        assert!(matches!(
            compile("missing", json!(1)),
            Err(CondexError::UnresolvedField(_))
        ));
    }

    #[test]
    fn test_display() {
        let condition = Condition::match_value(Some(0.5), "name", json!(3)).unwrap();
        assert_eq!(
            condition.to_string(),
            "MatchCondition{boost=0.5, field=name, value=3}"
        );
    }
}
