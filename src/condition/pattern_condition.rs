//! Term pattern conditions: regexp, wildcard and prefix
//!
//! All three match whole indexed terms of string fields. Patterns are passed
//! through unanalyzed.

use std::fmt;
use tracing::warn;

use super::unsupported;
use crate::error::Result;
use crate::query::{PrefixQuery, Query, RegexpQuery, WildcardQuery};
use crate::schema::{BaseType, Mapper};

/// Regular expression that must match a whole term
#[derive(Clone, Debug, PartialEq)]
pub struct RegexpCondition {
    pattern: String,
}

impl RegexpCondition {
    pub(crate) fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub(crate) fn query(&self, field: &str, mapper: &Mapper) -> Result<Query> {
        match mapper.base_type() {
            BaseType::String => Ok(Query::Regexp(RegexpQuery::new(field, self.pattern.as_str()))),
            BaseType::Integer
            | BaseType::Long
            | BaseType::Float
            | BaseType::Double
            | BaseType::Uuid
            | BaseType::GeoPoint
            | BaseType::BiTemporal => Err(unsupported("Regexp", mapper)),
        }
    }
}

impl fmt::Display for RegexpCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value={}", self.pattern)
    }
}

/// Wildcard pattern where `*` is any sequence and `?` any single character
#[derive(Clone, Debug, PartialEq)]
pub struct WildcardCondition {
    pattern: String,
}

impl WildcardCondition {
    pub(crate) fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub(crate) fn query(&self, field: &str, mapper: &Mapper) -> Result<Query> {
        match mapper.base_type() {
            BaseType::String => {
                let query = WildcardQuery::new(field, self.pattern.as_str());
                if query.has_leading_wildcard() {
                    warn!(
                        field,
                        pattern = %self.pattern,
                        "wildcard pattern starts with '*', every term will be scanned"
                    );
                }
                Ok(Query::Wildcard(query))
            }
            BaseType::Integer
            | BaseType::Long
            | BaseType::Float
            | BaseType::Double
            | BaseType::Uuid
            | BaseType::GeoPoint
            | BaseType::BiTemporal => Err(unsupported("Wildcard", mapper)),
        }
    }
}

impl fmt::Display for WildcardCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value={}", self.pattern)
    }
}

/// Terms starting with a fixed prefix
#[derive(Clone, Debug, PartialEq)]
pub struct PrefixCondition {
    prefix: String,
}

impl PrefixCondition {
    pub(crate) fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub(crate) fn query(&self, field: &str, mapper: &Mapper) -> Result<Query> {
        match mapper.base_type() {
            BaseType::String => Ok(Query::Prefix(PrefixQuery::new(field, self.prefix.as_str()))),
            BaseType::Integer
            | BaseType::Long
            | BaseType::Float
            | BaseType::Double
            | BaseType::Uuid
            | BaseType::GeoPoint
            | BaseType::BiTemporal => Err(unsupported("Prefix", mapper)),
        }
    }
}

impl fmt::Display for PrefixCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value={}", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::error::CondexError;
    use crate::query::QueryNode;
    use crate::schema::Schema;

    fn schema() -> Schema {
        Schema::builder()
            .mapper(Mapper::string("name"))
            .mapper(Mapper::text("body"))
            .mapper(Mapper::boolean("active"))
            .mapper(Mapper::integer("age"))
            .mapper(Mapper::double("score"))
            .mapper(Mapper::uuid("id"))
            .mapper(Mapper::date("when"))
            .mapper(Mapper::geo_point("place", 8))
            .mapper(Mapper::bitemporal("period"))
            .build()
            .unwrap()
    }

    const NON_STRING: [&str; 6] = ["age", "score", "id", "when", "place", "period"];

    #[test]
    fn test_regexp_string() {
        let query = Condition::regexp(Some(0.7), "name", "tu.*")
            .unwrap()
            .compile(&schema())
            .unwrap();
        assert_eq!(
            query,
            Query::Regexp(RegexpQuery::new("name", "tu.*").with_boost(0.7))
        );
        assert_eq!(query.to_string(), "name:/tu.*/^0.7");
    }

    #[test]
    fn test_regexp_text_and_boolean() {
        let schema = schema();
        for field in ["body", "active"] {
            let query = Condition::regexp(None, field, "t.*")
                .unwrap()
                .compile(&schema)
                .unwrap();
            assert_eq!(query.query_type(), "regexp");
            assert_eq!(query.boost(), 1.0);
        }
    }

    #[test]
    fn test_regexp_unsupported() {
        let schema = schema();
        for field in NON_STRING {
            let err = Condition::regexp(None, field, "tu.*")
                .unwrap()
                .compile(&schema)
                .unwrap_err();
            assert!(
                matches!(err, CondexError::UnsupportedCondition { condition: "Regexp", .. }),
                "{} gave {:?}",
                field,
                err
            );
        }
    }

    #[test]
    fn test_wildcard_string() {
        let query = Condition::wildcard(Some(0.7), "name", "tu*")
            .unwrap()
            .compile(&schema())
            .unwrap();
        assert_eq!(
            query,
            Query::Wildcard(WildcardQuery::new("name", "tu*").with_boost(0.7))
        );
    }

    #[test]
    fn test_wildcard_leading_star_is_accepted() {
        let query = Condition::wildcard(None, "name", "*tu")
            .unwrap()
            .compile(&schema())
            .unwrap();
        assert_eq!(query.query_type(), "wildcard");
    }

    #[test]
    fn test_wildcard_unsupported() {
        let schema = schema();
        for field in NON_STRING {
            assert!(matches!(
                Condition::wildcard(None, field, "tu*").unwrap().compile(&schema),
                Err(CondexError::UnsupportedCondition { condition: "Wildcard", .. })
            ));
        }
    }

    #[test]
    fn test_prefix_string() {
        let query = Condition::prefix(Some(2.0), "name", "prog")
            .unwrap()
            .compile(&schema())
            .unwrap();
        assert_eq!(
            query,
            Query::Prefix(PrefixQuery::new("name", "prog").with_boost(2.0))
        );
    }

    #[test]
    fn test_prefix_unsupported() {
        let schema = schema();
        for field in NON_STRING {
            assert!(matches!(
                Condition::prefix(None, field, "a").unwrap().compile(&schema),
                Err(CondexError::UnsupportedCondition { condition: "Prefix", .. })
            ));
        }
    }

    #[test]
    fn test_display() {
        let condition = Condition::regexp(Some(0.5), "name", "tu.*").unwrap();
        assert_eq!(
            condition.to_string(),
            "RegexpCondition{boost=0.5, field=name, value=tu.*}"
        );
        let condition = Condition::prefix(None, "name", "tu").unwrap();
        assert_eq!(
            condition.to_string(),
            "PrefixCondition{boost=1.0, field=name, value=tu}"
        );
    }
}
