//! Range queries - match field values between two optional bounds
//!
//! `NumericRangeQuery` compares indexed numbers, `TermRangeQuery` compares
//! terms lexicographically. A missing bound leaves that side open.

use crate::models::Document;
use crate::query::ast::{boost_suffix, QueryNode};
use crate::query::context::QueryContext;
use crate::schema::{IndexedValue, NumericValue};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display};

fn default_boost() -> f32 {
    1.0
}

/// Check an ordering against one bound
fn within(cmp: Option<Ordering>, wanted: Ordering, inclusive: bool) -> bool {
    match cmp {
        Some(Ordering::Equal) => inclusive,
        Some(ordering) => ordering == wanted,
        None => false,
    }
}

fn write_range<T: Display>(
    f: &mut fmt::Formatter<'_>,
    field: &str,
    lower: Option<&T>,
    upper: Option<&T>,
    include_lower: bool,
    include_upper: bool,
    boost: f32,
) -> fmt::Result {
    write!(f, "{}:{}", field, if include_lower { '[' } else { '{' })?;
    match lower {
        Some(v) => write!(f, "{}", v)?,
        None => f.write_str("*")?,
    }
    f.write_str(" TO ")?;
    match upper {
        Some(v) => write!(f, "{}", v)?,
        None => f.write_str("*")?,
    }
    write!(
        f,
        "{}{}",
        if include_upper { ']' } else { '}' },
        boost_suffix(boost)
    )
}

/// Query that matches numeric values within a range
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumericRangeQuery {
    pub field: String,
    #[serde(default)]
    pub lower: Option<NumericValue>,
    #[serde(default)]
    pub upper: Option<NumericValue>,
    #[serde(default)]
    pub include_lower: bool,
    #[serde(default)]
    pub include_upper: bool,
    #[serde(default = "default_boost")]
    pub boost: f32,
}

impl NumericRangeQuery {
    pub fn new(
        field: impl Into<String>,
        lower: Option<NumericValue>,
        upper: Option<NumericValue>,
        include_lower: bool,
        include_upper: bool,
    ) -> Self {
        Self {
            field: field.into(),
            lower,
            upper,
            include_lower,
            include_upper,
            boost: 1.0,
        }
    }

    /// Range holding exactly one value
    pub fn exact(field: impl Into<String>, value: NumericValue) -> Self {
        Self::new(field, Some(value), Some(value), true, true)
    }

    /// Set the boost factor
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Check if this is a point query (both bounds equal and inclusive)
    pub fn is_point_query(&self) -> bool {
        self.include_lower && self.include_upper && self.lower.is_some() && self.lower == self.upper
    }

    pub fn contains(&self, value: &NumericValue) -> bool {
        let above = match &self.lower {
            Some(lower) => within(value.compare(lower), Ordering::Greater, self.include_lower),
            None => true,
        };
        let below = match &self.upper {
            Some(upper) => within(value.compare(upper), Ordering::Less, self.include_upper),
            None => true,
        };
        above && below
    }
}

impl QueryNode for NumericRangeQuery {
    fn matches(&self, _ctx: &QueryContext<'_>, doc: &Document) -> Result<bool> {
        Ok(doc.fields(&self.field).any(|value| match value {
            IndexedValue::Numeric(v) => self.contains(v),
            _ => false,
        }))
    }

    fn query_type(&self) -> &'static str {
        "numeric_range"
    }

    fn boost(&self) -> f32 {
        self.boost
    }
}

impl fmt::Display for NumericRangeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_range(
            f,
            &self.field,
            self.lower.as_ref(),
            self.upper.as_ref(),
            self.include_lower,
            self.include_upper,
            self.boost,
        )
    }
}

/// Query that matches terms within a lexicographic range
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TermRangeQuery {
    pub field: String,
    #[serde(default)]
    pub lower: Option<String>,
    #[serde(default)]
    pub upper: Option<String>,
    #[serde(default)]
    pub include_lower: bool,
    #[serde(default)]
    pub include_upper: bool,
    #[serde(default = "default_boost")]
    pub boost: f32,
}

impl TermRangeQuery {
    pub fn new(
        field: impl Into<String>,
        lower: Option<String>,
        upper: Option<String>,
        include_lower: bool,
        include_upper: bool,
    ) -> Self {
        Self {
            field: field.into(),
            lower,
            upper,
            include_lower,
            include_upper,
            boost: 1.0,
        }
    }

    /// Set the boost factor
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    pub fn contains(&self, term: &str) -> bool {
        let above = match &self.lower {
            Some(lower) => within(
                Some(term.cmp(lower.as_str())),
                Ordering::Greater,
                self.include_lower,
            ),
            None => true,
        };
        let below = match &self.upper {
            Some(upper) => within(
                Some(term.cmp(upper.as_str())),
                Ordering::Less,
                self.include_upper,
            ),
            None => true,
        };
        above && below
    }
}

impl QueryNode for TermRangeQuery {
    fn matches(&self, ctx: &QueryContext<'_>, doc: &Document) -> Result<bool> {
        Ok(ctx
            .terms(doc, &self.field)?
            .iter()
            .any(|token| self.contains(&token.term)))
    }

    fn query_type(&self) -> &'static str {
        "term_range"
    }

    fn boost(&self) -> f32 {
        self.boost
    }
}

impl fmt::Display for TermRangeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_range(
            f,
            &self.field,
            self.lower.as_ref(),
            self.upper.as_ref(),
            self.include_lower,
            self.include_upper,
            self.boost,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Mapper, Schema};
    use serde_json::json;

    #[test]
    fn test_exact_numeric_range() {
        let query = NumericRangeQuery::exact("age", NumericValue::Long(3));
        assert!(query.is_point_query());
        assert!(query.contains(&NumericValue::Long(3)));
        assert!(!query.contains(&NumericValue::Long(4)));
        assert_eq!(query.to_string(), "age:[3 TO 3]");
        assert_eq!(query.query_type(), "numeric_range");
    }

    #[test]
    fn test_open_and_exclusive_bounds() {
        let query = NumericRangeQuery::new(
            "score",
            Some(NumericValue::Double(1.5)),
            None,
            false,
            false,
        )
        .with_boost(0.5);
        assert!(!query.contains(&NumericValue::Double(1.5)));
        assert!(query.contains(&NumericValue::Double(1.6)));
        assert!(query.contains(&NumericValue::Double(f64::MAX)));
        assert!(!query.contains(&NumericValue::Double(f64::NAN)));
        assert_eq!(query.to_string(), "score:{1.5 TO *}^0.5");
    }

    #[test]
    fn test_term_range() {
        let query = TermRangeQuery::new(
            "name",
            Some("b".to_string()),
            Some("d".to_string()),
            true,
            false,
        );
        assert!(query.contains("b"));
        assert!(query.contains("cat"));
        assert!(!query.contains("d"));
        assert!(!query.contains("a"));
        assert_eq!(query.to_string(), "name:[b TO d}");
    }

    #[test]
    fn test_matches_documents() {
        let schema = Schema::builder()
            .mapper(Mapper::integer("age"))
            .mapper(Mapper::string("name"))
            .build()
            .unwrap();
        let ctx = QueryContext::new(&schema);
        let mut doc = Document::new(1);
        doc.add_value(&schema, "age", &json!(30))
            .unwrap()
            .add_value(&schema, "name", &json!("carol"))
            .unwrap();

        let query = NumericRangeQuery::new("age", Some(NumericValue::Long(18)), None, true, false);
        assert!(query.matches(&ctx, &doc).unwrap());

        let query = TermRangeQuery::new("name", None, Some("bob".to_string()), false, true);
        assert!(!query.matches(&ctx, &doc).unwrap());
    }
}
