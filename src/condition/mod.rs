//! Search conditions and their compilation into queries
//!
//! A `Condition` is an immutable `{boost, field}` envelope around one variant
//! payload. Smart constructors validate everything that can be checked without
//! a schema; `compile` resolves the field's mapper, checks that its base type
//! supports the variant, coerces the values and returns a boosted `Query`.

mod bitemporal_condition;
pub mod builder;
mod geo_bbox_condition;
mod match_condition;
mod pattern_condition;
mod range_condition;

pub use bitemporal_condition::BiTemporalCondition;
pub use builder::ConditionBuilder;
pub use geo_bbox_condition::GeoBBoxCondition;
pub use match_condition::MatchCondition;
pub use pattern_condition::{PrefixCondition, RegexpCondition, WildcardCondition};
pub use range_condition::RangeCondition;

use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::error::{CondexError, Result};
use crate::query::{BiTemporalOperation, Query, QueryNode};
use crate::schema::{BaseValue, Mapper, Schema};

/// Boost used when a condition does not set one
pub const DEFAULT_BOOST: f32 = 1.0;

/// Variant payload of a condition
#[derive(Clone, Debug, PartialEq)]
pub enum ConditionKind {
    Match(MatchCondition),
    Regexp(RegexpCondition),
    Wildcard(WildcardCondition),
    Prefix(PrefixCondition),
    Range(RangeCondition),
    GeoBBox(GeoBBoxCondition),
    BiTemporal(BiTemporalCondition),
}

impl ConditionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ConditionKind::Match(_) => "Match",
            ConditionKind::Regexp(_) => "Regexp",
            ConditionKind::Wildcard(_) => "Wildcard",
            ConditionKind::Prefix(_) => "Prefix",
            ConditionKind::Range(_) => "Range",
            ConditionKind::GeoBBox(_) => "GeoBBox",
            ConditionKind::BiTemporal(_) => "BiTemporal",
        }
    }
}

/// A typed search predicate on one field plus a relevance boost
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    boost: f32,
    field: String,
    kind: ConditionKind,
}

impl Condition {
    fn new(boost: Option<f32>, field: impl Into<String>, kind: ConditionKind) -> Result<Self> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(CondexError::invalid("Field name required"));
        }
        let boost = boost.unwrap_or(DEFAULT_BOOST);
        if !boost.is_finite() || boost < 0.0 {
            return Err(CondexError::invalid(format!(
                "Boost must be a non-negative number, found {}",
                boost
            )));
        }
        Ok(Self { boost, field, kind })
    }

    /// Equality on the field's base type
    pub fn match_value(boost: Option<f32>, field: impl Into<String>, value: Value) -> Result<Self> {
        Self::new(boost, field, ConditionKind::Match(MatchCondition::new(value)?))
    }

    /// Raw regular expression over whole terms
    pub fn regexp(
        boost: Option<f32>,
        field: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            boost,
            field,
            ConditionKind::Regexp(RegexpCondition::new(pattern)),
        )
    }

    /// Wildcard pattern over whole terms
    pub fn wildcard(
        boost: Option<f32>,
        field: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            boost,
            field,
            ConditionKind::Wildcard(WildcardCondition::new(pattern)),
        )
    }

    /// Terms starting with a prefix
    pub fn prefix(
        boost: Option<f32>,
        field: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            boost,
            field,
            ConditionKind::Prefix(PrefixCondition::new(prefix)),
        )
    }

    /// Values between two optional bounds
    pub fn range(
        boost: Option<f32>,
        field: impl Into<String>,
        lower: Option<Value>,
        upper: Option<Value>,
        include_lower: bool,
        include_upper: bool,
    ) -> Result<Self> {
        Self::new(
            boost,
            field,
            ConditionKind::Range(RangeCondition::new(
                lower,
                upper,
                include_lower,
                include_upper,
            )),
        )
    }

    /// Geo points intersecting a bounding box
    pub fn geo_bbox(
        boost: Option<f32>,
        field: impl Into<String>,
        min_longitude: f64,
        max_longitude: f64,
        min_latitude: f64,
        max_latitude: f64,
    ) -> Result<Self> {
        Self::new(
            boost,
            field,
            ConditionKind::GeoBBox(GeoBBoxCondition::new(
                min_longitude,
                max_longitude,
                min_latitude,
                max_latitude,
            )?),
        )
    }

    /// Records whose bitemporal interval relates to the given one
    pub fn bitemporal(
        boost: Option<f32>,
        field: impl Into<String>,
        tt_from: Option<Value>,
        tt_to: Option<Value>,
        vt_from: Option<Value>,
        vt_to: Option<Value>,
        operation: BiTemporalOperation,
    ) -> Result<Self> {
        Self::new(
            boost,
            field,
            ConditionKind::BiTemporal(BiTemporalCondition::new(
                tt_from, tt_to, vt_from, vt_to, operation,
            )),
        )
    }

    pub fn boost(&self) -> f32 {
        self.boost
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> &ConditionKind {
        &self.kind
    }

    /// Compile into a query against `schema`
    ///
    /// Fails without a partial result when the field has no mapper, when the
    /// mapper's base type does not support this condition, or when a value
    /// cannot be coerced.
    pub fn compile(&self, schema: &Schema) -> Result<Query> {
        let field = self.field.as_str();
        let mapper = schema.resolve(field)?;

        let query = match &self.kind {
            ConditionKind::Match(c) => c.query(field, mapper, schema)?,
            ConditionKind::Regexp(c) => c.query(field, mapper)?,
            ConditionKind::Wildcard(c) => c.query(field, mapper)?,
            ConditionKind::Prefix(c) => c.query(field, mapper)?,
            ConditionKind::Range(c) => c.query(field, mapper)?,
            ConditionKind::GeoBBox(c) => c.query(field, mapper, schema)?,
            ConditionKind::BiTemporal(c) => c.query(field, mapper)?,
        }
        .with_boost(self.boost);

        debug!(
            field,
            condition = self.kind.name(),
            query_type = query.query_type(),
            boost = self.boost,
            "compiled condition"
        );
        Ok(query)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Condition{{boost={:?}, field={}",
            self.kind.name(),
            self.boost,
            self.field
        )?;
        match &self.kind {
            ConditionKind::Match(c) => write!(f, ", {}", c)?,
            ConditionKind::Regexp(c) => write!(f, ", {}", c)?,
            ConditionKind::Wildcard(c) => write!(f, ", {}", c)?,
            ConditionKind::Prefix(c) => write!(f, ", {}", c)?,
            ConditionKind::Range(c) => write!(f, ", {}", c)?,
            ConditionKind::GeoBBox(c) => write!(f, ", {}", c)?,
            ConditionKind::BiTemporal(c) => write!(f, ", {}", c)?,
        }
        f.write_str("}")
    }
}

/// Error for a condition the mapper's base type cannot serve
fn unsupported(condition: &'static str, mapper: &Mapper) -> CondexError {
    CondexError::UnsupportedCondition {
        condition,
        base_type: mapper.base_type(),
    }
}

/// Coerce a value that must not be null
fn coerce_required(field: &str, mapper: &Mapper, raw: &Value) -> Result<BaseValue> {
    mapper
        .coerce(field, raw)?
        .ok_or_else(|| CondexError::invalid(format!("Field '{}' requires a value", field)))
}

/// Coerce an optional bound, where `null` means open
fn coerce_optional(field: &str, mapper: &Mapper, raw: Option<&Value>) -> Result<Option<BaseValue>> {
    match raw {
        Some(raw) => mapper.coerce(field, raw),
        None => Ok(None),
    }
}

/// Render a raw value the way condition descriptions show it
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render an optional raw value, `null` when absent
fn display_optional(value: Option<&Value>) -> String {
    value.map(display_value).unwrap_or_else(|| "null".to_string())
}

/// Drop explicit `null`s so that absent and null bounds compare equal
fn non_null(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}
