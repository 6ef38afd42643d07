//! Serializable condition builders
//!
//! A `ConditionBuilder` is the wire form of a condition: a JSON object tagged
//! by `type` whose unset optional fields are skipped when serialized. Building
//! applies the defaults and runs the same validation as the smart constructors
//! on `Condition`.
//!
//! ```json
//! {"type": "match", "field": "name", "value": "Stratio", "boost": 0.5}
//! {"type": "geo_bbox", "field": "place", "min_longitude": -180.0, ...}
//! {"type": "bitemporal", "field": "period", "tt_from": "2015/03/20 11:45:32.333"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Condition, ConditionKind};
use crate::error::{CondexError, Result};
use crate::query::BiTemporalOperation;

/// Any condition in its serializable form
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConditionBuilder {
    #[serde(rename = "match")]
    Match(MatchConditionBuilder),
    #[serde(rename = "regexp")]
    Regexp(RegexpConditionBuilder),
    #[serde(rename = "wildcard")]
    Wildcard(WildcardConditionBuilder),
    #[serde(rename = "prefix")]
    Prefix(PrefixConditionBuilder),
    #[serde(rename = "range")]
    Range(RangeConditionBuilder),
    #[serde(rename = "geo_bbox")]
    GeoBBox(GeoBBoxConditionBuilder),
    #[serde(rename = "bitemporal")]
    BiTemporal(BiTemporalConditionBuilder),
}

impl ConditionBuilder {
    /// Validate and build the condition
    pub fn build(self) -> Result<Condition> {
        match self {
            ConditionBuilder::Match(b) => b.build(),
            ConditionBuilder::Regexp(b) => b.build(),
            ConditionBuilder::Wildcard(b) => b.build(),
            ConditionBuilder::Prefix(b) => b.build(),
            ConditionBuilder::Range(b) => b.build(),
            ConditionBuilder::GeoBBox(b) => b.build(),
            ConditionBuilder::BiTemporal(b) => b.build(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            ConditionBuilder::Match(b) => &b.field,
            ConditionBuilder::Regexp(b) => &b.field,
            ConditionBuilder::Wildcard(b) => &b.field,
            ConditionBuilder::Prefix(b) => &b.field,
            ConditionBuilder::Range(b) => &b.field,
            ConditionBuilder::GeoBBox(b) => &b.field,
            ConditionBuilder::BiTemporal(b) => &b.field,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<&Condition> for ConditionBuilder {
    fn from(condition: &Condition) -> Self {
        let field = condition.field().to_string();
        let boost = Some(condition.boost());

        match condition.kind() {
            ConditionKind::Match(c) => ConditionBuilder::Match(MatchConditionBuilder {
                field,
                boost,
                value: Some(c.value().clone()),
            }),
            ConditionKind::Regexp(c) => ConditionBuilder::Regexp(RegexpConditionBuilder {
                field,
                boost,
                value: Some(c.pattern().to_string()),
            }),
            ConditionKind::Wildcard(c) => ConditionBuilder::Wildcard(WildcardConditionBuilder {
                field,
                boost,
                value: Some(c.pattern().to_string()),
            }),
            ConditionKind::Prefix(c) => ConditionBuilder::Prefix(PrefixConditionBuilder {
                field,
                boost,
                value: Some(c.prefix().to_string()),
            }),
            ConditionKind::Range(c) => ConditionBuilder::Range(RangeConditionBuilder {
                field,
                boost,
                lower: c.lower().cloned(),
                upper: c.upper().cloned(),
                include_lower: Some(c.include_lower()),
                include_upper: Some(c.include_upper()),
            }),
            ConditionKind::GeoBBox(c) => ConditionBuilder::GeoBBox(GeoBBoxConditionBuilder {
                field,
                boost,
                min_longitude: Some(c.min_longitude()),
                max_longitude: Some(c.max_longitude()),
                min_latitude: Some(c.min_latitude()),
                max_latitude: Some(c.max_latitude()),
            }),
            ConditionKind::BiTemporal(c) => {
                ConditionBuilder::BiTemporal(BiTemporalConditionBuilder {
                    field,
                    boost,
                    tt_from: c.tt_from().cloned(),
                    tt_to: c.tt_to().cloned(),
                    vt_from: c.vt_from().cloned(),
                    vt_to: c.vt_to().cloned(),
                    operation: Some(c.operation().to_string()),
                })
            }
        }
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| CondexError::invalid(format!("{} required", name)))
}

/// Builder for a match condition
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchConditionBuilder {
    #[serde(default)]
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl MatchConditionBuilder {
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn build(self) -> Result<Condition> {
        let value = required(self.value, "Field value")?;
        Condition::match_value(self.boost, self.field, value)
    }
}

/// Builder for a regexp condition
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegexpConditionBuilder {
    #[serde(default)]
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RegexpConditionBuilder {
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn build(self) -> Result<Condition> {
        let value = required(self.value, "Field value")?;
        Condition::regexp(self.boost, self.field, value)
    }
}

/// Builder for a wildcard condition
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WildcardConditionBuilder {
    #[serde(default)]
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl WildcardConditionBuilder {
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn build(self) -> Result<Condition> {
        let value = required(self.value, "Field value")?;
        Condition::wildcard(self.boost, self.field, value)
    }
}

/// Builder for a prefix condition
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrefixConditionBuilder {
    #[serde(default)]
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl PrefixConditionBuilder {
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn build(self) -> Result<Condition> {
        let value = required(self.value, "Field value")?;
        Condition::prefix(self.boost, self.field, value)
    }
}

/// Builder for a range condition; both bounds are optional and exclusive by default
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeConditionBuilder {
    #[serde(default)]
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_lower: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_upper: Option<bool>,
}

impl RangeConditionBuilder {
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn lower(mut self, lower: impl Into<Value>) -> Self {
        self.lower = Some(lower.into());
        self
    }

    pub fn upper(mut self, upper: impl Into<Value>) -> Self {
        self.upper = Some(upper.into());
        self
    }

    pub fn include_lower(mut self, include: bool) -> Self {
        self.include_lower = Some(include);
        self
    }

    pub fn include_upper(mut self, include: bool) -> Self {
        self.include_upper = Some(include);
        self
    }

    pub fn build(self) -> Result<Condition> {
        Condition::range(
            self.boost,
            self.field,
            self.lower,
            self.upper,
            self.include_lower.unwrap_or(false),
            self.include_upper.unwrap_or(false),
        )
    }
}

/// Builder for a geo bounding box condition
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoBBoxConditionBuilder {
    #[serde(default)]
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_latitude: Option<f64>,
}

impl GeoBBoxConditionBuilder {
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn build(self) -> Result<Condition> {
        Condition::geo_bbox(
            self.boost,
            self.field,
            required(self.min_longitude, "min_longitude")?,
            required(self.max_longitude, "max_longitude")?,
            required(self.min_latitude, "min_latitude")?,
            required(self.max_latitude, "max_latitude")?,
        )
    }
}

/// Builder for a bitemporal condition
///
/// Endpoints stay in their raw form (epoch millis or date strings) until the
/// condition is compiled against a mapper.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BiTemporalConditionBuilder {
    #[serde(default)]
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tt_from: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tt_to: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vt_from: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vt_to: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
}

impl BiTemporalConditionBuilder {
    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn tt_from(mut self, tt_from: impl Into<Value>) -> Self {
        self.tt_from = Some(tt_from.into());
        self
    }

    pub fn tt_to(mut self, tt_to: impl Into<Value>) -> Self {
        self.tt_to = Some(tt_to.into());
        self
    }

    pub fn vt_from(mut self, vt_from: impl Into<Value>) -> Self {
        self.vt_from = Some(vt_from.into());
        self
    }

    pub fn vt_to(mut self, vt_to: impl Into<Value>) -> Self {
        self.vt_to = Some(vt_to.into());
        self
    }

    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    pub fn build(self) -> Result<Condition> {
        let operation = match self.operation.as_deref() {
            Some(name) => name.parse::<BiTemporalOperation>()?,
            None => BiTemporalOperation::default(),
        };
        Condition::bitemporal(
            self.boost,
            self.field,
            self.tt_from,
            self.tt_to,
            self.vt_from,
            self.vt_to,
            operation,
        )
    }
}

impl From<MatchConditionBuilder> for ConditionBuilder {
    fn from(builder: MatchConditionBuilder) -> Self {
        ConditionBuilder::Match(builder)
    }
}

impl From<RegexpConditionBuilder> for ConditionBuilder {
    fn from(builder: RegexpConditionBuilder) -> Self {
        ConditionBuilder::Regexp(builder)
    }
}

impl From<WildcardConditionBuilder> for ConditionBuilder {
    fn from(builder: WildcardConditionBuilder) -> Self {
        ConditionBuilder::Wildcard(builder)
    }
}

impl From<PrefixConditionBuilder> for ConditionBuilder {
    fn from(builder: PrefixConditionBuilder) -> Self {
        ConditionBuilder::Prefix(builder)
    }
}

impl From<RangeConditionBuilder> for ConditionBuilder {
    fn from(builder: RangeConditionBuilder) -> Self {
        ConditionBuilder::Range(builder)
    }
}

impl From<GeoBBoxConditionBuilder> for ConditionBuilder {
    fn from(builder: GeoBBoxConditionBuilder) -> Self {
        ConditionBuilder::GeoBBox(builder)
    }
}

impl From<BiTemporalConditionBuilder> for ConditionBuilder {
    fn from(builder: BiTemporalConditionBuilder) -> Self {
        ConditionBuilder::BiTemporal(builder)
    }
}

/// Match `field` against `value`
pub fn match_value(field: impl Into<String>, value: impl Into<Value>) -> MatchConditionBuilder {
    MatchConditionBuilder {
        field: field.into(),
        value: Some(value.into()),
        ..Default::default()
    }
}

/// Match terms of `field` against a regular expression
pub fn regexp(field: impl Into<String>, pattern: impl Into<String>) -> RegexpConditionBuilder {
    RegexpConditionBuilder {
        field: field.into(),
        value: Some(pattern.into()),
        ..Default::default()
    }
}

/// Match terms of `field` against a wildcard pattern
pub fn wildcard(field: impl Into<String>, pattern: impl Into<String>) -> WildcardConditionBuilder {
    WildcardConditionBuilder {
        field: field.into(),
        value: Some(pattern.into()),
        ..Default::default()
    }
}

/// Match terms of `field` starting with `prefix`
pub fn prefix(field: impl Into<String>, prefix: impl Into<String>) -> PrefixConditionBuilder {
    PrefixConditionBuilder {
        field: field.into(),
        value: Some(prefix.into()),
        ..Default::default()
    }
}

/// Open range over `field`, narrowed with the fluent setters
pub fn range(field: impl Into<String>) -> RangeConditionBuilder {
    RangeConditionBuilder {
        field: field.into(),
        ..Default::default()
    }
}

/// Geo points of `field` inside a bounding box
pub fn geo_bbox(
    field: impl Into<String>,
    min_longitude: f64,
    max_longitude: f64,
    min_latitude: f64,
    max_latitude: f64,
) -> GeoBBoxConditionBuilder {
    GeoBBoxConditionBuilder {
        field: field.into(),
        boost: None,
        min_longitude: Some(min_longitude),
        max_longitude: Some(max_longitude),
        min_latitude: Some(min_latitude),
        max_latitude: Some(max_latitude),
    }
}

/// Unbounded bitemporal condition over `field`, narrowed with the fluent setters
pub fn bitemporal(field: impl Into<String>) -> BiTemporalConditionBuilder {
    BiTemporalConditionBuilder {
        field: field.into(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::DEFAULT_BOOST;
    use serde_json::json;

    #[test]
    fn test_match_from_json() {
        let builder =
            ConditionBuilder::from_json(r#"{"type":"match","field":"name","value":"Stratio","boost":0.5}"#)
                .unwrap();
        assert_eq!(
            builder,
            ConditionBuilder::from(match_value("name", "Stratio").boost(0.5))
        );

        let condition = builder.build().unwrap();
        assert_eq!(condition.boost(), 0.5);
        match condition.kind() {
            ConditionKind::Match(c) => assert_eq!(c.value(), &json!("Stratio")),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_match_without_value() {
        let builder = ConditionBuilder::from_json(r#"{"type":"match","field":"name"}"#).unwrap();
        assert!(matches!(builder.build(), Err(CondexError::InvalidArgument(_))));

        let builder =
            ConditionBuilder::from_json(r#"{"type":"match","field":"name","value":null}"#).unwrap();
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_missing_field() {
        let builder = ConditionBuilder::from_json(r#"{"type":"regexp","value":"a.*"}"#).unwrap();
        assert_eq!(builder.field(), "");
        assert!(matches!(builder.build(), Err(CondexError::InvalidArgument(_))));
    }

    #[test]
    fn test_unknown_type() {
        assert!(matches!(
            ConditionBuilder::from_json(r#"{"type":"fuzzy","field":"name","value":"a"}"#),
            Err(CondexError::Serialization(_))
        ));
    }

    #[test]
    fn test_wildcard_uses_value_key() {
        let builder = ConditionBuilder::from(wildcard("name", "tu*"));
        assert_eq!(
            builder.to_json().unwrap(),
            r#"{"type":"wildcard","field":"name","value":"tu*"}"#
        );
    }

    #[test]
    fn test_range_defaults() {
        let condition = ConditionBuilder::from_json(r#"{"type":"range","field":"age","lower":1}"#)
            .unwrap()
            .build()
            .unwrap();
        match condition.kind() {
            ConditionKind::Range(c) => {
                assert_eq!(c.lower(), Some(&json!(1)));
                assert_eq!(c.upper(), None);
                assert!(!c.include_lower());
                assert!(!c.include_upper());
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_geo_bbox_requires_coordinates() {
        let builder = ConditionBuilder::from_json(
            r#"{"type":"geo_bbox","field":"place","min_longitude":-1.0,"max_longitude":1.0,"min_latitude":-1.0}"#,
        )
        .unwrap();
        let err = builder.build().unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: max_latitude required");
    }

    #[test]
    fn test_geo_bbox_validates() {
        assert!(geo_bbox("place", 1.0, -1.0, 0.0, 0.0).build().is_err());
        assert!(geo_bbox("place", -1.0, 1.0, 0.0, 0.0).build().is_ok());
    }

    #[test]
    fn test_bitemporal_defaults() {
        let builder = bitemporal("field");
        assert_eq!(builder.to_json_value(), json!({"type": "bitemporal", "field": "field"}));

        let condition = builder.build().unwrap();
        assert_eq!(condition.boost(), DEFAULT_BOOST);
        match condition.kind() {
            ConditionKind::BiTemporal(c) => {
                assert_eq!(c.tt_from(), None);
                assert_eq!(c.vt_to(), None);
                assert_eq!(c.operation(), BiTemporalOperation::Contains);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_bitemporal_json_with_boost() {
        let json = ConditionBuilder::from(bitemporal("field").boost(0.7))
            .to_json()
            .unwrap();
        assert_eq!(json, r#"{"type":"bitemporal","field":"field","boost":0.7}"#);
    }

    #[test]
    fn test_bitemporal_keeps_raw_endpoints() {
        let condition = bitemporal("field")
            .tt_from("2015/03/20 11:45:32.333")
            .tt_to("2013/03/20 11:45:32.333")
            .vt_from(1_i64)
            .vt_to(2_i64)
            .operation("intersects")
            .build()
            .unwrap();
        match condition.kind() {
            ConditionKind::BiTemporal(c) => {
                assert_eq!(c.tt_from(), Some(&json!("2015/03/20 11:45:32.333")));
                assert_eq!(c.tt_to(), Some(&json!("2013/03/20 11:45:32.333")));
                assert_eq!(c.vt_from(), Some(&json!(1)));
                assert_eq!(c.vt_to(), Some(&json!(2)));
                assert_eq!(c.operation(), BiTemporalOperation::Intersects);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_bitemporal_unknown_operation() {
        let err = bitemporal("field").operation("overlaps").build().unwrap_err();
        assert!(matches!(err, CondexError::InvalidArgument(_)));
    }

    #[test]
    fn test_from_condition_substitutes_defaults() {
        let condition = bitemporal("period").tt_from(5_i64).build().unwrap();
        let builder = ConditionBuilder::from(&condition);
        assert_eq!(
            builder,
            ConditionBuilder::BiTemporal(BiTemporalConditionBuilder {
                field: "period".to_string(),
                boost: Some(1.0),
                tt_from: Some(json!(5)),
                operation: Some("contains".to_string()),
                ..Default::default()
            })
        );
        assert_eq!(builder.build().unwrap(), condition);
    }

    impl BiTemporalConditionBuilder {
        fn to_json_value(&self) -> Value {
            serde_json::to_value(ConditionBuilder::from(self.clone())).unwrap()
        }
    }
}
