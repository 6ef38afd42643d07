//! Values after coercion into a mapper's base type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

use super::field_type::BaseType;
use crate::geo::GeoPoint;

/// Numeric value as indexed by a numeric mapper
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl NumericValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            NumericValue::Int(v) => f64::from(*v),
            NumericValue::Long(v) => *v as f64,
            NumericValue::Float(v) => f64::from(*v),
            NumericValue::Double(v) => *v,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            NumericValue::Int(v) => Some(i64::from(*v)),
            NumericValue::Long(v) => Some(*v),
            NumericValue::Float(_) | NumericValue::Double(_) => None,
        }
    }

    /// Compare two values, exactly for integers and as doubles otherwise
    pub fn compare(&self, other: &NumericValue) -> Option<Ordering> {
        match (self.as_i64(), other.as_i64()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Int(v) => write!(f, "{}", v),
            NumericValue::Long(v) => write!(f, "{}", v),
            NumericValue::Float(v) => write!(f, "{:?}", v),
            NumericValue::Double(v) => write!(f, "{:?}", v),
        }
    }
}

/// A raw value coerced into a mapper's base type
#[derive(Clone, Debug, PartialEq)]
pub enum BaseValue {
    String(String),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Uuid(Uuid),
    GeoPoint(GeoPoint),
    Instant(DateTime<Utc>),
}

impl BaseValue {
    pub fn base_type(&self) -> BaseType {
        match self {
            BaseValue::String(_) => BaseType::String,
            BaseValue::Integer(_) => BaseType::Integer,
            BaseValue::Long(_) => BaseType::Long,
            BaseValue::Float(_) => BaseType::Float,
            BaseValue::Double(_) => BaseType::Double,
            BaseValue::Uuid(_) => BaseType::Uuid,
            BaseValue::GeoPoint(_) => BaseType::GeoPoint,
            BaseValue::Instant(_) => BaseType::BiTemporal,
        }
    }

    pub fn as_numeric(&self) -> Option<NumericValue> {
        match self {
            BaseValue::Integer(v) => Some(NumericValue::Int(*v)),
            BaseValue::Long(v) => Some(NumericValue::Long(*v)),
            BaseValue::Float(v) => Some(NumericValue::Float(*v)),
            BaseValue::Double(v) => Some(NumericValue::Double(*v)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            BaseValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Raw JSON form that coerces back into this same value
    pub fn to_json(&self) -> Value {
        match self {
            BaseValue::String(s) => Value::String(s.clone()),
            BaseValue::Integer(v) => json!(v),
            BaseValue::Long(v) => json!(v),
            BaseValue::Float(v) => json!(v),
            BaseValue::Double(v) => json!(v),
            BaseValue::Uuid(v) => Value::String(v.to_string()),
            BaseValue::GeoPoint(p) => json!({ "longitude": p.longitude, "latitude": p.latitude }),
            BaseValue::Instant(t) => json!(t.timestamp_millis()),
        }
    }
}

impl fmt::Display for BaseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseValue::String(s) => f.write_str(s),
            BaseValue::Integer(v) => write!(f, "{}", v),
            BaseValue::Long(v) => write!(f, "{}", v),
            BaseValue::Float(v) => write!(f, "{:?}", v),
            BaseValue::Double(v) => write!(f, "{:?}", v),
            BaseValue::Uuid(v) => write!(f, "{}", v),
            BaseValue::GeoPoint(p) => write!(f, "{}", p),
            BaseValue::Instant(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_compare() {
        assert_eq!(
            NumericValue::Long(3).compare(&NumericValue::Int(3)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            NumericValue::Long(i64::MAX).compare(&NumericValue::Long(i64::MAX - 1)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            NumericValue::Double(2.5).compare(&NumericValue::Long(3)),
            Some(Ordering::Less)
        );
        assert_eq!(
            NumericValue::Double(f64::NAN).compare(&NumericValue::Long(3)),
            None
        );
    }

    #[test]
    fn test_numeric_display() {
        assert_eq!(NumericValue::Long(3).to_string(), "3");
        assert_eq!(NumericValue::Double(3.0).to_string(), "3.0");
    }

    #[test]
    fn test_base_value_accessors() {
        let value = BaseValue::Long(42);
        assert_eq!(value.base_type(), BaseType::Long);
        assert_eq!(value.as_numeric(), Some(NumericValue::Long(42)));
        assert_eq!(value.as_str(), None);
        assert_eq!(value.to_json(), json!(42));

        let value = BaseValue::String("foo".to_string());
        assert_eq!(value.as_str(), Some("foo"));
        assert_eq!(value.as_numeric(), None);
    }
}
