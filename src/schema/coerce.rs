//! Coercion of loosely typed input into base types
//!
//! Numbers coming from JSON may be integers or floating point; strings are
//! parsed with standard numeric literal rules. Integral targets truncate toward
//! zero and never round; floating values beyond the target's range saturate.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::field_type::BaseType;
use crate::error::{CondexError, Result};
use crate::geo::GeoPoint;

fn describe(raw: &Value) -> String {
    match raw {
        Value::String(s) => format!("'{}'", s),
        other => other.to_string(),
    }
}

fn parse_f64(field: &str, base_type: BaseType, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| CondexError::coercion(field, base_type, format!("unparseable '{}'", text)))
}

fn finite(field: &str, base_type: BaseType, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CondexError::coercion(
            field,
            base_type,
            format!("{} is not a finite number", value),
        ))
    }
}

/// Truncate toward zero, saturating at `[min, max]`
fn truncate(field: &str, base_type: BaseType, value: f64, min: i64, max: i64) -> Result<i64> {
    let truncated = finite(field, base_type, value)?.trunc() as i64;
    Ok(truncated.clamp(min, max))
}

fn to_integral(field: &str, raw: &Value, base_type: BaseType, min: i64, max: i64) -> Result<i64> {
    let value = match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(f) = n.as_f64().filter(|_| !n.is_u64()) {
                truncate(field, base_type, f, min, max)?
            } else {
                return Err(CondexError::coercion(
                    field,
                    base_type,
                    format!("{} is out of range", n),
                ));
            }
        }
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => i,
            Err(_) => {
                let parsed = parse_f64(field, base_type, s)?;
                truncate(field, base_type, parsed, min, max)?
            }
        },
        other => {
            return Err(CondexError::coercion(
                field,
                base_type,
                format!("unsupported value {}", describe(other)),
            ))
        }
    };

    if value < min || value > max {
        return Err(CondexError::coercion(
            field,
            base_type,
            format!("{} is out of range", value),
        ));
    }
    Ok(value)
}

pub fn to_long(field: &str, raw: &Value) -> Result<i64> {
    to_integral(field, raw, BaseType::Long, i64::MIN, i64::MAX)
}

pub fn to_integer(field: &str, raw: &Value) -> Result<i32> {
    let value = to_integral(
        field,
        raw,
        BaseType::Integer,
        i64::from(i32::MIN),
        i64::from(i32::MAX),
    )?;
    i32::try_from(value)
        .map_err(|_| CondexError::coercion(field, BaseType::Integer, "out of range"))
}

fn to_floating(field: &str, raw: &Value, base_type: BaseType) -> Result<f64> {
    let value = match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| CondexError::coercion(field, base_type, format!("unsupported {}", n)))?,
        Value::String(s) => parse_f64(field, base_type, s)?,
        other => {
            return Err(CondexError::coercion(
                field,
                base_type,
                format!("unsupported value {}", describe(other)),
            ))
        }
    };
    finite(field, base_type, value)
}

pub fn to_double(field: &str, raw: &Value) -> Result<f64> {
    to_floating(field, raw, BaseType::Double)
}

pub fn to_float(field: &str, raw: &Value) -> Result<f32> {
    let value = to_floating(field, raw, BaseType::Float)? as f32;
    finite(field, BaseType::Float, f64::from(value))?;
    Ok(value)
}

pub fn to_string(field: &str, raw: &Value) -> Result<String> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(CondexError::coercion(
            field,
            BaseType::String,
            format!("unsupported value {}", describe(other)),
        )),
    }
}

pub fn to_boolean(field: &str, raw: &Value) -> Result<String> {
    let value = match raw {
        Value::Bool(b) => *b,
        Value::String(s) if s.eq_ignore_ascii_case("true") => true,
        Value::String(s) if s.eq_ignore_ascii_case("false") => false,
        other => {
            return Err(CondexError::coercion(
                field,
                BaseType::String,
                format!("{} is not a boolean", describe(other)),
            ))
        }
    };
    Ok(value.to_string())
}

pub fn to_uuid(field: &str, raw: &Value) -> Result<Uuid> {
    match raw {
        Value::String(s) => Uuid::parse_str(s.trim()).map_err(|e| {
            CondexError::coercion(field, BaseType::Uuid, format!("'{}': {}", s, e))
        }),
        other => Err(CondexError::coercion(
            field,
            BaseType::Uuid,
            format!("unsupported value {}", describe(other)),
        )),
    }
}

/// Parse an instant from epoch milliseconds, a `pattern` string or RFC 3339
pub fn to_instant(
    field: &str,
    raw: &Value,
    pattern: &str,
    base_type: BaseType,
) -> Result<DateTime<Utc>> {
    let from_millis = |millis: i64| {
        DateTime::from_timestamp_millis(millis).ok_or_else(|| {
            CondexError::coercion(field, base_type, format!("{} is out of range", millis))
        })
    };

    match raw {
        Value::Number(_) => from_millis(to_long(field, raw)?),
        Value::String(s) => {
            let text = s.trim();
            if let Ok(millis) = text.parse::<i64>() {
                return from_millis(millis);
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
                return Ok(naive.and_utc());
            }
            if let Ok(date) = NaiveDate::parse_from_str(text, pattern) {
                if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                    return Ok(naive.and_utc());
                }
            }
            DateTime::parse_from_rfc3339(text)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|_| {
                    CondexError::coercion(
                        field,
                        base_type,
                        format!("'{}' does not match pattern '{}'", s, pattern),
                    )
                })
        }
        other => Err(CondexError::coercion(
            field,
            base_type,
            format!("unsupported value {}", describe(other)),
        )),
    }
}

/// Parse `{"longitude": x, "latitude": y}` or `[x, y]`
pub fn to_geo_point(field: &str, raw: &Value) -> Result<GeoPoint> {
    let coordinate = |value: Option<&Value>, name: &str| -> Result<f64> {
        let value = value.ok_or_else(|| {
            CondexError::coercion(field, BaseType::GeoPoint, format!("missing {}", name))
        })?;
        to_floating(field, value, BaseType::GeoPoint)
    };

    let point = match raw {
        Value::Object(map) => GeoPoint::new(
            coordinate(map.get("longitude"), "longitude")?,
            coordinate(map.get("latitude"), "latitude")?,
        ),
        Value::Array(items) if items.len() == 2 => GeoPoint::new(
            coordinate(items.first(), "longitude")?,
            coordinate(items.get(1), "latitude")?,
        ),
        other => {
            return Err(CondexError::coercion(
                field,
                BaseType::GeoPoint,
                format!("unsupported value {}", describe(other)),
            ))
        }
    };

    if !point.is_valid() {
        return Err(CondexError::coercion(
            field,
            BaseType::GeoPoint,
            format!("{} is outside [-180, 180] x [-90, 90]", point),
        ));
    }
    Ok(point)
}
