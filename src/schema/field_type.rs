//! Field type definitions
//!
//! A mapper's *kind* says how a column is indexed; its *base type* says which
//! value domain the kind coerces into. Several kinds share a base type (text,
//! keyword and boolean columns are all matched as strings).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value domain a mapper coerces raw input into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseType {
    String,
    Integer,
    Long,
    Float,
    Double,
    Uuid,
    GeoPoint,
    BiTemporal,
}

impl BaseType {
    pub fn name(&self) -> &'static str {
        match self {
            BaseType::String => "string",
            BaseType::Integer => "integer",
            BaseType::Long => "long",
            BaseType::Float => "float",
            BaseType::Double => "double",
            BaseType::Uuid => "uuid",
            BaseType::GeoPoint => "geo_point",
            BaseType::BiTemporal => "bitemporal",
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Default chrono pattern for date strings, e.g. `2015/03/20 11:45:32.333`
pub const DEFAULT_DATE_PATTERN: &str = "%Y/%m/%d %H:%M:%S%.3f";

/// How a column is indexed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapperKind {
    /// Exact-match string indexed as a single term
    String,

    /// Free text analyzed into terms
    Text {
        /// Analyzer to use; the schema default when unset
        #[serde(default)]
        analyzer: Option<String>,
    },

    /// 32-bit signed integer
    Integer,

    /// 64-bit signed integer
    Long,

    /// 32-bit floating point
    Float,

    /// 64-bit floating point
    Double,

    /// Boolean stored as the terms `true` and `false`
    Boolean,

    /// UUID in canonical lowercase hyphenated form
    Uuid,

    /// Instant stored as epoch milliseconds
    Date {
        #[serde(default = "default_date_pattern")]
        pattern: String,
    },

    /// Longitude/latitude point indexed in a geohash prefix tree
    GeoPoint {
        /// Tree depth; the schema's geo setting when unset
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_levels: Option<u8>,
    },

    /// Transaction-time and valid-time intervals of a record
    BiTemporal {
        #[serde(default = "default_date_pattern")]
        pattern: String,
    },
}

fn default_date_pattern() -> String {
    DEFAULT_DATE_PATTERN.to_string()
}

impl MapperKind {
    pub fn text() -> Self {
        MapperKind::Text { analyzer: None }
    }

    pub fn text_with_analyzer(analyzer: impl Into<String>) -> Self {
        MapperKind::Text {
            analyzer: Some(analyzer.into()),
        }
    }

    pub fn date() -> Self {
        MapperKind::Date {
            pattern: default_date_pattern(),
        }
    }

    pub fn geo_point() -> Self {
        MapperKind::GeoPoint { max_levels: None }
    }

    pub fn bitemporal() -> Self {
        MapperKind::BiTemporal {
            pattern: default_date_pattern(),
        }
    }

    /// Base type this kind coerces into
    pub fn base_type(&self) -> BaseType {
        match self {
            MapperKind::String
            | MapperKind::Text { .. }
            | MapperKind::Boolean => BaseType::String,
            MapperKind::Integer => BaseType::Integer,
            MapperKind::Long | MapperKind::Date { .. } => BaseType::Long,
            MapperKind::Float => BaseType::Float,
            MapperKind::Double => BaseType::Double,
            MapperKind::Uuid => BaseType::Uuid,
            MapperKind::GeoPoint { .. } => BaseType::GeoPoint,
            MapperKind::BiTemporal { .. } => BaseType::BiTemporal,
        }
    }

    /// Display name, e.g. `Long` for `LongMapper`
    pub fn name(&self) -> &'static str {
        match self {
            MapperKind::String => "String",
            MapperKind::Text { .. } => "Text",
            MapperKind::Integer => "Integer",
            MapperKind::Long => "Long",
            MapperKind::Float => "Float",
            MapperKind::Double => "Double",
            MapperKind::Boolean => "Boolean",
            MapperKind::Uuid => "UUID",
            MapperKind::Date { .. } => "Date",
            MapperKind::GeoPoint { .. } => "GeoPoint",
            MapperKind::BiTemporal { .. } => "BiTemporal",
        }
    }


}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_types() {
        assert_eq!(MapperKind::String.base_type(), BaseType::String);
        assert_eq!(MapperKind::text().base_type(), BaseType::String);
        assert_eq!(MapperKind::Boolean.base_type(), BaseType::String);
        assert_eq!(MapperKind::date().base_type(), BaseType::Long);
        assert_eq!(MapperKind::Uuid.base_type(), BaseType::Uuid);
        assert_eq!(MapperKind::geo_point().base_type(), BaseType::GeoPoint);
        assert_eq!(MapperKind::bitemporal().base_type(), BaseType::BiTemporal);
    }

    #[test]
    fn test_serialization() {
        let kind: MapperKind = serde_json::from_str(r#"{"type":"long"}"#).unwrap();
        assert_eq!(kind, MapperKind::Long);

        let kind: MapperKind = serde_json::from_str(r#"{"type":"geo_point"}"#).unwrap();
        assert_eq!(kind, MapperKind::GeoPoint { max_levels: None });

        let kind: MapperKind =
            serde_json::from_str(r#"{"type":"geo_point","max_levels":8}"#).unwrap();
        assert_eq!(kind, MapperKind::GeoPoint { max_levels: Some(8) });
        assert_eq!(
            serde_json::to_string(&MapperKind::geo_point()).unwrap(),
            r#"{"type":"geo_point"}"#
        );

        let json = serde_json::to_string(&MapperKind::text_with_analyzer("english")).unwrap();
        assert!(json.contains("\"type\":\"text\""));
        assert!(json.contains("\"analyzer\":\"english\""));
    }
}
