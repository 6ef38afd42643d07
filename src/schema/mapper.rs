//! Per-field mappers
//!
//! A mapper knows how one column is indexed: which base type raw values are
//! coerced into, how the coerced value is written to the index and to the
//! doc-values store, and which analyzer matches it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::bitemporal::{BiTemporalInterval, TimeRange};
use super::coerce;
use super::field::{
    double_to_sortable_long, float_to_sortable_int, DocValue, DocValuesType, IndexedField,
    IndexedValue, SortField, SortType, SortedField,
};
use super::field_type::{BaseType, MapperKind};
use super::value::{BaseValue, NumericValue};
use crate::config::{GeoConfig, KEYWORD_ANALYZER};
use crate::error::{CondexError, Result};
use crate::geo::GeohashPrefixTree;

/// Default for whether a mapper writes an index encoding
pub const DEFAULT_INDEXED: bool = true;

/// Default for whether a mapper writes a doc-values encoding
pub const DEFAULT_SORTED: bool = false;

/// Default mapper boost
pub const DEFAULT_BOOST: f32 = 0.1;

/// Field mapping configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mapper {
    /// Column name
    pub name: String,

    /// Indexing strategy and base type
    #[serde(flatten)]
    pub kind: MapperKind,

    /// Whether values are written to the index (default: true)
    #[serde(default = "default_indexed")]
    pub indexed: bool,

    /// Whether values are written to doc values for sorting (default: false)
    #[serde(default)]
    pub sorted: bool,

    /// Index-time boost
    #[serde(default = "default_boost")]
    pub boost: f32,
}

fn default_indexed() -> bool {
    DEFAULT_INDEXED
}

fn default_boost() -> f32 {
    DEFAULT_BOOST
}

impl Mapper {
    /// Create a new mapper with default indexing options
    pub fn new(name: impl Into<String>, kind: MapperKind) -> Self {
        Self {
            name: name.into(),
            kind,
            indexed: DEFAULT_INDEXED,
            sorted: DEFAULT_SORTED,
            boost: DEFAULT_BOOST,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, MapperKind::String)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, MapperKind::text())
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, MapperKind::Integer)
    }

    pub fn long(name: impl Into<String>) -> Self {
        Self::new(name, MapperKind::Long)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, MapperKind::Float)
    }

    pub fn double(name: impl Into<String>) -> Self {
        Self::new(name, MapperKind::Double)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, MapperKind::Boolean)
    }

    pub fn uuid(name: impl Into<String>) -> Self {
        Self::new(name, MapperKind::Uuid)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, MapperKind::date())
    }

    pub fn geo_point(name: impl Into<String>, max_levels: u8) -> Self {
        Self::new(
            name,
            MapperKind::GeoPoint {
                max_levels: Some(max_levels),
            },
        )
    }

    pub fn bitemporal(name: impl Into<String>) -> Self {
        Self::new(name, MapperKind::bitemporal())
    }

    pub fn with_indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    pub fn base_type(&self) -> BaseType {
        self.kind.base_type()
    }

    /// Analyzer name, or `None` for the schema's default text analyzer
    pub fn analyzer(&self) -> Option<&str> {
        match &self.kind {
            MapperKind::Text { analyzer } => analyzer.as_deref(),
            _ => Some(KEYWORD_ANALYZER),
        }
    }

    /// Prefix tree of a geo point mapper
    ///
    /// A mapper outside a schema with no explicit depth uses the default
    /// geo config.
    pub fn prefix_tree(&self) -> Result<Option<GeohashPrefixTree>> {
        match self.kind {
            MapperKind::GeoPoint { max_levels } => {
                let max_levels = max_levels.unwrap_or_else(|| GeoConfig::default().max_levels);
                GeohashPrefixTree::new(max_levels).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Coerce a raw value into this mapper's base type
    ///
    /// `null` coerces to `None` so callers can express an absent value.
    pub fn coerce(&self, field: &str, raw: &Value) -> Result<Option<BaseValue>> {
        if raw.is_null() {
            return Ok(None);
        }

        let value = match &self.kind {
            MapperKind::String | MapperKind::Text { .. } => {
                BaseValue::String(coerce::to_string(field, raw)?)
            }
            MapperKind::Boolean => BaseValue::String(coerce::to_boolean(field, raw)?),
            MapperKind::Integer => BaseValue::Integer(coerce::to_integer(field, raw)?),
            MapperKind::Long => BaseValue::Long(coerce::to_long(field, raw)?),
            MapperKind::Float => BaseValue::Float(coerce::to_float(field, raw)?),
            MapperKind::Double => BaseValue::Double(coerce::to_double(field, raw)?),
            MapperKind::Uuid => BaseValue::Uuid(coerce::to_uuid(field, raw)?),
            MapperKind::Date { pattern } => BaseValue::Long(
                coerce::to_instant(field, raw, pattern, BaseType::Long)?.timestamp_millis(),
            ),
            MapperKind::GeoPoint { .. } => BaseValue::GeoPoint(coerce::to_geo_point(field, raw)?),
            MapperKind::BiTemporal { pattern } => BaseValue::Instant(coerce::to_instant(
                field,
                raw,
                pattern,
                BaseType::BiTemporal,
            )?),
        };
        Ok(Some(value))
    }

    /// Coerce a raw instant for a bitemporal mapper
    pub fn coerce_instant(&self, field: &str, raw: Option<&Value>) -> Result<Option<DateTime<Utc>>> {
        match raw {
            None => Ok(None),
            Some(raw) => match self.coerce(field, raw)? {
                None => Ok(None),
                Some(BaseValue::Instant(t)) => Ok(Some(t)),
                Some(other) => Err(CondexError::coercion(
                    field,
                    self.base_type(),
                    format!("{} is not an instant", other),
                )),
            },
        }
    }

    /// Build a record interval from four raw endpoints
    ///
    /// Missing or null endpoints are open. An axis whose start is after its end
    /// is rejected.
    pub fn interval(
        &self,
        field: &str,
        tt_from: Option<&Value>,
        tt_to: Option<&Value>,
        vt_from: Option<&Value>,
        vt_to: Option<&Value>,
    ) -> Result<BiTemporalInterval> {
        if !matches!(self.kind, MapperKind::BiTemporal { .. }) {
            return Err(CondexError::invalid(format!(
                "{} mapper '{}' does not store bitemporal intervals",
                self.kind.name(),
                self.name
            )));
        }

        let interval = BiTemporalInterval::new(
            TimeRange::new(
                self.coerce_instant(field, tt_from)?,
                self.coerce_instant(field, tt_to)?,
            ),
            TimeRange::new(
                self.coerce_instant(field, vt_from)?,
                self.coerce_instant(field, vt_to)?,
            ),
        );

        if interval.transaction_time.is_empty() {
            return Err(CondexError::invalid(format!(
                "tt_from is after tt_to for field '{}'",
                field
            )));
        }
        if interval.valid_time.is_empty() {
            return Err(CondexError::invalid(format!(
                "vt_from is after vt_to for field '{}'",
                field
            )));
        }
        Ok(interval)
    }

    fn mismatch(&self, value: &BaseValue) -> CondexError {
        CondexError::invalid(format!(
            "{} mapper '{}' cannot encode {} value {}",
            self.kind.name(),
            self.name,
            value.base_type(),
            value
        ))
    }

    /// Searchable encoding of a coerced value
    pub fn indexed_field(&self, name: &str, value: &BaseValue) -> Result<IndexedField> {
        if !self.indexed {
            return Err(CondexError::invalid(format!(
                "Mapper '{}' is not indexed",
                self.name
            )));
        }

        let indexed = match (&self.kind, value) {
            (MapperKind::Text { .. }, BaseValue::String(s)) => IndexedValue::Text(s.clone()),
            (MapperKind::String | MapperKind::Boolean, BaseValue::String(s)) => {
                IndexedValue::Term(s.clone())
            }
            (MapperKind::Uuid, BaseValue::Uuid(u)) => IndexedValue::Term(u.to_string()),
            (MapperKind::Integer, BaseValue::Integer(v)) => {
                IndexedValue::Numeric(NumericValue::Int(*v))
            }
            (MapperKind::Long | MapperKind::Date { .. }, BaseValue::Long(v)) => {
                IndexedValue::Numeric(NumericValue::Long(*v))
            }
            (MapperKind::Float, BaseValue::Float(v)) => {
                IndexedValue::Numeric(NumericValue::Float(*v))
            }
            (MapperKind::Double, BaseValue::Double(v)) => {
                IndexedValue::Numeric(NumericValue::Double(*v))
            }
            (MapperKind::GeoPoint { .. }, BaseValue::GeoPoint(point)) => {
                let tree = self.prefix_tree()?.ok_or_else(|| self.mismatch(value))?;
                IndexedValue::GeoPoint {
                    point: *point,
                    cells: tree.cells(point),
                }
            }
            _ => return Err(self.mismatch(value)),
        };
        Ok(IndexedField::new(name, indexed))
    }

    /// Doc-values encoding of a coerced value
    pub fn sorted_field(
        &self,
        name: &str,
        value: &BaseValue,
        is_multi_valued: bool,
    ) -> Result<SortedField> {
        if !self.sorted {
            return Err(CondexError::invalid(format!(
                "Mapper '{}' is not sorted",
                self.name
            )));
        }

        let (doc_values_type, encoded) = match (&self.kind, value) {
            (
                MapperKind::String | MapperKind::Text { .. } | MapperKind::Boolean,
                BaseValue::String(s),
            ) => (bytes_type(is_multi_valued), DocValue::Bytes(s.clone())),
            (MapperKind::Uuid, BaseValue::Uuid(u)) => {
                (bytes_type(is_multi_valued), DocValue::Bytes(u.to_string()))
            }
            (MapperKind::Integer, BaseValue::Integer(v)) => {
                (DocValuesType::Numeric, DocValue::Numeric(i64::from(*v)))
            }
            (MapperKind::Long | MapperKind::Date { .. }, BaseValue::Long(v)) => {
                (DocValuesType::Numeric, DocValue::Numeric(*v))
            }
            (MapperKind::Float, BaseValue::Float(v)) => (
                DocValuesType::Numeric,
                DocValue::Numeric(i64::from(float_to_sortable_int(*v))),
            ),
            (MapperKind::Double, BaseValue::Double(v)) => (
                DocValuesType::Numeric,
                DocValue::Numeric(double_to_sortable_long(*v)),
            ),
            _ => return Err(self.mismatch(value)),
        };

        Ok(SortedField {
            name: name.to_string(),
            doc_values_type,
            value: encoded,
        })
    }

    /// Sort specification for this mapper's column
    pub fn sort_field(&self, reverse: bool) -> Result<SortField> {
        let sort_type = match &self.kind {
            MapperKind::String
            | MapperKind::Text { .. }
            | MapperKind::Boolean
            | MapperKind::Uuid => SortType::String,
            MapperKind::Integer => SortType::Int,
            MapperKind::Long | MapperKind::Date { .. } => SortType::Long,
            MapperKind::Float => SortType::Float,
            MapperKind::Double => SortType::Double,
            MapperKind::GeoPoint { .. } | MapperKind::BiTemporal { .. } => {
                return Err(CondexError::invalid(format!(
                    "{} mapper '{}' does not support sorting",
                    self.kind.name(),
                    self.name
                )))
            }
        };
        Ok(SortField::new(self.name.clone(), sort_type, reverse))
    }
}

fn bytes_type(is_multi_valued: bool) -> DocValuesType {
    if is_multi_valued {
        DocValuesType::SortedSet
    } else {
        DocValuesType::Sorted
    }
}

impl fmt::Display for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Mapper{{indexed={}, sorted={}, boost={}}}",
            self.kind.name(),
            self.indexed,
            self.sorted,
            self.boost
        )
    }
}
