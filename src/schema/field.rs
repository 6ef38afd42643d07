//! Index and sort encodings produced by mappers

use serde::{Deserialize, Serialize};

use super::bitemporal::BiTemporalInterval;
use super::value::NumericValue;
use crate::geo::GeoPoint;

/// Searchable value of an indexed field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexedValue {
    /// Single untokenized term
    Term(String),
    /// Text analyzed into terms when matched
    Text(String),
    /// Numeric value for range matching
    Numeric(NumericValue),
    /// Point with its prefix tree cells, coarsest first
    GeoPoint { point: GeoPoint, cells: Vec<String> },
    /// Record intervals on both time axes
    BiTemporal(BiTemporalInterval),
}

/// A field as written to the index
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexedField {
    pub name: String,
    pub value: IndexedValue,
}

impl IndexedField {
    pub fn new(name: impl Into<String>, value: IndexedValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Doc-values flavor of a sorted field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocValuesType {
    /// One 64-bit value per document
    Numeric,
    /// One byte string per document
    Sorted,
    /// Several byte strings per document
    SortedSet,
}

/// Column value used for ordering
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocValue {
    Numeric(i64),
    Bytes(String),
}

/// A field as written to the doc-values column store
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortedField {
    pub name: String,
    pub doc_values_type: DocValuesType,
    pub value: DocValue,
}

/// Comparator used by a sort field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortType {
    String,
    Int,
    Long,
    Float,
    Double,
}

/// Sort specification over one field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,
    pub sort_type: SortType,
    pub reverse: bool,
}

impl SortField {
    pub fn new(field: impl Into<String>, sort_type: SortType, reverse: bool) -> Self {
        Self {
            field: field.into(),
            sort_type,
            reverse,
        }
    }
}

/// Map a double onto a long with the same ordering
///
/// Negative values have their magnitude bits flipped so that more negative
/// doubles become smaller longs.
pub fn double_to_sortable_long(value: f64) -> i64 {
    let bits = value.to_bits() as i64;
    bits ^ ((bits >> 63) & 0x7fff_ffff_ffff_ffff)
}

/// Map a float onto an int with the same ordering
pub fn float_to_sortable_int(value: f32) -> i32 {
    let bits = value.to_bits() as i32;
    bits ^ ((bits >> 31) & 0x7fff_ffff)
}
