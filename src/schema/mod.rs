//! Schema and field type system
//!
//! This module defines how columns are typed and encoded:
//! - Mapper kinds and the base types they coerce into
//! - Coercion of raw JSON values
//! - Index and doc-values encodings
//! - The immutable schema that resolves fields to mappers

mod bitemporal;
pub mod coerce;
mod field;
mod field_type;
mod mapper;
mod mapping;
mod value;

pub use bitemporal::{BiTemporalInterval, TimeRange, MAX_INSTANT, MIN_INSTANT};
pub use field::{
    double_to_sortable_long, float_to_sortable_int, DocValue, DocValuesType, IndexedField,
    IndexedValue, SortField, SortType, SortedField,
};
pub use field_type::{BaseType, MapperKind, DEFAULT_DATE_PATTERN};
pub use mapper::{Mapper, DEFAULT_BOOST, DEFAULT_INDEXED, DEFAULT_SORTED};
pub use mapping::{Schema, SchemaBuilder};
pub use value::{BaseValue, NumericValue};
