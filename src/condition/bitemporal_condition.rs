//! Bitemporal condition - relates stored record intervals to a query interval
//!
//! Endpoints are kept raw until compile time, where the field's mapper parses
//! them with its own date pattern. Absent endpoints leave that end open.

use serde_json::Value;
use std::fmt;

use super::{display_optional, non_null, unsupported};
use crate::error::Result;
use crate::query::{BiTemporalOperation, BiTemporalQuery, Query};
use crate::schema::{BaseType, BiTemporalInterval, Mapper, TimeRange};

#[derive(Clone, Debug, PartialEq)]
pub struct BiTemporalCondition {
    tt_from: Option<Value>,
    tt_to: Option<Value>,
    vt_from: Option<Value>,
    vt_to: Option<Value>,
    operation: BiTemporalOperation,
}

impl BiTemporalCondition {
    pub(crate) fn new(
        tt_from: Option<Value>,
        tt_to: Option<Value>,
        vt_from: Option<Value>,
        vt_to: Option<Value>,
        operation: BiTemporalOperation,
    ) -> Self {
        Self {
            tt_from: non_null(tt_from),
            tt_to: non_null(tt_to),
            vt_from: non_null(vt_from),
            vt_to: non_null(vt_to),
            operation,
        }
    }

    pub fn tt_from(&self) -> Option<&Value> {
        self.tt_from.as_ref()
    }

    pub fn tt_to(&self) -> Option<&Value> {
        self.tt_to.as_ref()
    }

    pub fn vt_from(&self) -> Option<&Value> {
        self.vt_from.as_ref()
    }

    pub fn vt_to(&self) -> Option<&Value> {
        self.vt_to.as_ref()
    }

    pub fn operation(&self) -> BiTemporalOperation {
        self.operation
    }

    pub(crate) fn query(&self, field: &str, mapper: &Mapper) -> Result<Query> {
        match mapper.base_type() {
            BaseType::BiTemporal => {
                let instant = |raw: &Option<Value>| mapper.coerce_instant(field, raw.as_ref());
                let interval = BiTemporalInterval::new(
                    TimeRange::new(instant(&self.tt_from)?, instant(&self.tt_to)?),
                    TimeRange::new(instant(&self.vt_from)?, instant(&self.vt_to)?),
                );
                Ok(Query::BiTemporal(BiTemporalQuery::new(
                    field,
                    interval,
                    self.operation,
                )))
            }
            BaseType::String
            | BaseType::Integer
            | BaseType::Long
            | BaseType::Float
            | BaseType::Double
            | BaseType::Uuid
            | BaseType::GeoPoint => Err(unsupported("BiTemporal", mapper)),
        }
    }
}

impl fmt::Display for BiTemporalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ttFrom={}, ttTo={}, vtFrom={}, vtTo={}, operation={}",
            display_optional(self.tt_from.as_ref()),
            display_optional(self.tt_to.as_ref()),
            display_optional(self.vt_from.as_ref()),
            display_optional(self.vt_to.as_ref()),
            self.operation
        )
    }
}
