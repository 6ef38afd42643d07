//! Bitemporal query - relates stored record intervals to a query interval

use crate::models::Document;
use crate::query::ast::{boost_suffix, QueryNode};
use crate::query::context::QueryContext;
use crate::query::types::BiTemporalOperation;
use crate::schema::{BiTemporalInterval, IndexedValue};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiTemporalQuery {
    pub field: String,
    /// Query interval, open ends already replaced by sentinels
    pub interval: BiTemporalInterval,
    #[serde(default)]
    pub operation: BiTemporalOperation,
    #[serde(default = "default_boost")]
    pub boost: f32,
}

fn default_boost() -> f32 {
    1.0
}

impl BiTemporalQuery {
    pub fn new(
        field: impl Into<String>,
        interval: BiTemporalInterval,
        operation: BiTemporalOperation,
    ) -> Self {
        Self {
            field: field.into(),
            interval,
            operation,
            boost: 1.0,
        }
    }

    /// Set the boost factor
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl QueryNode for BiTemporalQuery {
    fn matches(&self, _ctx: &QueryContext<'_>, doc: &Document) -> Result<bool> {
        Ok(doc.fields(&self.field).any(|value| match value {
            IndexedValue::BiTemporal(record) => self.operation.holds(record, &self.interval),
            _ => false,
        }))
    }

    fn query_type(&self) -> &'static str {
        "bitemporal"
    }

    fn boost(&self) -> f32 {
        self.boost
    }
}

impl fmt::Display for BiTemporalQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BiTemporalQuery(field={},operation={},{}){}",
            self.field,
            self.operation,
            self.interval,
            boost_suffix(self.boost)
        )
    }
}
