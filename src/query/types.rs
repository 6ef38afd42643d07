//! Core types for the query system

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CondexError;
use crate::schema::BiTemporalInterval;

/// Relation between a stored record interval and a query interval
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiTemporalOperation {
    /// Record and query overlap on both axes
    Intersects,
    /// Query interval contains the record interval on both axes
    #[default]
    Contains,
    /// Record interval contains the query interval on both axes
    IsWithin,
}

impl BiTemporalOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiTemporalOperation::Intersects => "intersects",
            BiTemporalOperation::Contains => "contains",
            BiTemporalOperation::IsWithin => "is_within",
        }
    }

    /// Whether a record with interval `record` satisfies a query for `query`
    pub fn holds(&self, record: &BiTemporalInterval, query: &BiTemporalInterval) -> bool {
        match self {
            BiTemporalOperation::Intersects => record.intersects(query),
            BiTemporalOperation::Contains => query.contains(record),
            BiTemporalOperation::IsWithin => record.contains(query),
        }
    }
}

impl FromStr for BiTemporalOperation {
    type Err = CondexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intersects" => Ok(BiTemporalOperation::Intersects),
            "contains" => Ok(BiTemporalOperation::Contains),
            "is_within" | "iswithin" => Ok(BiTemporalOperation::IsWithin),
            other => Err(CondexError::invalid(format!(
                "Unsupported bitemporal operation '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for BiTemporalOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A matching document and its score
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredDoc {
    /// Position of the document in the searched slice
    pub docno: u32,
    pub id: crate::models::DocumentId,
    pub score: f32,
}
