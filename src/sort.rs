//! Sort specifications
//!
//! A `Sort` names columns in priority order. Compiling it against a schema
//! yields the comparator specs a searcher orders hits by, using each column's
//! doc values.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CondexError, Result};
use crate::schema::{Schema, SortField};

/// One column to sort by
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortFieldSpec {
    pub field: String,
    /// Descending order when true
    #[serde(default)]
    pub reverse: bool,
}

impl SortFieldSpec {
    pub fn new(field: impl Into<String>, reverse: bool) -> Self {
        Self {
            field: field.into(),
            reverse,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, false)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, true)
    }
}

/// Columns to sort by, most significant first
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub fields: Vec<SortFieldSpec>,
}

impl Sort {
    pub fn new(fields: Vec<SortFieldSpec>) -> Self {
        Self { fields }
    }

    pub fn by(mut self, field: SortFieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Comparator specs for every column
    ///
    /// Each column must resolve to a mapper that writes doc values.
    pub fn compile(&self, schema: &Schema) -> Result<Vec<SortField>> {
        if self.fields.is_empty() {
            return Err(CondexError::invalid("Sort fields required"));
        }

        let sort = self
            .fields
            .iter()
            .map(|spec| {
                if spec.field.trim().is_empty() {
                    return Err(CondexError::invalid("Field name required"));
                }
                let mapper = schema.resolve(&spec.field)?;
                if !mapper.sorted {
                    return Err(CondexError::invalid(format!(
                        "Field '{}' is not sorted",
                        spec.field
                    )));
                }
                mapper.sort_field(spec.reverse)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(fields = sort.len(), "compiled sort");
        Ok(sort)
    }
}
