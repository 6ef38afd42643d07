//! Range condition - values between two optional bounds

use serde_json::Value;
use std::fmt;

use super::{coerce_optional, display_optional, non_null, unsupported};
use crate::error::{CondexError, Result};
use crate::query::{NumericRangeQuery, Query, TermRangeQuery};
use crate::schema::{BaseType, BaseValue, Mapper, NumericValue};

#[derive(Clone, Debug, PartialEq)]
pub struct RangeCondition {
    lower: Option<Value>,
    upper: Option<Value>,
    include_lower: bool,
    include_upper: bool,
}

impl RangeCondition {
    pub(crate) fn new(
        lower: Option<Value>,
        upper: Option<Value>,
        include_lower: bool,
        include_upper: bool,
    ) -> Self {
        Self {
            lower: non_null(lower),
            upper: non_null(upper),
            include_lower,
            include_upper,
        }
    }

    pub fn lower(&self) -> Option<&Value> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Option<&Value> {
        self.upper.as_ref()
    }

    pub fn include_lower(&self) -> bool {
        self.include_lower
    }

    pub fn include_upper(&self) -> bool {
        self.include_upper
    }

    pub(crate) fn query(&self, field: &str, mapper: &Mapper) -> Result<Query> {
        let lower = || coerce_optional(field, mapper, self.lower.as_ref());
        let upper = || coerce_optional(field, mapper, self.upper.as_ref());

        match mapper.base_type() {
            BaseType::String => Ok(Query::TermRange(TermRangeQuery::new(
                field,
                lower()?.map(|v| v.to_string()),
                upper()?.map(|v| v.to_string()),
                self.include_lower,
                self.include_upper,
            ))),
            BaseType::Integer | BaseType::Long | BaseType::Float | BaseType::Double => {
                Ok(Query::NumericRange(NumericRangeQuery::new(
                    field,
                    numeric(field, mapper, lower()?)?,
                    numeric(field, mapper, upper()?)?,
                    self.include_lower,
                    self.include_upper,
                )))
            }
            BaseType::Uuid | BaseType::GeoPoint | BaseType::BiTemporal => {
                Err(unsupported("Range", mapper))
            }
        }
    }
}

fn numeric(field: &str, mapper: &Mapper, value: Option<BaseValue>) -> Result<Option<NumericValue>> {
    value
        .map(|v| {
            v.as_numeric().ok_or_else(|| {
                CondexError::coercion(field, mapper.base_type(), format!("{} is not a number", v))
            })
        })
        .transpose()
}

impl fmt::Display for RangeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lower={}, upper={}, includeLower={}, includeUpper={}",
            display_optional(self.lower.as_ref()),
            display_optional(self.upper.as_ref()),
            self.include_lower,
            self.include_upper
        )
    }
}
