//! Geo bounding box condition
//!
//! Compiles into a constant score query around a prefix tree intersection
//! filter. The filter's detail level is derived from the box size and the
//! schema's accepted distance error.

use std::fmt;

use super::unsupported;
use crate::error::{CondexError, Result};
use crate::geo::{is_valid_latitude, is_valid_longitude, Rectangle};
use crate::query::{ConstantScoreQuery, IntersectsPrefixTreeFilter, Query};
use crate::schema::{BaseType, Mapper, Schema};

#[derive(Clone, Debug, PartialEq)]
pub struct GeoBBoxCondition {
    min_longitude: f64,
    max_longitude: f64,
    min_latitude: f64,
    max_latitude: f64,
}

impl GeoBBoxCondition {
    pub(crate) fn new(
        min_longitude: f64,
        max_longitude: f64,
        min_latitude: f64,
        max_latitude: f64,
    ) -> Result<Self> {
        check_longitude("min_longitude", min_longitude)?;
        check_longitude("max_longitude", max_longitude)?;
        check_latitude("min_latitude", min_latitude)?;
        check_latitude("max_latitude", max_latitude)?;

        if min_longitude > max_longitude {
            return Err(CondexError::invalid(
                "min_longitude must be less or equal than max_longitude",
            ));
        }
        if min_latitude > max_latitude {
            return Err(CondexError::invalid(
                "min_latitude must be less or equal than max_latitude",
            ));
        }

        Ok(Self {
            min_longitude,
            max_longitude,
            min_latitude,
            max_latitude,
        })
    }

    pub fn min_longitude(&self) -> f64 {
        self.min_longitude
    }

    pub fn max_longitude(&self) -> f64 {
        self.max_longitude
    }

    pub fn min_latitude(&self) -> f64 {
        self.min_latitude
    }

    pub fn max_latitude(&self) -> f64 {
        self.max_latitude
    }

    pub fn shape(&self) -> Rectangle {
        Rectangle::new(
            self.min_longitude,
            self.max_longitude,
            self.min_latitude,
            self.max_latitude,
        )
    }

    pub(crate) fn query(&self, field: &str, mapper: &Mapper, schema: &Schema) -> Result<Query> {
        match mapper.base_type() {
            BaseType::GeoPoint => {
                let Some(tree) = mapper.prefix_tree()? else {
                    return Err(unsupported("GeoBBox", mapper));
                };
                let geo = &schema.settings().geo;
                let shape = self.shape();
                let detail_level = tree.detail_level(&shape, geo.dist_err_pct);
                let scan_level = tree.prefix_grid_scan_level(geo.grid_scan_offset);

                let filter = IntersectsPrefixTreeFilter::new(
                    field,
                    shape,
                    tree.max_levels(),
                    detail_level,
                    scan_level,
                );
                Ok(Query::ConstantScore(ConstantScoreQuery::new(
                    Query::IntersectsPrefixTree(filter),
                )))
            }
            BaseType::String
            | BaseType::Integer
            | BaseType::Long
            | BaseType::Float
            | BaseType::Double
            | BaseType::Uuid
            | BaseType::BiTemporal => Err(unsupported("GeoBBox", mapper)),
        }
    }
}

fn check_longitude(name: &str, value: f64) -> Result<()> {
    if is_valid_longitude(value) {
        Ok(())
    } else {
        Err(CondexError::invalid(format!(
            "{} must be in range [-180.0, 180.0], but found {}",
            name, value
        )))
    }
}

fn check_latitude(name: &str, value: f64) -> Result<()> {
    if is_valid_latitude(value) {
        Ok(())
    } else {
        Err(CondexError::invalid(format!(
            "{} must be in range [-90.0, 90.0], but found {}",
            name, value
        )))
    }
}

impl fmt::Display for GeoBBoxCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "minLongitude={:?}, maxLongitude={:?}, minLatitude={:?}, maxLatitude={:?}",
            self.min_longitude, self.max_longitude, self.min_latitude, self.max_latitude
        )
    }
}
