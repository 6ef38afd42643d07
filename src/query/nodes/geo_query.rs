//! Prefix tree intersection filter for geo point fields
//!
//! A point matches when its geohash cell at the filter's detail level
//! intersects the query rectangle. Matching is therefore approximate by at
//! most one detail-level cell, which is the error the level was chosen for.

use crate::geo::{GeohashPrefixTree, Rectangle};
use crate::models::Document;
use crate::query::ast::QueryNode;
use crate::query::context::QueryContext;
use crate::schema::IndexedValue;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Filter matching geo points whose cells intersect a rectangle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectsPrefixTreeFilter {
    pub field: String,
    pub shape: Rectangle,
    /// Levels of the tree the field was indexed with
    pub max_levels: u8,
    /// Level at which cells are compared with the shape
    pub detail_level: u8,
    /// Level below which the filter scans leaves instead of recursing
    pub prefix_grid_scan_level: u8,
}

impl IntersectsPrefixTreeFilter {
    pub fn new(
        field: impl Into<String>,
        shape: Rectangle,
        max_levels: u8,
        detail_level: u8,
        prefix_grid_scan_level: u8,
    ) -> Self {
        Self {
            field: field.into(),
            shape,
            max_levels,
            detail_level,
            prefix_grid_scan_level,
        }
    }
}

impl QueryNode for IntersectsPrefixTreeFilter {
    fn matches(&self, _ctx: &QueryContext<'_>, doc: &Document) -> Result<bool> {
        let tree = GeohashPrefixTree::new(self.max_levels)?;
        for value in doc.fields(&self.field) {
            let IndexedValue::GeoPoint { cells, .. } = value else {
                continue;
            };
            let level = usize::from(self.detail_level).min(cells.len());
            let Some(cell) = level.checked_sub(1).and_then(|i| cells.get(i)) else {
                continue;
            };
            if tree.decode(cell)?.intersects(&self.shape) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn query_type(&self) -> &'static str {
        "intersects_prefix_tree"
    }
}

impl fmt::Display for IntersectsPrefixTreeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IntersectsPrefixTreeFilter(fieldName={},queryShape={},detailLevel={},prefixGridScanLevel={})",
            self.field, self.shape, self.detail_level, self.prefix_grid_scan_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Mapper, Schema};
    use serde_json::json;

    #[test]
    fn test_display() {
        let filter = IntersectsPrefixTreeFilter::new("name", Rectangle::new(-180.0, 180.0, -90.0, 90.0), 8, 3, 4);
        assert_eq!(
            filter.to_string(),
            "IntersectsPrefixTreeFilter(fieldName=name,queryShape=Rect(minX=-180.0,maxX=180.0,minY=-90.0,maxY=90.0),detailLevel=3,prefixGridScanLevel=4)"
        );
        assert_eq!(filter.query_type(), "intersects_prefix_tree");
        assert_eq!(filter.boost(), 1.0);
    }

    #[test]
    fn test_matches_points() {
        let schema = Schema::builder()
            .mapper(Mapper::geo_point("place", 8))
            .build()
            .unwrap();
        let ctx = QueryContext::new(&schema);

        let mut madrid = Document::new(1);
        madrid
            .add_value(&schema, "place", &json!({"longitude": -3.70, "latitude": 40.42}))
            .unwrap();
        let mut tokyo = Document::new(2);
        tokyo
            .add_value(&schema, "place", &json!([139.69, 35.69]))
            .unwrap();

        let iberia = IntersectsPrefixTreeFilter::new(
            "place",
            Rectangle::new(-10.0, 4.0, 36.0, 44.0),
            8,
            5,
            4,
        );
        assert!(iberia.matches(&ctx, &madrid).unwrap());
        assert!(!iberia.matches(&ctx, &tokyo).unwrap());

        let world = IntersectsPrefixTreeFilter::new("place", Rectangle::new(-180.0, 180.0, -90.0, 90.0), 8, 3, 4);
        assert!(world.matches(&ctx, &tokyo).unwrap());
        assert!(!world.matches(&ctx, &Document::new(3)).unwrap());
    }
}
