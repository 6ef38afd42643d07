//! Geospatial primitives: points, rectangles and the geohash prefix tree

mod prefix_tree;
mod shape;

pub use prefix_tree::{
    cell_height, cell_width, distance_from_err_pct, GeohashPrefixTree, MAX_PRECISION,
};
pub use shape::{
    distance_degrees, is_valid_latitude, is_valid_longitude, GeoPoint, Rectangle, MAX_LATITUDE,
    MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE,
};
