//! Geohash prefix tree
//!
//! Each level of the tree is one geohash character, i.e. five more bits that
//! alternately halve the longitude and latitude ranges (longitude first). A
//! point is indexed as every prefix of its geohash up to `max_levels`; a shape
//! query picks a *detail level* from the shape's size and the accepted error.

use super::shape::{distance_degrees, GeoPoint, Rectangle};
use crate::error::{CondexError, Result};

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Longest geohash the tree supports
pub const MAX_PRECISION: u8 = 24;

/// Width in degrees of a cell at `level`
pub fn cell_width(level: u8) -> f64 {
    let bits = 5 * u32::from(level);
    let lon_bits = (bits + 1) / 2;
    360.0 / 2f64.powi(lon_bits as i32)
}

/// Height in degrees of a cell at `level`
pub fn cell_height(level: u8) -> f64 {
    let bits = 5 * u32::from(level);
    let lat_bits = bits / 2;
    180.0 / 2f64.powi(lat_bits as i32)
}

/// Shortest geohash whose cells are strictly smaller than the given error
fn level_for_width_height(lon_err: f64, lat_err: f64) -> u8 {
    (1..MAX_PRECISION)
        .find(|&level| cell_height(level) < lat_err && cell_width(level) < lon_err)
        .unwrap_or(MAX_PRECISION)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeohashPrefixTree {
    max_levels: u8,
}

impl GeohashPrefixTree {
    pub fn new(max_levels: u8) -> Result<Self> {
        if max_levels == 0 || max_levels > MAX_PRECISION {
            return Err(CondexError::invalid(format!(
                "Geohash max levels must be in [1, {}], found {}",
                MAX_PRECISION, max_levels
            )));
        }
        Ok(Self { max_levels })
    }

    pub fn max_levels(&self) -> u8 {
        self.max_levels
    }

    /// Level whose cells are just below `distance` degrees, within [1, max_levels]
    pub fn level_for_distance(&self, distance: f64) -> u8 {
        if distance == 0.0 {
            return self.max_levels;
        }
        level_for_width_height(distance, distance).clamp(1, self.max_levels)
    }

    /// Detail level used to match `shape` given the accepted error fraction
    pub fn detail_level(&self, shape: &Rectangle, dist_err_pct: f64) -> u8 {
        self.level_for_distance(distance_from_err_pct(shape, dist_err_pct))
    }

    /// Level from which the filter scans leaf cells instead of recursing
    pub fn prefix_grid_scan_level(&self, offset: u8) -> u8 {
        self.max_levels.saturating_sub(offset).max(1)
    }

    /// Geohash of `point` at `level` characters
    pub fn encode(&self, point: &GeoPoint, level: u8) -> String {
        let level = level.clamp(1, self.max_levels);
        let mut hash = String::with_capacity(level as usize);
        let (mut min_lon, mut max_lon) = (-180.0, 180.0);
        let (mut min_lat, mut max_lat) = (-90.0, 90.0);
        let mut even = true;
        let mut bit = 0;
        let mut ch = 0usize;

        while hash.len() < level as usize {
            if even {
                let mid = (min_lon + max_lon) / 2.0;
                if point.longitude >= mid {
                    ch |= 1 << (4 - bit);
                    min_lon = mid;
                } else {
                    max_lon = mid;
                }
            } else {
                let mid = (min_lat + max_lat) / 2.0;
                if point.latitude >= mid {
                    ch |= 1 << (4 - bit);
                    min_lat = mid;
                } else {
                    max_lat = mid;
                }
            }
            even = !even;
            bit += 1;
            if bit == 5 {
                hash.push(BASE32[ch] as char);
                bit = 0;
                ch = 0;
            }
        }
        hash
    }

    /// Every cell containing `point`, from level 1 to `max_levels`
    pub fn cells(&self, point: &GeoPoint) -> Vec<String> {
        let full = self.encode(point, self.max_levels);
        (1..=full.len()).map(|len| full[..len].to_string()).collect()
    }

    /// Bounds of the cell named by `hash`
    pub fn decode(&self, hash: &str) -> Result<Rectangle> {
        let (mut min_lon, mut max_lon) = (-180.0, 180.0);
        let (mut min_lat, mut max_lat) = (-90.0, 90.0);
        let mut even = true;

        for c in hash.bytes() {
            let index = BASE32
                .iter()
                .position(|&b| b == c)
                .ok_or_else(|| CondexError::invalid(format!("Invalid geohash '{}'", hash)))?;
            for shift in (0..5).rev() {
                let set = (index >> shift) & 1 == 1;
                if even {
                    let mid = (min_lon + max_lon) / 2.0;
                    if set {
                        min_lon = mid;
                    } else {
                        max_lon = mid;
                    }
                } else {
                    let mid = (min_lat + max_lat) / 2.0;
                    if set {
                        min_lat = mid;
                    } else {
                        max_lat = mid;
                    }
                }
                even = !even;
            }
        }
        Ok(Rectangle::new(min_lon, max_lon, min_lat, max_lat))
    }
}

/// Accepted matching error, in degrees, for a query shape
///
/// The error is a fraction of the distance from the shape's center to its
/// farthest corner on the center's hemisphere side.
pub fn distance_from_err_pct(shape: &Rectangle, dist_err_pct: f64) -> f64 {
    if dist_err_pct <= 0.0 {
        return 0.0;
    }
    let center = shape.center();
    let y = if center.latitude >= 0.0 {
        shape.max_y
    } else {
        shape.min_y
    };
    distance_degrees(&center, &GeoPoint::new(shape.max_x, y)) * dist_err_pct
}
