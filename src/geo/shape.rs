//! Geographic shapes in degrees (x = longitude, y = latitude)

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;

/// Check a longitude is a finite value within [-180, 180]
pub fn is_valid_longitude(longitude: f64) -> bool {
    longitude.is_finite() && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude)
}

/// Check a latitude is a finite value within [-90, 90]
pub fn is_valid_latitude(latitude: f64) -> bool {
    latitude.is_finite() && (MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude)
}

/// A point on the globe
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        is_valid_longitude(self.longitude) && is_valid_latitude(self.latitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pt(x={:?},y={:?})", self.longitude, self.latitude)
    }
}

/// An axis-aligned rectangle that never crosses the dateline
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Rectangle {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Boundary-inclusive point containment
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.longitude >= self.min_x
            && point.longitude <= self.max_x
            && point.latitude >= self.min_y
            && point.latitude <= self.max_y
    }

    /// Whether the rectangles share at least one point, edges included
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect(minX={:?},maxX={:?},minY={:?},maxY={:?})",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

/// Great-circle distance between two points, in degrees of arc
pub fn distance_degrees(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let arc = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());
    arc.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(is_valid_longitude(-180.0));
        assert!(is_valid_longitude(180.0));
        assert!(!is_valid_longitude(180.5));
        assert!(!is_valid_longitude(f64::NAN));
        assert!(is_valid_latitude(-90.0));
        assert!(!is_valid_latitude(91.0));
    }

    #[test]
    fn test_rectangle_display() {
        assert_eq!(
            Rectangle::new(-180.0, 180.0, -90.0, 90.0).to_string(),
            "Rect(minX=-180.0,maxX=180.0,minY=-90.0,maxY=90.0)"
        );
    }

    #[test]
    fn test_rectangle_relations() {
        let rect = Rectangle::new(0.0, 10.0, 0.0, 10.0);
        assert!(rect.contains(&GeoPoint::new(10.0, 0.0)));
        assert!(!rect.contains(&GeoPoint::new(10.1, 0.0)));

        assert!(rect.intersects(&Rectangle::new(10.0, 20.0, 5.0, 6.0)));
        assert!(!rect.intersects(&Rectangle::new(10.5, 20.0, 5.0, 6.0)));
    }

    #[test]
    fn test_distance_degrees() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert!((distance_degrees(&origin, &GeoPoint::new(180.0, 90.0)) - 90.0).abs() < 1e-9);
        assert!((distance_degrees(&origin, &GeoPoint::new(10.0, 0.0)) - 10.0).abs() < 1e-9);
        assert_eq!(distance_degrees(&origin, &origin), 0.0);
    }
}
