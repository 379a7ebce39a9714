//! Great-circle distance between stops.
//!
//! Straight-line distance over the earth's surface. Ignores the road network,
//! which is fine for choosing a visiting order.

use crate::traits::{DistanceMetric, Point};

/// Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    fn distance_m(&self, from: Point, to: Point) -> f64 {
        haversine_m(from, to)
    }
}

/// Calculate haversine distance between two points in meters.
pub fn haversine_m(from: Point, to: Point) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        assert_eq!(haversine_m((36.1, -115.1), (36.1, -115.1)), 0.0);
    }

    #[test]
    fn test_one_degree_at_equator() {
        let dist = haversine_m((0.0, 0.0), (0.0, 1.0));
        assert!((dist - 111_194.9).abs() < 1.0, "got {}", dist);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas (36.17, -115.14) to Los Angeles (34.05, -118.24)
        let dist = haversine_m((36.17, -115.14), (34.05, -118.24));
        assert!(dist > 350_000.0 && dist < 400_000.0, "LV to LA should be ~370km, got {}", dist);
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = (36.1263781, -115.1658180);
        let b = (36.1023654, -115.1688720);
        assert!((haversine_m(a, b) - haversine_m(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_antipodal_points_are_finite() {
        let dist = haversine_m((0.0, 0.0), (0.0, 180.0));
        assert!(dist.is_finite());
        assert!((dist - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1.0);
    }

    #[test]
    fn test_metric_matches_function() {
        let a = (51.5, -0.12);
        let b = (48.85, 2.35);
        assert_eq!(Haversine.distance_m(a, b), haversine_m(a, b));
    }
}
