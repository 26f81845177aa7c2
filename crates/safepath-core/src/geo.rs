//! Great-circle distance math for road-network routing.

use crate::models::Coordinate;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate distance between two points in meters using Haversine formula.
///
/// This is the standard formula for calculating great-circle distance
/// between two points on a sphere given their latitudes and longitudes.
/// Accurate to well under 0.5% at city scale, which is what hazard radii
/// (1-1000m) and road-segment lengths operate at.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lon - a.lon).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Arithmetic midpoint of two coordinates.
///
/// Not a geodesic interpolation. Road segments and hazard radii are small
/// relative to earth curvature, so the planar mean is close enough for the
/// edge-vs-hazard distance test.
pub fn midpoint(a: Coordinate, b: Coordinate) -> Coordinate {
    Coordinate {
        lat: (a.lat + b.lat) / 2.0,
        lon: (a.lon + b.lon) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    #[test]
    fn haversine_known_distance() {
        // ~111km between these points (1 degree latitude)
        let dist = haversine_distance(coord(0.0, 0.0), coord(1.0, 0.0));
        assert!((dist - 111_194.0).abs() < 100.0);
    }

    #[test]
    fn haversine_same_point() {
        let dist = haversine_distance(coord(18.787, 98.99), coord(18.787, 98.99));
        assert!(dist < 0.001);
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = coord(18.787, 98.9905);
        let b = coord(18.7925, 99.0);
        assert_eq!(haversine_distance(a, b), haversine_distance(b, a));
    }

    #[test]
    fn midpoint_is_arithmetic_mean() {
        let m = midpoint(coord(0.0, 0.0), coord(0.0, 0.002));
        assert_eq!(m.lat, 0.0);
        assert_eq!(m.lon, 0.001);
    }
}
