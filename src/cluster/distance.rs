use std::f64::consts::PI;

use super::point::Coord;

/// Coefficient to translate from degrees to radians
pub const DEGREE_RAD: f64 = PI / 180.0;

/// Earth radius in kilometers
pub const EARTH_R: f64 = 6371.0;

/// Length of one degree of latitude in meters
///
/// Clustering radii are given in meters but indexes work in degree space;
/// this is the conversion factor between the two.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Converts a distance in meters into degree space
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Calculates spherical (equirectangular) distance between two coordinates
///
/// # Returns
///
/// Distance in kilometers
pub fn distance_spherical(p1: &Coord, p2: &Coord) -> f64 {
    let v1 = (p1.lat() - p2.lat()) * DEGREE_RAD;
    let v1 = v1 * v1;

    let v2 = (p1.lon() - p2.lon()) * DEGREE_RAD * ((p1.lat() + p2.lat()) / 2.0 * DEGREE_RAD).cos();
    let v2 = v2 * v2;

    EARTH_R * (v1 + v2).sqrt()
}

/// Squared Euclidean distance in degree space, without sqrt
///
/// Both indexes and DBSCAN compare against a squared radius so the
/// sqrt is never taken on the hot path.
pub fn sq_dist(p1: &Coord, p2: &Coord) -> f64 {
    let v1 = p1.lat() - p2.lat();
    let v2 = p1.lon() - p2.lon();

    v1 * v1 + v2 * v2
}
