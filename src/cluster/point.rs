//! Geo points fed into the clustering engine

use super::bbox::BoundingBox;

/// Plain coordinate pair stored as `[longitude, latitude]`
///
/// - `[0]` is longitude
/// - `[1]` is latitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord(pub [f64; 2]);

impl Coord {
    /// Creates a coordinate from latitude and longitude (in that order)
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coord([longitude, latitude])
    }

    pub fn lon(&self) -> f64 {
        self.0[0]
    }

    pub fn lat(&self) -> f64 {
        self.0[1]
    }

    /// True if both components are finite
    pub fn is_finite(&self) -> bool {
        self.0[0].is_finite() && self.0[1].is_finite()
    }

    /// Returns squared Euclidean distance in degree space
    pub fn sq_dist(&self, b: &Coord) -> f64 {
        super::distance::sq_dist(self, b)
    }
}

/// A geo-located listing
///
/// The payload is opaque to the engine and is handed back untouched inside
/// the cluster result.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint<T = ()> {
    id: String,
    coord: Coord,
    payload: Option<T>,
}

impl<T> GeoPoint<T> {
    /// Creates a point without payload
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        GeoPoint {
            id: id.into(),
            coord: Coord::new(latitude, longitude),
            payload: None,
        }
    }

    /// Creates a point carrying `payload`
    pub fn with_payload(id: impl Into<String>, latitude: f64, longitude: f64, payload: T) -> Self {
        GeoPoint {
            id: id.into(),
            coord: Coord::new(latitude, longitude),
            payload: Some(payload),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn latitude(&self) -> f64 {
        self.coord.lat()
    }

    pub fn longitude(&self) -> f64 {
        self.coord.lon()
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Consumes the point and returns its payload
    pub fn into_payload(self) -> Option<T> {
        self.payload
    }
}

/// Calculates center and bounds of a group of points
///
/// Returns `None` for an empty group, otherwise `(center, bounds)` where
/// `center` is the arithmetic mean of the coordinates.
pub fn centroid_and_bounds<T>(points: &[GeoPoint<T>]) -> Option<(Coord, BoundingBox)> {
    let bounds = BoundingBox::covering(points.iter().map(GeoPoint::coord))?;

    let mut center = Coord([0.0, 0.0]);
    for pt in points {
        for j in 0..2 {
            center.0[j] += pt.coord.0[j];
        }
    }
    for j in 0..2 {
        center.0[j] /= points.len() as f64;
    }

    Some((center, bounds))
}
