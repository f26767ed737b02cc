//! Waypoints and route polylines.
//!
//! Coordinates are stored as `(longitude, latitude)` in WGS84 degrees, the
//! same order GeoJSON and the routing service use. Longitudes inside a route
//! may leave [-180, 180] when the route crosses the antimeridian; see
//! [`crate::geodesy::normalize_longitude_sequence`].

use serde::{Deserialize, Serialize};

use crate::geodesy;

/// A single route vertex. Waypoints are plain values with no identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lon: f64,
    pub lat: f64,
}

impl Waypoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// True when both components are finite and within the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<(f64, f64)> for Waypoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

/// An ordered route geometry: first point is the departure, last the
/// destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Waypoint>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Waypoint>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Waypoint] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Waypoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Waypoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Waypoint> {
        self.points.last()
    }

    /// Consecutive `(a, b)` pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Waypoint, Waypoint)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// The same geometry traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Total geodesic length in meters.
    pub fn length_m(&self) -> f64 {
        geodesy::path_length_m(&self.points)
    }
}

impl From<Vec<Waypoint>> for Polyline {
    fn from(points: Vec<Waypoint>) -> Self {
        Self::new(points)
    }
}
