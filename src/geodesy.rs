//! Geodesic helpers on the WGS84 ellipsoid and antimeridian-safe longitude
//! arithmetic.
//!
//! All solving is delegated to `geo`'s [`Geodesic`] metric space (Karney's
//! algorithms). Inputs may carry longitudes outside [-180, 180]; outputs of
//! the direct problem come back wrapped and must be re-normalized by the
//! caller with [`normalize_longitude`] before being spliced into a route.

use geo::{Bearing, Destination, Distance, Geodesic, InterpolatePoint, Point};

use crate::polyline::Waypoint;

fn to_point(waypoint: Waypoint) -> Point<f64> {
    Point::new(waypoint.lon, waypoint.lat)
}

fn from_point(point: Point<f64>) -> Waypoint {
    Waypoint::new(point.x(), point.y())
}

/// Geodesic distance in meters.
pub fn distance_m(a: Waypoint, b: Waypoint) -> f64 {
    Geodesic.distance(to_point(a), to_point(b))
}

/// Initial bearing from `a` to `b` in degrees clockwise from true north.
pub fn bearing_deg(a: Waypoint, b: Waypoint) -> f64 {
    Geodesic.bearing(to_point(a), to_point(b))
}

/// Point `meters` along the geodesic from `a` towards `b`.
pub fn point_at_distance(a: Waypoint, b: Waypoint, meters: f64) -> Waypoint {
    from_point(Geodesic.point_at_distance_between(to_point(a), to_point(b), meters))
}

/// Point at `fraction` (0 = `a`, 1 = `b`) of the geodesic from `a` to `b`.
pub fn point_at_fraction(a: Waypoint, b: Waypoint, fraction: f64) -> Waypoint {
    from_point(Geodesic.point_at_ratio_between(to_point(a), to_point(b), fraction))
}

/// Solves the direct problem: the point reached after `meters` on
/// `bearing` from `origin`.
pub fn destination(origin: Waypoint, bearing: f64, meters: f64) -> Waypoint {
    from_point(Geodesic.destination(to_point(origin), bearing, meters))
}

/// Sum of segment lengths in meters.
pub fn path_length_m(points: &[Waypoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance_m(pair[0], pair[1]))
        .sum()
}

/// Wraps a longitude into [-180, 180).
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Shifts `lon` by ±360° so it lies within 180° of `previous`.
pub fn normalize_longitude(lon: f64, previous: f64) -> f64 {
    if lon - previous > 180.0 {
        lon - 360.0
    } else if lon - previous < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Returns a copy of `points` whose longitudes are continuous, starting from
/// `previous_lon` (the longitude of the already-accepted point preceding the
/// first element).
pub fn normalize_longitude_sequence(points: &[Waypoint], previous_lon: f64) -> Vec<Waypoint> {
    let mut previous = previous_lon;
    points
        .iter()
        .map(|point| {
            let lon = normalize_longitude(point.lon, previous);
            previous = lon;
            Waypoint::new(lon, point.lat)
        })
        .collect()
}
