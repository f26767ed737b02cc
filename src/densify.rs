//! Segment length capping.
//!
//! Long geodesics are split into equal parts by inserting intermediate
//! points, so later land checks and the rendered route follow the curve
//! closely. Existing points are never moved or removed.

use crate::geodesy;
use crate::polyline::Waypoint;

/// Inserts points so that no segment exceeds `max_segment_km`.
///
/// A segment of length `d` is split into `floor(d / max) + 1` equal parts.
/// Inserted longitudes are kept continuous with the preceding point.
pub fn densify(points: &[Waypoint], max_segment_km: f64) -> Vec<Waypoint> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let max_m = max_segment_km * 1000.0;
    if max_m.is_nan() || max_m <= 0.0 {
        return points.to_vec();
    }

    let mut result = Vec::with_capacity(points.len());
    result.push(first);

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let distance = geodesy::distance_m(a, b);
        if distance > max_m {
            let parts = (distance / max_m).floor() as usize + 1;
            let mut previous_lon = a.lon;
            for k in 1..parts {
                let raw = geodesy::point_at_fraction(a, b, k as f64 / parts as f64);
                let lon = geodesy::normalize_longitude(raw.lon, previous_lon);
                previous_lon = lon;
                result.push(Waypoint::new(lon, raw.lat));
            }
        }
        result.push(b);
    }

    result
}
