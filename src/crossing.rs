//! Land crossing detection for a single route segment.
//!
//! The detector samples the geodesic between two waypoints and reports a
//! crossing only for a run of consecutive land samples. Several guards keep
//! it from flagging segments the routing graph is known to get right:
//!
//! * antimeridian segments (|Δlon| > 180°) are trusted as produced;
//! * micro-segments under `micro_segment_m` are canal links;
//! * short segments with a land endpoint are canal or strait transits;
//! * samples next to a land endpoint (the harbour around a port) are skipped.
//!
//! A single land sample is a reef or cay the graph already routes around.
//! Real landmasses span several sampling intervals. The run length and the
//! canal rule can both alias on a short strait next to an island of the
//! wrong width; that limitation is accepted.

use crate::config::CrossingConfig;
use crate::geodesy;
use crate::land::LandCheck;
use crate::polyline::Waypoint;

pub fn crosses_land(land: &LandCheck<'_>, a: Waypoint, b: Waypoint, config: &CrossingConfig) -> bool {
    if (b.lon - a.lon).abs() > 180.0 {
        return false;
    }

    let total = geodesy::distance_m(a, b);
    if !total.is_finite() || total < config.micro_segment_m {
        return false;
    }

    let a_land = land.is_land(a.lat, a.lon);
    let b_land = land.is_land(b.lat, b.lon);
    if total <= config.canal_segment_m && (a_land || b_land) {
        return false;
    }

    let samples = config.sample_count.max(1);
    let start = if a_land { config.land_start_skip.max(1) } else { 1 };
    let end = if b_land {
        (samples as f64 * config.land_end_fraction).floor() as usize
    } else {
        samples
    };
    let threshold = config.consecutive_land_samples.max(1);

    let mut consecutive = 0usize;
    for k in start..end {
        let position = geodesy::point_at_distance(a, b, k as f64 / samples as f64 * total);
        if land.is_land(position.lat, position.lon) {
            consecutive += 1;
            if consecutive >= threshold {
                return true;
            }
        } else {
            consecutive = 0;
        }
    }

    false
}

/// Index of every segment of `points` that crosses land.
pub fn crossing_segments(land: &LandCheck<'_>, points: &[Waypoint], config: &CrossingConfig) -> Vec<usize> {
    points
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| crosses_land(land, pair[0], pair[1], config))
        .map(|(idx, _)| idx)
        .collect()
}
