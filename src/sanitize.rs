//! Interior waypoint clean-up and the advisory itinerary scan.

use serde::Serialize;
use tracing::debug;

use crate::config::SanitizeConfig;
use crate::geodesy;
use crate::land::{LandCheck, Severity};
use crate::polyline::Waypoint;

/// What happened to the interior points of a sanitized route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeReport {
    /// Water points passed through.
    pub kept: usize,
    /// Coastal land points moved to nearby water.
    pub snapped: usize,
    /// Land points kept as canal or strait guides.
    pub passages: usize,
    /// Inland points removed.
    pub dropped: usize,
}

/// Moves or removes interior waypoints that sit on land.
///
/// The first and last points always pass through unchanged; ports often sit
/// on a coastline the coarse grid classifies as land.
pub fn sanitize(
    land: &LandCheck<'_>,
    points: &[Waypoint],
    config: &SanitizeConfig,
) -> (Vec<Waypoint>, SanitizeReport) {
    let mut report = SanitizeReport::default();
    if points.len() <= 2 {
        return (points.to_vec(), report);
    }

    let last = points.len() - 1;
    let mut result = Vec::with_capacity(points.len());
    for (idx, &point) in points.iter().enumerate() {
        if idx == 0 || idx == last {
            result.push(point);
            continue;
        }

        if land.is_water(point.lat, point.lon) {
            report.kept += 1;
            result.push(point);
        } else if let Some(snapped) = land.nearest_water(
            point.lat,
            point.lon,
            config.tight_snap_radius_deg,
            config.snap_step_deg,
        ) {
            debug!(?point, ?snapped, "snapped coastal waypoint");
            report.snapped += 1;
            result.push(snapped);
        } else if land.has_nearby_water(point.lat, point.lon, config.passage_radius_deg) {
            report.passages += 1;
            result.push(point);
        } else {
            debug!(?point, "dropped inland waypoint");
            report.dropped += 1;
        }
    }

    (result, report)
}

/// Classification of one user-entered itinerary stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopScan {
    pub index: usize,
    pub stop: Waypoint,
    pub severity: Severity,
    /// Nearest water position for a stop on land.
    pub suggestion: Option<Waypoint>,
    pub displacement_km: Option<f64>,
}

impl StopScan {
    pub fn on_land(&self) -> bool {
        self.severity != Severity::Water
    }
}

/// Checks every stop of an itinerary and proposes a water position for the
/// ones on land. Stops are never moved by the planner; this is advice for
/// whoever maintains the itinerary.
pub fn scan_itinerary(land: &LandCheck<'_>, stops: &[Waypoint], config: &SanitizeConfig) -> Vec<StopScan> {
    stops
        .iter()
        .enumerate()
        .map(|(index, &stop)| {
            let severity = land.severity(stop.lat, stop.lon, config.passage_radius_deg);
            let suggestion = if severity == Severity::Water {
                None
            } else {
                land.nearest_water(stop.lat, stop.lon, config.fine_snap_radius_deg, config.fine_snap_step_deg)
                    .or_else(|| {
                        land.nearest_water(
                            stop.lat,
                            stop.lon,
                            config.fine_snap_wide_radius_deg,
                            config.fine_snap_step_deg,
                        )
                    })
                    .map(|water| Waypoint::new(geodesy::wrap_longitude(water.lon), water.lat))
            };
            let displacement_km = suggestion.map(|water| geodesy::distance_m(stop, water) / 1000.0);
            StopScan {
                index,
                stop,
                severity,
                suggestion,
                displacement_km,
            }
        })
        .collect()
}
