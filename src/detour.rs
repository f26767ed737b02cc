//! Replacement waypoints for a land-crossing segment.
//!
//! Strategies, in order:
//!
//! 1. Re-query the routing graph for `a → b`. Accepted only when it adds an
//!    intermediate waypoint and is no longer than `circumnavigation_factor`
//!    times the direct distance.
//! 2. Offset a single waypoint perpendicular to the segment at a few
//!    positions and distances, keeping the first one that is on water and
//!    whose two legs are both clear.
//! 3. Give up and hop directly to `b`.
//!
//! A detour never includes `a` and always ends with `b` exactly, so splicing
//! is a plain list extend.

use serde::Serialize;
use tracing::debug;

use crate::config::PipelineConfig;
use crate::crossing::crosses_land;
use crate::geodesy;
use crate::land::LandCheck;
use crate::polyline::Waypoint;
use crate::traits::MaritimeRouter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetourStrategy {
    RoutingGraph,
    PerpendicularOffset,
    /// Both strategies failed; the segment still crosses land.
    DirectHop,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detour {
    pub points: Vec<Waypoint>,
    pub strategy: DetourStrategy,
}

pub fn synthesize_detour<R>(
    land: &LandCheck<'_>,
    router: &R,
    a: Waypoint,
    b: Waypoint,
    config: &PipelineConfig,
) -> Detour
where
    R: MaritimeRouter + ?Sized,
{
    if let Some(points) = graph_detour(router, a, b, config) {
        debug!(?a, ?b, waypoints = points.len(), "detour via routing graph");
        return Detour {
            points,
            strategy: DetourStrategy::RoutingGraph,
        };
    }

    if let Some(waypoint) = offset_detour(land, a, b, config) {
        debug!(?a, ?b, ?waypoint, "detour via perpendicular offset");
        return Detour {
            points: vec![waypoint, b],
            strategy: DetourStrategy::PerpendicularOffset,
        };
    }

    debug!(?a, ?b, "no detour found, keeping direct hop");
    Detour {
        points: vec![b],
        strategy: DetourStrategy::DirectHop,
    }
}

fn graph_detour<R>(router: &R, a: Waypoint, b: Waypoint, config: &PipelineConfig) -> Option<Vec<Waypoint>>
where
    R: MaritimeRouter + ?Sized,
{
    let sub_route = match router.route(a, b) {
        Ok(route) => route,
        Err(err) => {
            debug!(?a, ?b, "routing graph failed during repair: {}", err);
            return None;
        }
    };
    let points = sub_route.points();
    if points.len() <= 2 {
        return None;
    }

    let direct = geodesy::distance_m(a, b);
    let total = geodesy::path_length_m(points);
    if total > direct * config.detour.circumnavigation_factor {
        debug!(
            total_km = total / 1000.0,
            direct_km = direct / 1000.0,
            "rejecting circumnavigating sub-route"
        );
        return None;
    }

    let mut normalized = geodesy::normalize_longitude_sequence(&points[1..], a.lon);
    if let Some(last) = normalized.last()
        && geodesy::distance_m(*last, b) <= config.endpoint_tolerance_m
    {
        normalized.pop();
    }
    if normalized.is_empty() {
        return None;
    }
    normalized.push(b);
    Some(normalized)
}

fn offset_detour(land: &LandCheck<'_>, a: Waypoint, b: Waypoint, config: &PipelineConfig) -> Option<Waypoint> {
    let detour = &config.detour;
    let bearing = geodesy::bearing_deg(a, b);
    let distance = geodesy::distance_m(a, b);
    let offsets_km = if distance < detour.short_segment_m {
        &detour.short_offsets_km
    } else {
        &detour.long_offsets_km
    };

    for fraction in &detour.fractions {
        let anchor = geodesy::point_at_distance(a, b, fraction * distance);
        for side in [1.0, -1.0] {
            let heading = (bearing + side * 90.0).rem_euclid(360.0);
            for offset_km in offsets_km {
                let raw = geodesy::destination(anchor, heading, offset_km * 1000.0);
                let waypoint = Waypoint::new(geodesy::normalize_longitude(raw.lon, a.lon), raw.lat);
                if land.is_land(waypoint.lat, waypoint.lon) {
                    continue;
                }
                if crosses_land(land, a, waypoint, &config.crossing)
                    || crosses_land(land, waypoint, b, &config.crossing)
                {
                    continue;
                }
                return Some(waypoint);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::direct::DirectRouter;
    use crate::error::RouterError;
    use crate::land::LandOracle;
    use crate::polyline::Polyline;

    fn box_land(lat: f64, lon: f64) -> bool {
        lon > -0.5 && lon < 0.5 && lat > 0.5 && lat < 1.5
    }

    struct FixedRouter(Vec<Waypoint>);

    impl MaritimeRouter for FixedRouter {
        fn route(&self, _from: Waypoint, _to: Waypoint) -> Result<Polyline, RouterError> {
            Ok(Polyline::new(self.0.clone()))
        }
    }

    struct FailingRouter {
        calls: Mutex<usize>,
    }

    impl MaritimeRouter for FailingRouter {
        fn route(&self, _from: Waypoint, _to: Waypoint) -> Result<Polyline, RouterError> {
            *self.calls.lock().unwrap() += 1;
            Err(RouterError::Timeout)
        }
    }

    #[test]
    fn test_graph_detour_is_preferred() {
        let oracle = LandOracle::unavailable().with_coarse(box_land);
        let land = oracle.check().expect("available");
        let a = Waypoint::new(0.0, 0.0);
        let b = Waypoint::new(0.0, 2.0);
        let router = FixedRouter(vec![a, Waypoint::new(0.8, 1.0), Waypoint::new(0.0, 2.0005)]);
        let detour = synthesize_detour(&land, &router, a, b, &PipelineConfig::default());
        assert_eq!(detour.strategy, DetourStrategy::RoutingGraph);
        assert_eq!(detour.points, vec![Waypoint::new(0.8, 1.0), b]);
    }

    #[test]
    fn test_circumnavigation_is_rejected() {
        let oracle = LandOracle::unavailable().with_coarse(box_land);
        let land = oracle.check().expect("available");
        let a = Waypoint::new(0.0, 0.0);
        let b = Waypoint::new(0.0, 2.0);
        // ~1 300 km loop for a ~220 km segment
        let router = FixedRouter(vec![a, Waypoint::new(6.0, 1.0), b]);
        let detour = synthesize_detour(&land, &router, a, b, &PipelineConfig::default());
        assert_eq!(detour.strategy, DetourStrategy::PerpendicularOffset);
    }

    #[test]
    fn test_offset_detour_avoids_box() {
        let oracle = LandOracle::unavailable().with_coarse(box_land);
        let land = oracle.check().expect("available");
        let a = Waypoint::new(0.0, 0.0);
        let b = Waypoint::new(0.0, 2.0);
        let config = PipelineConfig::default();
        let detour = synthesize_detour(&land, &DirectRouter, a, b, &config);
        assert_eq!(detour.strategy, DetourStrategy::PerpendicularOffset);
        assert_eq!(detour.points.len(), 2);
        assert_eq!(detour.points[1], b);
        let waypoint = detour.points[0];
        assert!(!land.is_land(waypoint.lat, waypoint.lon));
        assert!(waypoint.lon.abs() > 0.5);
        assert!(!crosses_land(&land, a, waypoint, &config.crossing));
        assert!(!crosses_land(&land, waypoint, b, &config.crossing));
    }

    #[test]
    fn test_router_failure_falls_back_to_offset() {
        let oracle = LandOracle::unavailable().with_coarse(box_land);
        let land = oracle.check().expect("available");
        let router = FailingRouter { calls: Mutex::new(0) };
        let a = Waypoint::new(0.0, 0.0);
        let b = Waypoint::new(0.0, 2.0);
        let detour = synthesize_detour(&land, &router, a, b, &PipelineConfig::default());
        assert_eq!(*router.calls.lock().unwrap(), 1);
        assert_eq!(detour.strategy, DetourStrategy::PerpendicularOffset);
    }

    #[test]
    fn test_direct_hop_when_nothing_works() {
        // A wall of land 4° wide: no offset up to 200 km gets around it
        let oracle = LandOracle::unavailable().with_coarse(|lat: f64, _lon: f64| lat > 0.5 && lat < 4.5);
        let land = oracle.check().expect("available");
        let a = Waypoint::new(0.0, 0.0);
        let b = Waypoint::new(0.0, 5.0);
        let detour = synthesize_detour(&land, &DirectRouter, a, b, &PipelineConfig::default());
        assert_eq!(detour.strategy, DetourStrategy::DirectHop);
        assert_eq!(detour.points, vec![b]);
    }

    #[test]
    fn test_short_segment_uses_fine_offsets() {
        // 30 km wide island, 80 km segment
        let oracle = LandOracle::unavailable()
            .with_fine(|lat: f64, lon: f64| lon.abs() < 0.1 && lat > 0.2 && lat < 0.5);
        let land = oracle.check().expect("available");
        let a = Waypoint::new(0.0, 0.0);
        let b = Waypoint::new(0.0, 0.72);
        let detour = synthesize_detour(&land, &DirectRouter, a, b, &PipelineConfig::default());
        assert_eq!(detour.strategy, DetourStrategy::PerpendicularOffset);
        let waypoint = detour.points[0];
        let offset_km = geodesy::distance_m(waypoint, geodesy::point_at_fraction(a, b, 0.5)) / 1000.0;
        assert!(offset_km <= 50.5, "offset {} km", offset_km);
    }
}
