//! Route planning pipeline.
//!
//! `compute_route(start, end)`:
//!
//! 1. validate the request and consult the [`RouteCache`];
//! 2. query the routing graph (the only hard failure);
//! 3. anchor the exact requested endpoints onto the graph polyline;
//! 4. avoid land, densify, sanitize, and avoid land again;
//! 5. store the result in the cache.
//!
//! Steps 3 and 4 work on a longitude-continuous route: an `end` across the
//! antimeridian is carried as `end.lon ± 360` so every segment can be
//! sampled. The exact `end` is put back only on the finished route.
//!
//! Without any land data the anchored graph output is returned as is and
//! flagged [`Degradation::LandOracleUnavailable`].

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::avoid::{PassSummary, avoid_land};
use crate::cache::RouteCache;
use crate::config::PipelineConfig;
use crate::crossing::crossing_segments;
use crate::densify::densify;
use crate::error::{PlanError, RouterError};
use crate::geodesy;
use crate::land::LandOracle;
use crate::polyline::{Polyline, Waypoint};
use crate::sanitize::{SanitizeReport, sanitize};
use crate::traits::MaritimeRouter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// No land data loaded; land avoidance was skipped.
    LandOracleUnavailable,
}

/// How much to trust a planned route. A route is returned whenever the
/// routing graph answers; everything short of that is reported here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteDiagnostics {
    pub degraded: Option<Degradation>,
    /// Some segment may still cross land.
    pub residual_crossings: bool,
    /// Crossings for which neither detour strategy worked.
    pub detour_fallbacks: usize,
    pub first_pass: PassSummary,
    pub second_pass: PassSummary,
    pub sanitize: SanitizeReport,
    pub from_cache: bool,
}

impl RouteDiagnostics {
    /// True for a route produced with land data and no known crossing.
    pub fn is_clean(&self) -> bool {
        self.degraded.is_none() && !self.residual_crossings && self.detour_fallbacks == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedRoute {
    pub route: Polyline,
    pub diagnostics: RouteDiagnostics,
}

/// One leg of a multi-stop itinerary.
#[derive(Debug)]
pub struct ItineraryLeg {
    pub index: usize,
    pub from: Waypoint,
    pub to: Waypoint,
    pub result: Result<PlannedRoute, PlanError>,
}

pub struct RoutePlanner<R> {
    router: R,
    oracle: LandOracle,
    config: PipelineConfig,
    cache: RouteCache,
}

impl<R: MaritimeRouter> RoutePlanner<R> {
    pub fn new(router: R, oracle: LandOracle) -> Self {
        Self::with_config(router, oracle, PipelineConfig::default())
    }

    pub fn with_config(router: R, oracle: LandOracle, config: PipelineConfig) -> Self {
        if !oracle.is_available() {
            warn!("route planner created without land data, routes will not avoid land");
        }
        let cache = RouteCache::new(&config.cache);
        Self {
            router,
            oracle,
            config,
            cache,
        }
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }

    /// Plans a single leg, reusing a cached result for the same leg in
    /// either direction.
    pub fn compute_route(&self, start: Waypoint, end: Waypoint) -> Result<PlannedRoute, PlanError> {
        validate(start)?;
        validate(end)?;
        self.cache.get_or_compute(start, end, |a, b| self.plan_leg(a, b))
    }

    /// Plans every consecutive leg of `stops` in parallel. A failed leg does
    /// not affect the others.
    pub fn compute_itinerary(&self, stops: &[Waypoint]) -> Vec<ItineraryLeg> {
        stops
            .par_windows(2)
            .enumerate()
            .map(|(index, pair)| ItineraryLeg {
                index,
                from: pair[0],
                to: pair[1],
                result: self.compute_route(pair[0], pair[1]),
            })
            .collect()
    }

    /// Runs the full pipeline without touching the cache.
    pub fn plan_leg(&self, start: Waypoint, end: Waypoint) -> Result<PlannedRoute, PlanError> {
        let graph = self.router.route(start, end)?;
        let anchored = anchor_endpoints(graph, start, end, self.config.endpoint_tolerance_m)?;

        let Some(land) = self.oracle.check() else {
            warn!(?start, ?end, "land data unavailable, returning routing graph output");
            return Ok(PlannedRoute {
                route: Polyline::new(restore_end(anchored, end)),
                diagnostics: RouteDiagnostics {
                    degraded: Some(Degradation::LandOracleUnavailable),
                    ..RouteDiagnostics::default()
                },
            });
        };

        let config = &self.config;
        let first = avoid_land(&land, &self.router, anchored, config.first_pass_iterations, config);
        let dense = densify(&first.route, config.max_segment_km);
        let (sanitized, sanitize_report) = sanitize(&land, &dense, &config.sanitize);
        let second = avoid_land(&land, &self.router, sanitized, config.second_pass_iterations, config);

        let residual_crossings =
            !second.summary.converged && !crossing_segments(&land, &second.route, &config.crossing).is_empty();
        let diagnostics = RouteDiagnostics {
            degraded: None,
            residual_crossings,
            detour_fallbacks: first.summary.fallbacks + second.summary.fallbacks,
            first_pass: first.summary,
            second_pass: second.summary,
            sanitize: sanitize_report,
            from_cache: false,
        };

        if residual_crossings {
            warn!(?start, ?end, "route still crosses land after repair");
        }
        info!(
            ?start,
            ?end,
            points = second.route.len(),
            detours = first.summary.detours + second.summary.detours,
            "route planned"
        );

        Ok(PlannedRoute {
            route: Polyline::new(restore_end(second.route, end)),
            diagnostics,
        })
    }
}

fn validate(point: Waypoint) -> Result<(), PlanError> {
    if point.is_valid() {
        Ok(())
    } else {
        Err(PlanError::InvalidCoordinate {
            lon: point.lon,
            lat: point.lat,
        })
    }
}

/// Makes the route start at `start` and end at `end`, longitudes
/// continuous from `start`.
///
/// A graph endpoint within `tolerance_m` of the request is replaced;
/// otherwise the requested point is added as one new segment. The last point
/// is `end` shifted by ±360° when the route reaches it across the
/// antimeridian; [`restore_end`] undoes that shift.
fn anchor_endpoints(
    graph: Polyline,
    start: Waypoint,
    end: Waypoint,
    tolerance_m: f64,
) -> Result<Vec<Waypoint>, RouterError> {
    if graph.is_empty() {
        return Err(RouterError::EmptyGeometry);
    }
    let mut points = geodesy::normalize_longitude_sequence(graph.points(), start.lon);

    if geodesy::distance_m(points[0], start) <= tolerance_m {
        points[0] = start;
    } else {
        points.insert(0, start);
    }

    let last = points.len() - 1;
    if last > 0 && geodesy::distance_m(points[last], end) <= tolerance_m {
        points.pop();
    }
    let previous_lon = points[points.len() - 1].lon;
    points.push(Waypoint::new(geodesy::normalize_longitude(end.lon, previous_lon), end.lat));

    Ok(points)
}

/// Replaces the continuous last point with the exact requested `end`.
fn restore_end(mut points: Vec<Waypoint>, end: Waypoint) -> Vec<Waypoint> {
    if let Some(last) = points.last_mut() {
        *last = end;
    }
    points
}
