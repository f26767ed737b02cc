//! Iterative land avoidance over a whole route.
//!
//! Each pass walks the route once, keeping clear segments as they are and
//! splicing a detour in place of every crossing segment. Passes repeat until
//! a pass finds no crossing or the iteration budget runs out.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::crossing::crosses_land;
use crate::detour::{DetourStrategy, synthesize_detour};
use crate::land::LandCheck;
use crate::polyline::Waypoint;
use crate::traits::MaritimeRouter;

/// Per-pass summary reported in route diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    pub iterations: usize,
    pub converged: bool,
    /// Detours spliced in, including direct-hop fallbacks.
    pub detours: usize,
    /// Crossings for which no detour could be found.
    pub fallbacks: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AvoidOutcome {
    pub route: Vec<Waypoint>,
    pub summary: PassSummary,
}

/// Repairs land crossings in `route`, making at most `max_iterations`
/// passes.
///
/// The first and last points are never moved. A route that is already clear
/// comes back unchanged with `converged` set after one pass. With a budget of
/// zero the route is returned untouched and unconverged.
pub fn avoid_land<R>(
    land: &LandCheck<'_>,
    router: &R,
    route: Vec<Waypoint>,
    max_iterations: usize,
    config: &PipelineConfig,
) -> AvoidOutcome
where
    R: MaritimeRouter + ?Sized,
{
    let mut summary = PassSummary::default();
    if route.len() < 2 {
        summary.converged = true;
        return AvoidOutcome { route, summary };
    }

    let mut current = route;
    while summary.iterations < max_iterations {
        summary.iterations += 1;

        let mut result: Vec<Waypoint> = Vec::with_capacity(current.len());
        result.push(current[0]);
        let mut found = 0usize;

        for &b in &current[1..] {
            let a = *result.last().unwrap_or(&b);
            if crosses_land(land, a, b, &config.crossing) {
                found += 1;
                let detour = synthesize_detour(land, router, a, b, config);
                if detour.strategy == DetourStrategy::DirectHop {
                    summary.fallbacks += 1;
                }
                summary.detours += 1;
                result.extend(detour.points);
            } else {
                result.push(b);
            }
        }

        current = result;
        debug!(
            iteration = summary.iterations,
            crossings = found,
            points = current.len(),
            "avoid-land pass"
        );

        if found == 0 {
            summary.converged = true;
            break;
        }
    }

    if summary.converged {
        info!(iterations = summary.iterations, detours = summary.detours, "land avoidance converged");
    } else {
        info!(
            iterations = summary.iterations,
            detours = summary.detours,
            "land avoidance stopped at iteration limit"
        );
    }

    AvoidOutcome {
        route: current,
        summary,
    }
}
