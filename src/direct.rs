//! Direct segment router (fallback when no routing graph is available).
//!
//! Always answers with the two-point segment between the endpoints, which is
//! what a routing graph returns when it has nothing better. Land avoidance
//! then has only the perpendicular-offset strategy to work with.

use crate::error::RouterError;
use crate::polyline::{Polyline, Waypoint};
use crate::traits::MaritimeRouter;

/// Router that returns the direct geodesic segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectRouter;

impl MaritimeRouter for DirectRouter {
    fn route(&self, from: Waypoint, to: Waypoint) -> Result<Polyline, RouterError> {
        Ok(Polyline::new(vec![from, to]))
    }
}
