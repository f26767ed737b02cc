//! Core collaborator traits for the route planner.
//!
//! These are intentionally minimal. Concrete deployments implement them for
//! their own routing graph and land datasets.

use crate::error::RouterError;
use crate::polyline::{Polyline, Waypoint};

/// An external maritime routing graph service.
///
/// A successful reply may be a degenerate two-point polyline, meaning the
/// graph has nothing better than the direct segment.
pub trait MaritimeRouter: Send + Sync {
    fn route(&self, from: Waypoint, to: Waypoint) -> Result<Polyline, RouterError>;
}

impl<R> MaritimeRouter for &R
where
    R: MaritimeRouter + ?Sized,
{
    fn route(&self, from: Waypoint, to: Waypoint) -> Result<Polyline, RouterError> {
        (**self).route(from, to)
    }
}

impl<R> MaritimeRouter for Box<R>
where
    R: MaritimeRouter + ?Sized,
{
    fn route(&self, from: Waypoint, to: Waypoint) -> Result<Polyline, RouterError> {
        (**self).route(from, to)
    }
}

/// One land classification dataset.
///
/// Implementations receive longitudes already wrapped into [-180, 180).
pub trait LandSource: Send + Sync {
    fn is_land(&self, lat: f64, lon: f64) -> bool;
}

impl<F> LandSource for F
where
    F: Fn(f64, f64) -> bool + Send + Sync,
{
    fn is_land(&self, lat: f64, lon: f64) -> bool {
        self(lat, lon)
    }
}
