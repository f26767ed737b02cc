//! Synthetic land classifiers and stub routing services.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use geo::{Polygon, polygon};
use sea_route_planner::polygons::PolygonIndex;
use sea_route_planner::{LandOracle, MaritimeRouter, Polyline, RouterError, Waypoint};

// ============================================================================
// Land classifiers
// ============================================================================

/// A 1°×1° box of land centred on (0°, 1°N).
pub fn box_land(lat: f64, lon: f64) -> bool {
    lon > -0.5 && lon < 0.5 && lat > 0.5 && lat < 1.5
}

/// Roughly 50 km × 55 km of land straddling the prime meridian.
pub fn landmass(lat: f64, lon: f64) -> bool {
    lon > -0.25 && lon < 0.25 && lat > 0.5 && lat < 0.95
}

/// About 55 km of land just east of the antimeridian, on the equator.
pub fn date_line_island(lat: f64, lon: f64) -> bool {
    lon > -179.6 && lon < -179.1 && lat > -0.5 && lat < 0.5
}

pub fn all_water(_lat: f64, _lon: f64) -> bool {
    false
}

pub fn all_land(_lat: f64, _lon: f64) -> bool {
    true
}

fn square(center_lon: f64, center_lat: f64, size: f64) -> Polygon<f64> {
    let h = size / 2.0;
    polygon![
        (x: center_lon - h, y: center_lat - h),
        (x: center_lon + h, y: center_lat - h),
        (x: center_lon + h, y: center_lat + h),
        (x: center_lon - h, y: center_lat + h),
        (x: center_lon - h, y: center_lat - h),
    ]
}

/// A ~2 km square atoll as a polygon index.
pub fn atoll(center_lon: f64, center_lat: f64) -> PolygonIndex {
    PolygonIndex::new(vec![square(center_lon, center_lat, 0.018)])
}

pub fn box_oracle() -> LandOracle {
    LandOracle::unavailable().with_coarse(box_land)
}

pub fn open_ocean_oracle() -> LandOracle {
    LandOracle::unavailable().with_coarse(all_water)
}

// ============================================================================
// Routing services
// ============================================================================

/// Direct-segment router that counts its calls.
#[derive(Debug, Default)]
pub struct CountingRouter {
    calls: AtomicUsize,
}

impl CountingRouter {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MaritimeRouter for CountingRouter {
    fn route(&self, from: Waypoint, to: Waypoint) -> Result<Polyline, RouterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Polyline::new(vec![from, to]))
    }
}

/// Router that always times out.
#[derive(Debug, Default)]
pub struct FailingRouter {
    calls: AtomicUsize,
}

impl FailingRouter {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MaritimeRouter for FailingRouter {
    fn route(&self, _from: Waypoint, _to: Waypoint) -> Result<Polyline, RouterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RouterError::Timeout)
    }
}

/// Answers the first request with the direct segment and fails every
/// later one, so every repair query fails.
#[derive(Debug, Default)]
pub struct FirstCallOnlyRouter {
    calls: AtomicUsize,
}

impl MaritimeRouter for FirstCallOnlyRouter {
    fn route(&self, from: Waypoint, to: Waypoint) -> Result<Polyline, RouterError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(Polyline::new(vec![from, to]))
        } else {
            Err(RouterError::NoRoute("graph unavailable".to_string()))
        }
    }
}

/// Returns a fixed geometry for the first request, then direct segments.
#[derive(Debug)]
pub struct ScriptedRouter {
    first: Mutex<Option<Vec<Waypoint>>>,
}

impl ScriptedRouter {
    pub fn new(points: Vec<Waypoint>) -> Self {
        Self {
            first: Mutex::new(Some(points)),
        }
    }
}

impl MaritimeRouter for ScriptedRouter {
    fn route(&self, from: Waypoint, to: Waypoint) -> Result<Polyline, RouterError> {
        let scripted = self.first.lock().unwrap().take();
        Ok(Polyline::new(scripted.unwrap_or_else(|| vec![from, to])))
    }
}

/// Fails any leg arriving north of `max_lat`.
#[derive(Debug)]
pub struct NorthernLimitRouter {
    pub max_lat: f64,
}

impl MaritimeRouter for NorthernLimitRouter {
    fn route(&self, from: Waypoint, to: Waypoint) -> Result<Polyline, RouterError> {
        if to.lat > self.max_lat || from.lat > self.max_lat {
            Err(RouterError::NoRoute(format!("beyond {}°N", self.max_lat)))
        } else {
            Ok(Polyline::new(vec![from, to]))
        }
    }
}

// ============================================================================
// Assertions
// ============================================================================

/// Number of adjacent pairs whose longitude jumps by more than 180°.
pub fn antimeridian_jumps(points: &[Waypoint]) -> usize {
    points
        .windows(2)
        .filter(|pair| (pair[1].lon - pair[0].lon).abs() > 180.0)
        .count()
}
