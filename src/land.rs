//! Land classification oracle.
//!
//! Combines a coarse grid (continents, large islands) with a fine polygon
//! index (small islands, archipelagos). A point is land when either source
//! says so. When neither source is loaded the oracle answers "unknown"
//! rather than guessing; callers obtain a [`LandCheck`] only when at least
//! one source is present, so every land-avoidance stage is statically tied
//! to an available oracle.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geodesy;
use crate::polyline::Waypoint;
use crate::traits::LandSource;

/// How a point relates to navigable water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Water,
    /// Classified as land, but open water exists within the search radius
    /// (coastal clip, canal, strait).
    LandNearWater,
    /// Classified as land with no water anywhere within the search radius.
    LandIsolated,
}

#[derive(Default)]
pub struct LandOracle {
    coarse: Option<Box<dyn LandSource>>,
    fine: Option<Box<dyn LandSource>>,
}

impl fmt::Debug for LandOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LandOracle")
            .field("coarse", &self.coarse.is_some())
            .field("fine", &self.fine.is_some())
            .finish()
    }
}

impl LandOracle {
    /// An oracle with no data: every query is "unknown".
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn with_coarse(mut self, source: impl LandSource + 'static) -> Self {
        self.coarse = Some(Box::new(source));
        self
    }

    pub fn with_fine(mut self, source: impl LandSource + 'static) -> Self {
        self.fine = Some(Box::new(source));
        self
    }

    pub fn has_coarse(&self) -> bool {
        self.coarse.is_some()
    }

    pub fn has_fine(&self) -> bool {
        self.fine.is_some()
    }

    pub fn is_available(&self) -> bool {
        self.coarse.is_some() || self.fine.is_some()
    }

    /// `Some(true)` for land, `Some(false)` for water, `None` when no data
    /// source is loaded.
    pub fn is_land(&self, lat: f64, lon: f64) -> Option<bool> {
        self.check().map(|check| check.is_land(lat, lon))
    }

    /// A classification view, present only when some data is loaded.
    pub fn check(&self) -> Option<LandCheck<'_>> {
        self.is_available().then_some(LandCheck { oracle: self })
    }
}

/// Borrowed view of an oracle with at least one data source.
#[derive(Debug, Clone, Copy)]
pub struct LandCheck<'a> {
    oracle: &'a LandOracle,
}

impl<'a> LandCheck<'a> {
    pub fn is_land(&self, lat: f64, lon: f64) -> bool {
        let lon = geodesy::wrap_longitude(lon);
        let coarse = self
            .oracle
            .coarse
            .as_ref()
            .is_some_and(|source| source.is_land(lat, lon));
        coarse
            || self
                .oracle
                .fine
                .as_ref()
                .is_some_and(|source| source.is_land(lat, lon))
    }

    pub fn is_water(&self, lat: f64, lon: f64) -> bool {
        !self.is_land(lat, lon)
    }

    /// True when any of a 5×5 set of offsets spanning `radius_deg` around
    /// the point is water.
    pub fn has_nearby_water(&self, lat: f64, lon: f64, radius_deg: f64) -> bool {
        let steps = [
            -radius_deg,
            -radius_deg * 0.5,
            0.0,
            radius_deg * 0.5,
            radius_deg,
        ];
        steps.iter().any(|dlat| {
            steps
                .iter()
                .any(|dlon| self.is_water(lat + dlat, lon + dlon))
        })
    }

    /// Nearest water point on a `step_deg` lattice strictly inside
    /// `radius_deg` of the point, ranked by geodesic distance.
    pub fn nearest_water(
        &self,
        lat: f64,
        lon: f64,
        radius_deg: f64,
        step_deg: f64,
    ) -> Option<Waypoint> {
        if step_deg <= 0.0 || radius_deg <= 0.0 {
            return None;
        }
        let origin = Waypoint::new(lon, lat);
        let steps = (radius_deg / step_deg) as i64 + 1;
        let max_sq = radius_deg * radius_deg;
        let mut best: Option<(f64, Waypoint)> = None;

        for di in -steps..=steps {
            for dj in -steps..=steps {
                let dlat = di as f64 * step_deg;
                let dlon = dj as f64 * step_deg;
                if dlat * dlat + dlon * dlon > max_sq {
                    continue;
                }
                let candidate = Waypoint::new(lon + dlon, (lat + dlat).clamp(-90.0, 90.0));
                if self.is_land(candidate.lat, candidate.lon) {
                    continue;
                }
                let distance = geodesy::distance_m(origin, candidate);
                if best.is_none_or(|(best_distance, _)| distance < best_distance) {
                    best = Some((distance, candidate));
                }
            }
        }

        best.map(|(_, point)| point)
    }

    pub fn severity(&self, lat: f64, lon: f64, radius_deg: f64) -> Severity {
        if self.is_water(lat, lon) {
            Severity::Water
        } else if self.has_nearby_water(lat, lon, radius_deg) {
            Severity::LandNearWater
        } else {
            Severity::LandIsolated
        }
    }
}
